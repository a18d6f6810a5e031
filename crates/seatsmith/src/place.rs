//! Place records and post-processing utilities.
//!
//! A place is one addressable, sellable seat position. `row`/`seat` are
//! display labels, not keys; uniqueness is carried solely by the
//! identifier.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate scale used by [`normalize_coordinates`].
pub const NORMALIZED_SCALE: f64 = 1000.0;

/// An opaque place identifier, unique within a manifest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One positioned seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: PlaceId,
    pub x: f64,
    pub y: f64,
    pub row: String,
    pub seat: String,
    pub section: String,
    #[serde(default)]
    pub zone: Option<String>,
    /// Whether the accepted position fell inside the declared section
    /// shape. Exact seat counts take precedence over containment, so a
    /// heavily obstructed row can push seats outside the boundary; this
    /// flag keeps that visible to the caller.
    #[serde(default = "default_true")]
    pub in_bounds: bool,
}

fn default_true() -> bool {
    true
}

/// Best-effort section/seat guess recovered from an opaque identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPlaceId {
    pub section: String,
    pub seat: String,
}

/// Heuristically split an opaque identifier into section and seat tokens.
///
/// Positional slice: the first ~60% of characters become the section key,
/// the remainder the seat key. This is inherently lossy and only meant for
/// externally supplied identifiers that carry no coordinates; never prefer
/// it over real section data.
pub fn parse_place_id(id: &str) -> ParsedPlaceId {
    let chars: Vec<char> = id.chars().collect();
    let split = ((chars.len() as f64) * 0.6).ceil() as usize;
    ParsedPlaceId {
        section: chars[..split].iter().collect(),
        seat: chars[split..].iter().collect(),
    }
}

/// Per-section summary bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBucket {
    pub section: String,
    pub count: usize,
    /// Distinct price-tier tags seen in the section, sorted.
    pub price_tiers: Vec<String>,
    pub places: Vec<Place>,
}

/// Partition places into per-section buckets, sorted by section name.
pub fn group_places_by_section(places: &[Place]) -> Vec<SectionBucket> {
    let mut buckets: BTreeMap<&str, Vec<Place>> = BTreeMap::new();
    for place in places {
        buckets.entry(place.section.as_str()).or_default().push(place.clone());
    }

    buckets
        .into_iter()
        .map(|(section, places)| {
            let tiers: BTreeSet<String> =
                places.iter().filter_map(|p| p.zone.clone()).collect();
            SectionBucket {
                section: section.to_string(),
                count: places.len(),
                price_tiers: tiers.into_iter().collect(),
                places,
            }
        })
        .collect()
}

/// Rescale all coordinates linearly into `[0, NORMALIZED_SCALE]`.
///
/// If every X or every Y is identical the input is returned unscaled
/// rather than dividing by a zero range.
pub fn normalize_coordinates(places: &[Place]) -> Vec<Place> {
    let Some(first) = places.first() else {
        return Vec::new();
    };

    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;
    for p in places {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let range_x = max_x - min_x;
    let range_y = max_y - min_y;
    if range_x <= f64::EPSILON || range_y <= f64::EPSILON {
        return places.to_vec();
    }

    places
        .iter()
        .map(|p| {
            let mut scaled = p.clone();
            scaled.x = (p.x - min_x) / range_x * NORMALIZED_SCALE;
            scaled.y = (p.y - min_y) / range_y * NORMALIZED_SCALE;
            scaled
        })
        .collect()
}
