//! General-admission layout - capacity zones without seat coordinates.
//!
//! Standing and GA areas are not seat-addressable, so this strategy emits
//! zone descriptors only; the place list stays empty by design.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::geometry::Rect;
use crate::layout::LayoutOutput;
use crate::place::Place;

/// Parameters for the general-admission strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionLayout {
    pub zones: Vec<ZoneSpec>,
}

/// One configured zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSpec {
    #[serde(default)]
    pub zone_id: Option<String>,
    pub name: String,
    pub bounds: Rect,
    /// Explicit capacity; wins over `share`.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Fraction of the total capacity assigned to this zone.
    #[serde(default)]
    pub share: Option<f64>,
}

/// A produced zone record. The place list is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub zone_id: String,
    pub name: String,
    pub bounds: Rect,
    pub capacity: u32,
    #[serde(default)]
    pub places: Vec<Place>,
}

/// Resolve zone capacities against the requested total.
pub fn generate_admission_zones(
    layout: &AdmissionLayout,
    total_capacity: u32,
) -> Result<LayoutOutput> {
    if layout.zones.is_empty() {
        return Err(EngineError::InvalidInput(
            "general admission requires at least one zone".into(),
        ));
    }

    let mut output = LayoutOutput::default();
    for (index, spec) in layout.zones.iter().enumerate() {
        let capacity = match (spec.capacity, spec.share) {
            (Some(explicit), _) => explicit,
            (None, Some(share)) => (f64::from(total_capacity) * share).floor() as u32,
            (None, None) => 0,
        };

        output.zones.push(Zone {
            zone_id: spec
                .zone_id
                .clone()
                .unwrap_or_else(|| format!("ga-{}", index + 1)),
            name: spec.name.clone(),
            bounds: spec.bounds,
            capacity,
            places: Vec::new(),
        });
    }

    Ok(output)
}
