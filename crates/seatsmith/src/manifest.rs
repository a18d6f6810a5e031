//! Manifest assembly, content hashing, and diffing.
//!
//! The hash is computed over the lexicographically sorted identifier list,
//! so two manifests with the same identifier set hash identically no
//! matter what order generation emitted them in. `update_time` is a
//! timestamp, never part of the hash.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{EngineError, Result};
use crate::place::{parse_place_id, Place, PlaceId};

/// The versioned, hashed set of places for one venue/event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub event_id: String,
    pub update_hash: String,
    pub update_time: DateTime<Utc>,
    pub place_ids: Vec<PlaceId>,
    /// Full place records when the generator produced coordinates;
    /// externally sourced manifests may carry identifiers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places: Option<Vec<Place>>,
}

impl Manifest {
    /// Attach full place records to an identifier-only manifest.
    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.places = Some(places);
        self
    }
}

/// Content-addressed digest over the sorted identifier set.
///
/// SHA-256 over the JSON serialization of the lexicographically sorted
/// identifier list, hex-encoded. Order-independent by construction.
pub fn content_hash(place_ids: &[PlaceId]) -> Result<String> {
    let mut sorted: Vec<&str> = place_ids.iter().map(PlaceId::as_str).collect();
    sorted.sort_unstable();
    let payload = serde_json::to_vec(&sorted)?;

    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Wrap a set of place identifiers into a manifest record.
///
/// The identifier list must be non-empty. A missing `event_id` is derived
/// from the content hash so generation stays deterministic end to end; a
/// missing `update_time` is stamped with the current time.
pub fn generate_manifest(
    event_id: Option<String>,
    place_ids: Vec<PlaceId>,
    update_time: Option<DateTime<Utc>>,
) -> Result<Manifest> {
    if place_ids.is_empty() {
        return Err(EngineError::EmptyManifest);
    }

    let update_hash = content_hash(&place_ids)?;
    let event_id = event_id.unwrap_or_else(|| format!("evt-{}", &update_hash[..12]));

    Ok(Manifest {
        event_id,
        update_hash,
        update_time: update_time.unwrap_or_else(Utc::now),
        place_ids,
        places: None,
    })
}

/// Identifier-set delta between two manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDiff {
    pub changed: bool,
    pub added: Vec<PlaceId>,
    pub removed: Vec<PlaceId>,
}

/// Compute additions and removals between two manifests.
///
/// Short-circuits to "unchanged" when the hashes match; otherwise the
/// identifier sets are compared order-independently and the deltas come
/// back sorted.
pub fn compare_manifests(old: &Manifest, new: &Manifest) -> ManifestDiff {
    if old.update_hash == new.update_hash {
        return ManifestDiff {
            changed: false,
            added: Vec::new(),
            removed: Vec::new(),
        };
    }

    let old_set: BTreeSet<&PlaceId> = old.place_ids.iter().collect();
    let new_set: BTreeSet<&PlaceId> = new.place_ids.iter().collect();

    let added: Vec<PlaceId> = new_set.difference(&old_set).map(|id| (*id).clone()).collect();
    let removed: Vec<PlaceId> = old_set.difference(&new_set).map(|id| (*id).clone()).collect();

    ManifestDiff {
        changed: !added.is_empty() || !removed.is_empty(),
        added,
        removed,
    }
}

/// A place record normalized for handoff to persistence.
///
/// Coordinates are carried when the manifest has them; otherwise the
/// best-effort identifier parse fills section/seat guesses. Pricing and
/// availability are default stubs - this engine knows nothing about money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPlace {
    pub place_id: PlaceId,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub section: String,
    pub seat: String,
    pub price_tier: Option<String>,
    pub available: bool,
}

/// Expand a manifest into normalized place records.
pub fn normalize_manifest_data(manifest: &Manifest) -> Vec<NormalizedPlace> {
    if let Some(places) = &manifest.places {
        return places
            .iter()
            .map(|place| NormalizedPlace {
                place_id: place.place_id.clone(),
                x: Some(place.x),
                y: Some(place.y),
                section: place.section.clone(),
                seat: place.seat.clone(),
                price_tier: place.zone.clone(),
                available: true,
            })
            .collect();
    }

    manifest
        .place_ids
        .iter()
        .map(|id| {
            let parsed = parse_place_id(id.as_str());
            NormalizedPlace {
                place_id: id.clone(),
                x: None,
                y: None,
                section: parsed.section,
                seat: parsed.seat,
                price_tier: None,
                available: true,
            }
        })
        .collect()
}


/// Top-level `#[cfg(test)]` scope: the `proptest!` macro has edition-2024
/// compatibility issues when nested inside another test module.
#[cfg(test)]
mod manifest_proptests {
    use super::content_hash;
    use crate::place::PlaceId;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hash_invariant_under_permutation(
            raw in proptest::collection::hash_set("[a-z0-9]{1,8}", 1..50),
        ) {
            let ids: Vec<PlaceId> = raw.iter().map(|s| PlaceId::new(s.as_str())).collect();
            let baseline = content_hash(&ids).unwrap();

            let mut shuffled = ids.clone();
            shuffled.reverse();
            prop_assert_eq!(&content_hash(&shuffled).unwrap(), &baseline);

            let mid = shuffled.len() / 2;
            shuffled.rotate_left(mid);
            prop_assert_eq!(&content_hash(&shuffled).unwrap(), &baseline);
        }
    }
}
