//! Generation façade: wire identifiers, a layout strategy, and the
//! manifest builder into the single call the surrounding application uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, GeometryWarning, Result};
use crate::ident::{generate_ids, IdentifierConfig};
use crate::layout::{LayoutStrategy, Zone};
use crate::manifest::{generate_manifest, Manifest};
use crate::place::{Place, PlaceId};

/// Where the place identifiers come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum IdentifierSource {
    /// Caller-supplied identifiers, used as-is.
    Provided(Vec<PlaceId>),
    /// Generated fresh from a pattern config.
    Generate(IdentifierConfig),
}

impl Default for IdentifierSource {
    fn default() -> Self {
        IdentifierSource::Generate(IdentifierConfig::default())
    }
}

/// One full generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(flatten)]
    pub layout: LayoutStrategy,
    /// Requested total capacity; defaults to what the layout itself
    /// implies (summed section capacities for manual layouts).
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub identifiers: IdentifierSource,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

impl GenerationRequest {
    pub fn new(layout: LayoutStrategy) -> Self {
        Self {
            layout,
            capacity: None,
            identifiers: IdentifierSource::default(),
            event_id: None,
            update_time: None,
        }
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// None when the strategy yields no addressable places (general
    /// admission), since a manifest requires at least one identifier.
    pub manifest: Option<Manifest>,
    pub places: Vec<Place>,
    pub zones: Vec<Zone>,
    #[serde(skip)]
    pub warnings: Vec<GeometryWarning>,
}

impl GenerationOutcome {
    /// Warnings rendered for display or logging.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}

/// Resolve the request's total capacity.
fn resolve_capacity(request: &GenerationRequest) -> u32 {
    if let Some(capacity) = request.capacity {
        return capacity;
    }
    match &request.layout {
        LayoutStrategy::Manual(manual) => manual
            .sections
            .iter()
            .map(|s| s.effective_capacity())
            .sum(),
        LayoutStrategy::GeneralAdmission(ga) => {
            ga.zones.iter().map(|z| z.capacity.unwrap_or(0)).sum()
        }
        // Grid and radial layouts carry no implicit total.
        LayoutStrategy::Grid(_) | LayoutStrategy::Radial(_) => 0,
    }
}

/// Run one generation: identifiers -> layout -> manifest.
pub fn generate(request: &GenerationRequest) -> Result<GenerationOutcome> {
    let capacity = resolve_capacity(request);
    if capacity == 0 && request.layout.requires_seats() {
        return Err(EngineError::ZeroCapacity);
    }

    let ids = match &request.identifiers {
        IdentifierSource::Provided(ids) => ids.clone(),
        // Zone-only strategies never consume identifiers.
        IdentifierSource::Generate(_) if !request.layout.requires_seats() => Vec::new(),
        IdentifierSource::Generate(config) => generate_ids(config, capacity as usize)?,
    };

    let output = request.layout.generate(&ids, capacity)?;

    let manifest = if output.places.is_empty() {
        None
    } else {
        let placed_ids: Vec<PlaceId> =
            output.places.iter().map(|p| p.place_id.clone()).collect();
        Some(
            generate_manifest(request.event_id.clone(), placed_ids, request.update_time)?
                .with_places(output.places.clone()),
        )
    };

    Ok(GenerationOutcome {
        manifest,
        places: output.places,
        zones: output.zones,
        warnings: output.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::layout::{AdmissionLayout, GridLayout, ManualLayout, ZoneSpec};
    use crate::section::{RowSpec, Section};

    fn manual_request() -> GenerationRequest {
        let mut section = Section::rect(
            "Orchestra",
            Rect::new(Point::new(0.0, 0.0), Point::new(200.0, 100.0)),
        );
        section.row_config = vec![RowSpec::new(1, 6), RowSpec::new(2, 6)];
        GenerationRequest::new(LayoutStrategy::Manual(ManualLayout {
            sections: vec![section],
        }))
    }

    #[test]
    fn manual_capacity_defaults_to_section_sum() {
        let outcome = generate(&manual_request()).unwrap();
        assert_eq!(outcome.places.len(), 12);
        let manifest = outcome.manifest.expect("places imply a manifest");
        assert_eq!(manifest.place_ids.len(), 12);
        assert_eq!(manifest.places.as_ref().map(Vec::len), Some(12));
    }

    #[test]
    fn identical_requests_are_deterministic() {
        let mut request = manual_request();
        request.update_time = Some("2026-03-01T00:00:00Z".parse().unwrap());
        let a = generate(&request).unwrap();
        let b = generate(&request).unwrap();
        assert_eq!(a.places, b.places, "byte-identical outputs");
        assert_eq!(
            a.manifest.unwrap().update_hash,
            b.manifest.unwrap().update_hash
        );
    }

    #[test]
    fn provided_identifiers_are_used_verbatim() {
        let mut request = manual_request();
        let supplied: Vec<PlaceId> =
            (0..12).map(|i| PlaceId::new(format!("ext-{i:03}"))).collect();
        request.identifiers = IdentifierSource::Provided(supplied.clone());
        let outcome = generate(&request).unwrap();
        let placed: Vec<&str> = outcome.places.iter().map(|p| p.place_id.as_str()).collect();
        assert!(placed.iter().all(|id| id.starts_with("ext-")));
        assert_eq!(placed.len(), supplied.len());
    }

    #[test]
    fn zero_capacity_is_fatal_for_seated_layouts() {
        let request = GenerationRequest::new(LayoutStrategy::Grid(GridLayout::default()));
        let err = generate(&request).unwrap_err();
        assert!(matches!(err, EngineError::ZeroCapacity));
    }

    #[test]
    fn general_admission_yields_zones_without_manifest() {
        let request = GenerationRequest {
            capacity: Some(2000),
            ..GenerationRequest::new(LayoutStrategy::GeneralAdmission(AdmissionLayout {
                zones: vec![ZoneSpec {
                    zone_id: None,
                    name: "Lawn".into(),
                    bounds: Rect::new(Point::new(0.0, 0.0), Point::new(300.0, 200.0)),
                    capacity: None,
                    share: Some(0.5),
                }],
            }))
        };
        let outcome = generate(&request).unwrap();
        assert!(outcome.manifest.is_none(), "GA is not seat-addressable");
        assert!(outcome.places.is_empty());
        assert_eq!(outcome.zones.len(), 1);
        assert_eq!(outcome.zones[0].capacity, 1000);
    }

    #[test]
    fn grid_request_with_capacity_round_trips_json() {
        let json = r#"{
            "strategy": "grid",
            "sections": 2,
            "seatsPerRow": 10,
            "capacity": 40
        }"#;
        let request: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.capacity, Some(40));
        let outcome = generate(&request).unwrap();
        assert_eq!(outcome.places.len(), 40);
    }
}
