//! Layout strategies for positioning seats.
//!
//! Each strategy consumes a flat identifier list plus geometry parameters
//! and emits positioned places. Strategies are pure: no shared state, no
//! randomness, identical inputs yield byte-identical outputs.

mod admission;
mod grid;
mod manual;
mod radial;

pub use admission::{generate_admission_zones, AdmissionLayout, Zone, ZoneSpec};
pub use grid::{generate_grid_layout, GridLayout, SectionNaming};
pub use manual::{generate_manual_layout, ManualLayout};
pub use radial::{generate_radial_layout, RadialLayout};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryWarning, Result};
use crate::place::{Place, PlaceId};

/// Output of a single layout run.
#[derive(Debug, Clone, Default)]
pub struct LayoutOutput {
    pub places: Vec<Place>,
    /// General-admission zones; empty for seat-addressable strategies.
    pub zones: Vec<Zone>,
    pub warnings: Vec<GeometryWarning>,
}

impl LayoutOutput {
    /// Record a non-fatal defect: logged once, then attached to the output.
    pub(crate) fn warn(&mut self, warning: GeometryWarning) {
        tracing::warn!(warning = %warning, "geometry warning");
        self.warnings.push(warning);
    }
}

/// Available layout strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "strategy")]
pub enum LayoutStrategy {
    /// Uniform arena/stadium grid.
    Grid(GridLayout),
    /// Theater curve: rows on growing radii around a center point.
    Radial(RadialLayout),
    /// Capacity zones without individually addressable seats.
    GeneralAdmission(AdmissionLayout),
    /// Manually-configured sections with per-row configuration.
    Manual(ManualLayout),
}

impl LayoutStrategy {
    /// Get strategy name as string.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Grid(_) => "grid",
            LayoutStrategy::Radial(_) => "radial",
            LayoutStrategy::GeneralAdmission(_) => "generalAdmission",
            LayoutStrategy::Manual(_) => "manual",
        }
    }

    /// Whether this strategy places individually addressable seats.
    pub fn requires_seats(&self) -> bool {
        !matches!(self, LayoutStrategy::GeneralAdmission(_))
    }

    /// Run the strategy over the supplied identifiers.
    ///
    /// `capacity` is the resolved total; only the general-admission
    /// strategy needs it (for share-derived zone capacities), the others
    /// take their total from the identifier list.
    pub fn generate(&self, ids: &[PlaceId], capacity: u32) -> Result<LayoutOutput> {
        tracing::debug!(strategy = self.name(), ids = ids.len(), "generating layout");
        match self {
            LayoutStrategy::Grid(layout) => generate_grid_layout(layout, ids),
            LayoutStrategy::Radial(layout) => generate_radial_layout(layout, ids),
            LayoutStrategy::GeneralAdmission(layout) => {
                generate_admission_zones(layout, capacity)
            }
            LayoutStrategy::Manual(layout) => generate_manual_layout(layout, ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;
    use crate::geometry::{Point, Rect};

    #[test]
    fn strategy_names() {
        let grid = LayoutStrategy::Grid(GridLayout::default());
        assert_eq!(grid.name(), "grid");
        assert!(grid.requires_seats());

        let ga = LayoutStrategy::GeneralAdmission(AdmissionLayout { zones: vec![] });
        assert_eq!(ga.name(), "generalAdmission");
        assert!(!ga.requires_seats());
    }

    #[test]
    fn strategy_tag_round_trips() {
        let mut section = Section::rect("Floor", Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
        section.capacity = Some(4);
        let strategy = LayoutStrategy::Manual(ManualLayout {
            sections: vec![section],
        });
        let json = serde_json::to_string(&strategy).unwrap();
        assert!(json.contains(r#""strategy":"manual""#), "tagged JSON: {json}");
        let back: LayoutStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, strategy);
    }
}
