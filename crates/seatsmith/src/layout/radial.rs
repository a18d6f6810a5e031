//! Radial layout - theater rows curving around a center point.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, GeometryWarning, Result};
use crate::geometry::Point;
use crate::layout::LayoutOutput;
use crate::place::{Place, PlaceId};

/// Parameters for the radial strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadialLayout {
    pub center: Point,
    /// Radius of the first row.
    pub base_radius: f64,
    /// Radial distance between consecutive rows.
    pub row_spacing: f64,
    pub seats_per_row: u32,
    pub total_rows: u32,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            base_radius: 100.0,
            row_spacing: 12.0,
            seats_per_row: 20,
            total_rows: 10,
        }
    }
}

/// Place identifiers on concentric arcs around the center.
///
/// Seats whose row index reaches `total_rows` are dropped (not placed) and
/// reported once as a warning. Every seat is labeled section "Main".
pub fn generate_radial_layout(layout: &RadialLayout, ids: &[PlaceId]) -> Result<LayoutOutput> {
    if layout.seats_per_row == 0 || layout.total_rows == 0 {
        return Err(EngineError::InvalidInput(
            "radial layout requires positive seatsPerRow and totalRows".into(),
        ));
    }

    let seats_per_row = layout.seats_per_row as usize;
    let total_rows = layout.total_rows as usize;
    let mut output = LayoutOutput::default();
    let mut dropped = 0usize;

    for (i, id) in ids.iter().enumerate() {
        let row = i / seats_per_row;
        if row >= total_rows {
            dropped += 1;
            continue;
        }

        let seat_in_row = i % seats_per_row;
        // Proportional position across the full [-pi, pi] span, inset by
        // half a step so the two ends of the circle never coincide.
        let theta = -PI + 2.0 * PI * (seat_in_row as f64 + 0.5) / seats_per_row as f64;
        let radius = layout.base_radius + row as f64 * layout.row_spacing;

        output.places.push(Place {
            place_id: id.clone(),
            x: layout.center.x + radius * theta.cos(),
            y: layout.center.y + radius * theta.sin(),
            row: format!("R{}", row + 1),
            seat: (seat_in_row + 1).to_string(),
            section: "Main".into(),
            zone: None,
            in_bounds: true,
        });
    }

    if dropped > 0 {
        output.warn(GeometryWarning::SeatsDropped {
            dropped,
            total_rows: layout.total_rows,
        });
    }

    Ok(output)
}
