//! Manual-section layout - rectangles and polygons with per-row seat
//! counts, aisles, obstructions, and curved presentation.
//!
//! This is the invariant-bearing path: a section with row configuration
//! must place exactly its configured seat count whenever enough
//! identifiers are supplied. Bounds are advisory - a candidate position
//! that clears the obstruction check is accepted even when it falls
//! outside the section shape, and `Place::in_bounds` records the
//! difference.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::clip::span_at_y;
use crate::error::{EngineError, GeometryWarning, Result};
use crate::geometry::{Point, Polygon, Rect};
use crate::layout::LayoutOutput;
use crate::place::{Place, PlaceId};
use crate::section::{
    NumberingDirection, PresentationStyle, Rotation, RowSpec, Section, SectionShape,
    SpacingConfig,
};

/// Ceiling on the per-row slot scan past the row's nominal width.
/// Obstructions are finite regions, so a scan that runs this far past the
/// row has hit an unfillable configuration.
const SCAN_SLACK: usize = 1024;

/// Parameters for the manual-section strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualLayout {
    pub sections: Vec<Section>,
}

/// Distribute identifiers across the configured sections and place them.
///
/// A section with row configuration consumes exactly its configured
/// capacity (clamped only by identifier exhaustion); a section without one
/// receives a proportional share. Identifiers left over after every
/// section ran are handed to the last section with a seat-numbering
/// offset so labels continue.
pub fn generate_manual_layout(layout: &ManualLayout, ids: &[PlaceId]) -> Result<LayoutOutput> {
    if layout.sections.is_empty() {
        return Err(EngineError::NoSections);
    }

    let total_capacity: u32 = layout
        .sections
        .iter()
        .map(Section::effective_capacity)
        .sum();

    let mut output = LayoutOutput::default();
    let mut cursor = 0usize;
    let mut placed_in_last = 0usize;

    for section in &layout.sections {
        let remaining = ids.len() - cursor;
        let capacity = section.effective_capacity() as usize;
        let allocation = if !section.row_config.is_empty() {
            capacity
        } else if total_capacity == 0 {
            0
        } else {
            // Proportional share of the originally supplied identifiers.
            (capacity as f64 / f64::from(total_capacity) * ids.len() as f64).floor() as usize
        }
        .min(remaining);

        let consumed = place_section(section, &ids[cursor..cursor + allocation], 0, &mut output);
        cursor += consumed;
        placed_in_last = consumed;
    }

    if cursor < ids.len() {
        if let Some(last) = layout.sections.last() {
            place_section(last, &ids[cursor..], placed_in_last, &mut output);
        }
    }

    Ok(output)
}

/// Place one section's identifiers; returns how many were consumed.
///
/// `seat_offset` skips that many already-accepted grid positions before
/// placing, which is how the leftover pass resumes the last section's
/// walk.
fn place_section(
    section: &Section,
    ids: &[PlaceId],
    seat_offset: usize,
    output: &mut LayoutOutput,
) -> usize {
    if let SectionShape::Polygon(poly) = &section.shape {
        if poly.is_degenerate() {
            output.warn(GeometryWarning::DegenerateSection {
                section: section.name.clone(),
            });
            return 0;
        }
    }
    let Some(bounds) = section.shape.bounding_box() else {
        output.warn(GeometryWarning::DegenerateSection {
            section: section.name.clone(),
        });
        return 0;
    };
    if ids.is_empty() {
        return 0;
    }

    let mut places = if section.row_config.is_empty() {
        place_uniform(section, bounds, ids, seat_offset, output)
    } else {
        place_row_config(section, bounds, ids, seat_offset, output)
    };

    apply_rotation(section, &mut places);
    for place in &mut places {
        place.in_bounds = section.shape.contains(place.x, place.y);
    }

    let consumed = places.len();
    output.places.extend(places);
    consumed
}

/// Uniform rows over the section bounds (no row configuration).
///
/// Obstructed grid cells are skipped without consuming an identifier, so a
/// heavily obstructed section may undershoot its nominal grid; that is
/// acceptable only on this path and is surfaced as a warning.
fn place_uniform(
    section: &Section,
    bounds: Rect,
    ids: &[PlaceId],
    seat_offset: usize,
    output: &mut LayoutOutput,
) -> Vec<Place> {
    let count = ids.len();
    let total_seats = count + seat_offset;
    let spacing = &section.spacing;

    let cfg_rows = section.rows.filter(|r| *r > 0).map(|r| r as usize);
    let cfg_spr = section.seats_per_row.filter(|s| *s > 0).map(|s| s as usize);
    let (rows, seats_per_row) = match (cfg_rows, cfg_spr) {
        (Some(rows), Some(spr)) => (rows, spr),
        (Some(rows), None) => (rows, total_seats.div_ceil(rows).max(1)),
        (None, hint) => {
            let rows = ((total_seats as f64 / hint.unwrap_or(1) as f64).sqrt().ceil() as usize)
                .max(1);
            (rows, total_seats.div_ceil(rows).max(1))
        }
    };

    // Spacing spans the bounds minus the margins exactly.
    let usable_w = (bounds.width() - 2.0 * spacing.margin_side).max(1.0);
    let usable_h = (bounds.height() - spacing.margin_top - spacing.margin_bottom).max(1.0);
    let dx = usable_w / seats_per_row.saturating_sub(1).max(1) as f64 * spacing.seat_spacing;
    let dy = usable_h / rows.saturating_sub(1).max(1) as f64 * spacing.row_spacing;
    let origin_x = bounds.min.x + spacing.margin_side;
    let origin_y = bounds.min.y + spacing.margin_top;

    let grid_size = rows * seats_per_row;
    let mut places = Vec::with_capacity(count);
    let mut skip = seat_offset;
    let mut cell = 0usize;

    while places.len() < count && cell < grid_size {
        let row = cell / seats_per_row;
        let col = cell % seats_per_row;
        cell += 1;

        let x = origin_x + col as f64 * dx;
        let y = origin_y + row as f64 * dy;
        if section.is_obstructed(x, y) {
            continue; // cell skipped, identifier not consumed
        }
        if skip > 0 {
            skip -= 1;
            continue;
        }

        places.push(Place {
            place_id: ids[places.len()].clone(),
            x,
            y,
            row: format!("R{}", row + 1),
            seat: (col + 1).to_string(),
            section: section.name.clone(),
            zone: section.price_tier.clone(),
            in_bounds: true,
        });
    }

    if places.len() < count {
        output.warn(GeometryWarning::UnderCapacity {
            section: section.name.clone(),
            placed: places.len(),
            expected: count,
        });
    }

    places
}

/// Variable rows from the section's row configuration.
fn place_row_config(
    section: &Section,
    bounds: Rect,
    ids: &[PlaceId],
    seat_offset: usize,
    output: &mut LayoutOutput,
) -> Vec<Place> {
    let spacing = &section.spacing;
    let rows = &section.row_config;
    let poly = match &section.shape {
        SectionShape::Polygon(poly) => Some(poly),
        SectionShape::Rect(_) => None,
    };

    // Spacing is fixed once per section, from the widest row, so seats in
    // different rows stay vertically aligned.
    let max_units = rows.iter().map(RowSpec::units).max().unwrap_or(1).max(1) as usize;
    let usable_w = (bounds.width() - 2.0 * spacing.margin_side).max(1.0);
    let seat_dx = usable_w / max_units.saturating_sub(1).max(1) as f64 * spacing.seat_spacing;

    let base_ys = row_baselines(rows, bounds, spacing);
    let top_limit = bounds.min.y + spacing.margin_top;
    let centroid_x = section
        .shape
        .centroid()
        .map_or_else(|| bounds.center().x, |c| c.x);

    let mut places = Vec::with_capacity(ids.len().min(rows.iter().map(|r| r.seats as usize).sum()));
    let mut skip = seat_offset;
    let mut consumed = 0usize;

    for (row_index, row) in rows.iter().enumerate() {
        let base_y = base_ys[row_index];

        let span = match poly {
            Some(poly) => match span_at_y(base_y, &poly.outer) {
                Some(span) => span,
                None => {
                    // The row's whole allocation is lost; surfaced so the
                    // caller can decide rather than silently clamping.
                    output.warn(GeometryWarning::RowOutsidePolygon {
                        section: section.name.clone(),
                        row: row.row,
                    });
                    continue;
                }
            },
            None => (
                bounds.min.x + spacing.margin_side,
                bounds.max.x - spacing.margin_side,
            ),
        };

        let units = (row.units() as usize).max(1);
        let row_width = (units - 1) as f64 * seat_dx;
        let start_x = match section.style {
            // Each row's own width centered on the row span.
            PresentationStyle::Flat => (span.0 + span.1) / 2.0 - row_width / 2.0,
            // Shared spacing centered on the section centroid: narrower
            // rows taper into a fan.
            PresentationStyle::Cone => centroid_x - row_width / 2.0,
            PresentationStyle::LeftFixed => span.0,
            PresentationStyle::RightFixed => span.1 - row_width,
        } + row.offset_x;
        let row_center_x = start_x + row_width / 2.0;
        let half_width = (row_width / 2.0).max(1.0);

        // Scan grid slots until the row's seat count is fulfilled. Blocked
        // or obstructed slots are passed over without consuming an
        // identifier; the scan keeps going, so the exact count wins even
        // when that lands seats outside the shape.
        let target = row.seats as usize;
        let scan_limit = row.aisle_left as usize + units + SCAN_SLACK;
        let mut row_places: Vec<Place> = Vec::with_capacity(target);
        let mut skipped_here = 0usize;
        let mut slot = row.aisle_left as usize;

        while skipped_here + row_places.len() < target && slot < scan_limit {
            let current = slot;
            slot += 1;

            let x = start_x + current as f64 * seat_dx;
            let mut y = base_y;
            if section.style == PresentationStyle::Cone {
                let normalized = (x - row_center_x).abs() / half_width;
                let mut offset =
                    -spacing.curve_depth * spacing.curve_direction * normalized * normalized;
                // Edge seats never cross the top margin.
                if offset < 0.0 && base_y + offset < top_limit {
                    offset = (top_limit - base_y).min(0.0);
                }
                y += offset;
            }

            if row.blocked.contains(&(current as u32)) {
                continue;
            }
            if section.is_obstructed(x, y) {
                continue;
            }
            if skip > 0 {
                skip -= 1;
                skipped_here += 1;
                continue;
            }
            if consumed >= ids.len() {
                break;
            }

            row_places.push(Place {
                place_id: ids[consumed].clone(),
                x,
                y,
                row: row.row.to_string(),
                seat: String::new(),
                section: section.name.clone(),
                zone: section.price_tier.clone(),
                in_bounds: true,
            });
            consumed += 1;
        }

        let placed = row_places.len();
        let expected = target - skipped_here;
        if placed < expected {
            if consumed >= ids.len() {
                output.warn(GeometryWarning::IdentifiersExhausted {
                    section: section.name.clone(),
                    row: row.row,
                    placed,
                    expected,
                });
            } else {
                output.warn(GeometryWarning::UnderCapacity {
                    section: section.name.clone(),
                    placed,
                    expected,
                });
            }
        }

        // Continuous numbering from the row's start seat: sort by X,
        // reversed first when the section numbers right-to-left.
        row_places.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        if section.numbering == NumberingDirection::RightToLeft {
            row_places.reverse();
        }
        let start = row.start_seat + skipped_here as u32;
        for (k, place) in row_places.iter_mut().enumerate() {
            place.seat = (start + k as u32).to_string();
        }

        places.extend(row_places);
    }

    places
}

/// Baseline Y for every configured row.
///
/// If any row declares a vertical offset, all rows chain: each baseline is
/// the previous one plus the row's own offset (the first hangs off the top
/// padding). Otherwise rows share a uniform pitch computed from the
/// available height, still honoring the additive fine-tune.
fn row_baselines(rows: &[RowSpec], bounds: Rect, spacing: &SpacingConfig) -> Vec<f64> {
    let top = bounds.min.y + spacing.margin_top;
    let mut baselines = Vec::with_capacity(rows.len());

    if rows.iter().any(|r| r.offset_y != 0.0) {
        let mut y = top;
        for row in rows {
            y += row.offset_y;
            baselines.push(y);
        }
    } else {
        let usable_h = (bounds.height() - spacing.margin_top - spacing.margin_bottom).max(1.0);
        let pitch = usable_h / rows.len() as f64 * spacing.row_spacing;
        for (i, row) in rows.iter().enumerate() {
            baselines.push(top + i as f64 * pitch + row.offset_y);
        }
    }

    baselines
}

/// Whole-section rotation about the shape centroid, applied last.
fn apply_rotation(section: &Section, places: &mut [Place]) {
    let degrees = match section.spacing.rotation {
        Rotation::None => return,
        Rotation::Degrees(degrees) => degrees,
        Rotation::Auto => match &section.shape {
            SectionShape::Polygon(poly) => estimate_rotation_degrees(poly),
            // Axis-aligned rectangles carry no slope to estimate.
            SectionShape::Rect(_) => return,
        },
    };
    if degrees.abs() < f64::EPSILON {
        return;
    }
    let Some(pivot) = section.shape.centroid() else {
        return;
    };

    let radians = degrees.to_radians();
    for place in places {
        let rotated = Point::new(place.x, place.y).rotated_about(pivot, radians);
        place.x = rotated.x;
        place.y = rotated.y;
    }
}

/// Estimate a section's lean from the slopes of its leftmost and
/// rightmost non-horizontal edges, measured from vertical.
fn estimate_rotation_degrees(poly: &Polygon) -> f64 {
    let n = poly.outer.len();
    if n < 3 {
        return 0.0;
    }

    let mut left: Option<(f64, f64)> = None; // (edge midpoint x, angle)
    let mut right: Option<(f64, f64)> = None;

    for i in 0..n {
        let a = poly.outer[i];
        let b = poly.outer[(i + 1) % n];
        let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
        let dy = hi.y - lo.y;
        if dy.abs() < 1e-9 {
            continue; // horizontal edges carry no slope signal
        }
        let angle = (hi.x - lo.x).atan2(dy);
        let mid_x = (a.x + b.x) / 2.0;
        if left.is_none_or(|(x, _)| mid_x < x) {
            left = Some((mid_x, angle));
        }
        if right.is_none_or(|(x, _)| mid_x > x) {
            right = Some((mid_x, angle));
        }
    }

    match (left, right) {
        (Some((_, left_angle)), Some((_, right_angle))) => {
            ((left_angle + right_angle) / 2.0).to_degrees()
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::{generate_ids, IdentifierConfig};
    use crate::section::Obstruction;
    use std::collections::HashSet;

    fn ids(count: usize) -> Vec<PlaceId> {
        generate_ids(&IdentifierConfig::default(), count).unwrap()
    }

    fn rect_section(name: &str, width: f64, height: f64) -> Section {
        Section::rect(
            name,
            Rect::new(Point::new(0.0, 0.0), Point::new(width, height)),
        )
    }

    fn triangle_section(name: &str) -> Section {
        // Apex at the top, wide base at the bottom.
        Section::polygon(
            name,
            Polygon::new(vec![
                Point::new(100.0, 0.0),
                Point::new(200.0, 150.0),
                Point::new(0.0, 150.0),
            ]),
        )
    }

    #[test]
    fn no_sections_is_fatal() {
        let layout = ManualLayout { sections: vec![] };
        let err = generate_manual_layout(&layout, &ids(10)).unwrap_err();
        assert!(matches!(err, EngineError::NoSections));
    }

    #[test]
    fn row_config_places_exact_capacity() {
        let mut section = rect_section("Orchestra", 200.0, 100.0);
        section.row_config = vec![
            RowSpec::new(1, 12),
            RowSpec::new(2, 10),
            RowSpec::new(3, 8),
        ];
        let layout = ManualLayout {
            sections: vec![section],
        };
        let supplied = ids(40);
        let output = generate_manual_layout(&layout, &supplied).unwrap();
        assert_eq!(output.places.len(), 30, "rowConfig sum is exact");
        assert!(output.warnings.is_empty(), "warnings: {:?}", output.warnings);

        let unique: HashSet<&str> = output.places.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(unique.len(), 30, "every place gets a distinct identifier");
        let supplied_set: HashSet<&str> = supplied.iter().map(|id| id.as_str()).collect();
        assert!(unique.is_subset(&supplied_set), "ids drawn from the input list");
    }

    #[test]
    fn triangle_cone_scenario() {
        // Three rows of 10/8/6 in a triangular section with cone
        // presentation must place exactly 24 seats, and the curve must
        // push edge seats of rows 2 and 3 toward negative Y.
        let mut section = triangle_section("Fan");
        section.style = PresentationStyle::Cone;
        section.row_config = vec![
            RowSpec::new(1, 10),
            RowSpec::new(2, 8),
            RowSpec::new(3, 6),
        ];
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(24)).unwrap();
        assert_eq!(output.places.len(), 24, "exact capacity: {:?}", output.warnings);

        for row_label in ["2", "3"] {
            let row: Vec<_> = output
                .places
                .iter()
                .filter(|p| p.row == row_label)
                .collect();
            let center_y = row
                .iter()
                .map(|p| p.y)
                .fold(f64::NEG_INFINITY, f64::max);
            let edge = row
                .iter()
                .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap())
                .unwrap();
            assert!(
                edge.y < center_y,
                "row {row_label}: edge seat (y={}) should curve toward the stage vs center (y={})",
                edge.y,
                center_y
            );
        }
    }

    #[test]
    fn obstruction_scenario_uniform() {
        // 5x5 uniform grid with the 3rd row fully obstructed: at most 20
        // seats, none inside the obstruction.
        let mut section = rect_section("Floor", 100.0, 100.0);
        section.rows = Some(5);
        section.seats_per_row = Some(5);
        section.capacity = Some(25);
        // Row 3 sits at y = 10 + 2 * (80/4) = 50.
        let blocker = Rect::new(Point::new(0.0, 45.0), Point::new(100.0, 55.0));
        section.obstructions.push(Obstruction {
            name: Some("walkway".into()),
            shape: SectionShape::Rect(blocker),
        });
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(25)).unwrap();
        assert!(
            output.places.len() <= 20,
            "at most 20 seats, got {}",
            output.places.len()
        );
        for place in &output.places {
            assert!(
                !blocker.contains(place.x, place.y),
                "seat {} at ({}, {}) is inside the obstruction",
                place.place_id,
                place.x,
                place.y
            );
        }
        assert!(
            output
                .warnings
                .iter()
                .any(|w| matches!(w, GeometryWarning::UnderCapacity { .. })),
            "undershoot must be surfaced: {:?}",
            output.warnings
        );
    }

    #[test]
    fn row_config_keeps_exact_count_despite_obstruction() {
        // On the rowConfig path the scan continues past obstructed slots,
        // so the count still lands exactly.
        let mut section = rect_section("Orchestra", 200.0, 100.0);
        section.row_config = vec![RowSpec::new(1, 10)];
        // Blocks the left half of the row's baseline.
        section.obstructions.push(Obstruction {
            name: None,
            shape: SectionShape::Rect(Rect::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))),
        });
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(10)).unwrap();
        assert_eq!(output.places.len(), 10, "exact count wins over obstruction");
        for place in &output.places {
            assert!(place.x > 100.0, "seat escaped to the unobstructed side");
        }
    }

    #[test]
    fn out_of_bounds_seats_are_flagged() {
        // A row wider than its narrow polygon span: seats keep their fixed
        // spacing and spill out, flagged via in_bounds.
        let mut section = triangle_section("Fan");
        section.style = PresentationStyle::Cone;
        section.row_config = vec![RowSpec::new(1, 30)];
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(30)).unwrap();
        assert_eq!(output.places.len(), 30);
        assert!(
            output.places.iter().any(|p| !p.in_bounds),
            "a 30-seat row cannot fit the triangle apex in bounds"
        );
    }

    #[test]
    fn row_outside_polygon_is_skipped_with_warning() {
        let mut section = triangle_section("Fan");
        // Chain offsets so row 2 lands far below the polygon.
        section.row_config = vec![RowSpec::new(1, 4), RowSpec::new(2, 4)];
        section.row_config[0].offset_y = 20.0;
        section.row_config[1].offset_y = 500.0;
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(8)).unwrap();
        assert_eq!(
            output.places.len(),
            4,
            "row 2 is dropped whole, not clamped"
        );
        assert!(
            output
                .warnings
                .iter()
                .any(|w| matches!(w, GeometryWarning::RowOutsidePolygon { row: 2, .. })),
            "warnings: {:?}",
            output.warnings
        );
    }

    #[test]
    fn blocked_slots_shift_seats_right() {
        let mut section = rect_section("A", 200.0, 100.0);
        let mut row = RowSpec::new(1, 4);
        row.blocked = vec![0, 1];
        section.row_config = vec![row];
        let layout = ManualLayout {
            sections: vec![section.clone()],
        };
        let output = generate_manual_layout(&layout, &ids(4)).unwrap();
        assert_eq!(output.places.len(), 4);

        // Compare with the unblocked version: everything shifts by two
        // slots of the same fixed spacing.
        section.row_config[0].blocked.clear();
        let unblocked = generate_manual_layout(
            &ManualLayout {
                sections: vec![section],
            },
            &ids(4),
        )
        .unwrap();
        let shift = output.places[0].x - unblocked.places[0].x;
        assert!(shift > 0.0, "blocked slots must push seats right");
    }

    #[test]
    fn right_to_left_numbering_reverses() {
        let mut section = rect_section("A", 200.0, 100.0);
        section.row_config = vec![RowSpec::new(1, 3)];
        section.numbering = NumberingDirection::RightToLeft;
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(3)).unwrap();
        let mut sorted = output.places.clone();
        sorted.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        let labels: Vec<&str> = sorted.iter().map(|p| p.seat.as_str()).collect();
        assert_eq!(labels, vec!["3", "2", "1"], "numbers run right to left");
    }

    #[test]
    fn start_seat_offsets_numbering() {
        let mut section = rect_section("A", 200.0, 100.0);
        let mut row = RowSpec::new(7, 3);
        row.start_seat = 101;
        section.row_config = vec![row];
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(3)).unwrap();
        let seats: Vec<&str> = output.places.iter().map(|p| p.seat.as_str()).collect();
        assert_eq!(seats, vec!["101", "102", "103"]);
        assert!(output.places.iter().all(|p| p.row == "7"));
    }

    #[test]
    fn identifier_exhaustion_truncates_with_warning() {
        let mut section = rect_section("A", 200.0, 100.0);
        section.row_config = vec![RowSpec::new(1, 10), RowSpec::new(2, 10)];
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(13)).unwrap();
        assert_eq!(output.places.len(), 13);
        assert!(
            output
                .warnings
                .iter()
                .any(|w| matches!(
                    w,
                    GeometryWarning::IdentifiersExhausted { row: 2, placed: 3, expected: 10, .. }
                )),
            "warnings: {:?}",
            output.warnings
        );
    }

    #[test]
    fn proportional_distribution_and_leftovers() {
        let mut a = rect_section("A", 100.0, 100.0);
        a.capacity = Some(30);
        let mut b = rect_section("B", 100.0, 100.0);
        b.capacity = Some(10);
        let layout = ManualLayout {
            sections: vec![a, b],
        };
        let output = generate_manual_layout(&layout, &ids(40)).unwrap();
        assert_eq!(output.places.len(), 40, "warnings: {:?}", output.warnings);

        let in_a = output.places.iter().filter(|p| p.section == "A").count();
        let in_b = output.places.iter().filter(|p| p.section == "B").count();
        assert_eq!(in_a, 30, "A gets floor(30/40 * 40)");
        assert_eq!(in_b, 10, "B gets its share plus any leftovers");
    }

    #[test]
    fn rotation_moves_seats_about_centroid() {
        let mut section = rect_section("A", 100.0, 100.0);
        section.row_config = vec![RowSpec::new(1, 2)];
        let layout_flat = ManualLayout {
            sections: vec![section.clone()],
        };
        let flat = generate_manual_layout(&layout_flat, &ids(2)).unwrap();

        section.spacing.rotation = Rotation::Degrees(90.0);
        let rotated = generate_manual_layout(
            &ManualLayout {
                sections: vec![section],
            },
            &ids(2),
        )
        .unwrap();

        let pivot = Point::new(50.0, 50.0);
        for (a, b) in flat.places.iter().zip(rotated.places.iter()) {
            let before = pivot.distance(Point::new(a.x, a.y));
            let after = pivot.distance(Point::new(b.x, b.y));
            assert!(
                (before - after).abs() < 1e-9,
                "rotation preserves distance to the centroid"
            );
            assert!(
                (a.x - b.x).abs() > 1e-6 || (a.y - b.y).abs() > 1e-6,
                "rotation should move the seat"
            );
        }
    }

    #[test]
    fn auto_rotation_estimates_parallelogram_lean() {
        let lean = Polygon::new(vec![
            Point::new(20.0, 0.0),
            Point::new(120.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]);
        let degrees = estimate_rotation_degrees(&lean);
        // Both side edges lean the same way by atan(20/100).
        let expected = (-20.0f64).atan2(100.0).to_degrees();
        assert!(
            (degrees - expected).abs() < 1e-6,
            "expected {expected}, got {degrees}"
        );
    }

    #[test]
    fn degenerate_polygon_contributes_nothing() {
        let section = Section::polygon(
            "Broken",
            Polygon::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
        );
        let mut good = rect_section("Good", 100.0, 100.0);
        good.capacity = Some(4);
        let layout = ManualLayout {
            sections: vec![section, good],
        };
        let output = generate_manual_layout(&layout, &ids(4)).unwrap();
        assert!(
            output
                .warnings
                .iter()
                .any(|w| matches!(w, GeometryWarning::DegenerateSection { .. })),
            "warnings: {:?}",
            output.warnings
        );
        assert!(output.places.iter().all(|p| p.section == "Good"));
    }

    #[test]
    fn flat_rows_center_individually() {
        let mut section = rect_section("A", 220.0, 100.0);
        section.row_config = vec![RowSpec::new(1, 10), RowSpec::new(2, 4)];
        let layout = ManualLayout {
            sections: vec![section],
        };
        let output = generate_manual_layout(&layout, &ids(14)).unwrap();

        let mean_x = |row: &str| {
            let xs: Vec<f64> = output
                .places
                .iter()
                .filter(|p| p.row == row)
                .map(|p| p.x)
                .collect();
            xs.iter().sum::<f64>() / xs.len() as f64
        };
        assert!(
            (mean_x("1") - mean_x("2")).abs() < 1e-9,
            "flat rows share a horizontal center"
        );
    }
}
