//! Arena grid layout - uniform sections of identical rows.
//!
//! Purely positional: identifiers are walked in order and decomposed by
//! integer division into (section, row, seat). No bounds or obstruction
//! checks; arena seating is assumed uniform.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::layout::LayoutOutput;
use crate::place::{Place, PlaceId};

/// Parameters for the arena grid strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridLayout {
    pub sections: u32,
    pub seats_per_row: u32,
    /// Horizontal distance between the origins of adjacent sections.
    pub section_width: f64,
    pub seat_spacing: f64,
    pub row_spacing: f64,
    pub naming: SectionNaming,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            sections: 1,
            seats_per_row: 10,
            section_width: 200.0,
            seat_spacing: 10.0,
            row_spacing: 12.0,
            naming: SectionNaming::Numeric,
        }
    }
}

/// Section naming schemes for generated layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionNaming {
    /// "Section 1", "Section 2", ...
    #[default]
    Numeric,
    /// A, B, ..., Z, AA, AB, ... (spreadsheet style).
    Alphabetic,
    /// A1..A10, B1..B10, ... - the letter advances every ten sections.
    Alphanumeric,
    /// Caller-supplied names, cycled when shorter than the section count.
    Custom(Vec<String>),
}

impl SectionNaming {
    /// Name for the section at `index` (0-based).
    pub fn section_name(&self, index: usize) -> Result<String> {
        match self {
            SectionNaming::Numeric => Ok(format!("Section {}", index + 1)),
            SectionNaming::Alphabetic => Ok(alpha_label(index)),
            SectionNaming::Alphanumeric => {
                Ok(format!("{}{}", alpha_label(index / 10), index % 10 + 1))
            }
            SectionNaming::Custom(names) => {
                if names.is_empty() {
                    return Err(EngineError::InvalidInput(
                        "custom section naming requires at least one name".into(),
                    ));
                }
                Ok(names[index % names.len()].clone())
            }
        }
    }
}

/// Spreadsheet-style label: A..Z, AA, AB, ... (bijective base 26).
pub fn alpha_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Walk the identifier list into a uniform grid of sections.
pub fn generate_grid_layout(layout: &GridLayout, ids: &[PlaceId]) -> Result<LayoutOutput> {
    if layout.sections == 0 || layout.seats_per_row == 0 {
        return Err(EngineError::InvalidInput(
            "grid layout requires positive sections and seatsPerRow".into(),
        ));
    }

    let total = ids.len();
    let mut output = LayoutOutput::default();
    if total == 0 {
        return Ok(output);
    }

    let per_section_target = total as f64 / f64::from(layout.sections);
    let rows_per_section =
        (per_section_target / f64::from(layout.seats_per_row)).ceil().max(1.0) as usize;
    let seats_per_row = layout.seats_per_row as usize;
    let section_size = rows_per_section * seats_per_row;

    output.places.reserve(total);
    for (i, id) in ids.iter().enumerate() {
        let section_index = i / section_size;
        let within = i % section_size;
        let row = within / seats_per_row;
        let seat_in_row = within % seats_per_row;

        output.places.push(Place {
            place_id: id.clone(),
            x: section_index as f64 * layout.section_width
                + seat_in_row as f64 * layout.seat_spacing,
            y: row as f64 * layout.row_spacing,
            row: format!("R{}", row + 1),
            seat: (seat_in_row + 1).to_string(),
            section: layout.naming.section_name(section_index)?,
            zone: None,
            in_bounds: true,
        });
    }

    Ok(output)
}
