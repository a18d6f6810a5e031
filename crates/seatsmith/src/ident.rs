//! Place identifier generation.
//!
//! Identifiers are opaque strings; the patterns here only guarantee
//! uniqueness by construction. A manifest never inspects them again except
//! through the best-effort parser in [`crate::place`].

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::place::PlaceId;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier generation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierConfig {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub pattern: IdPattern,
}

/// Built-in identifier patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdPattern {
    /// `prefix + base36(index)`, zero-padded to width 2.
    #[default]
    Sequential,
    /// Encodes `(section, row, seat)` triples. When the configured grid is
    /// smaller than the requested count the section index keeps growing
    /// instead of wrapping, so collisions are impossible.
    #[serde(rename_all = "camelCase")]
    Grid {
        sections: u32,
        rows_per_section: u32,
        seats_per_row: u32,
    },
}

/// Encode a value in base36, zero-padded to at least `min_width` digits.
fn base36(mut value: u64, min_width: usize) -> String {
    let mut digits = Vec::with_capacity(min_width);
    loop {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    while digits.len() < min_width {
        digits.push(b'0');
    }
    digits.reverse();
    // Base36 digits are always ASCII.
    String::from_utf8_lossy(&digits).into_owned()
}

/// Digits needed to encode `max_value` in base36.
fn base36_width(max_value: u64) -> usize {
    let mut width = 1;
    let mut v = max_value;
    while v >= 36 {
        v /= 36;
        width += 1;
    }
    width
}

/// Produce exactly `count` unique identifiers for the given config.
///
/// `count = 0` yields an empty list, not an error.
pub fn generate_ids(config: &IdentifierConfig, count: usize) -> Result<Vec<PlaceId>> {
    match config.pattern {
        IdPattern::Sequential => Ok((0..count)
            .map(|i| PlaceId::new(format!("{}{}", config.prefix, base36(i as u64, 2))))
            .collect()),
        IdPattern::Grid {
            sections,
            rows_per_section,
            seats_per_row,
        } => {
            if sections == 0 || rows_per_section == 0 || seats_per_row == 0 {
                return Err(EngineError::InvalidInput(
                    "grid identifier pattern requires positive sections, rows and seats".into(),
                ));
            }

            // Row and seat components get a fixed width derived from the
            // configured grid; the section component is variable-width but
            // leads the string, so every triple decodes unambiguously and
            // the index-to-id mapping is a bijection.
            let row_width = base36_width(u64::from(rows_per_section - 1)).max(2);
            let seat_width = base36_width(u64::from(seats_per_row - 1)).max(2);
            let seats_per_row = u64::from(seats_per_row);
            let rows_per_section = u64::from(rows_per_section);

            Ok((0..count as u64)
                .map(|i| {
                    let seat = i % seats_per_row;
                    let row = (i / seats_per_row) % rows_per_section;
                    // Grows past `sections` once the initial grid is full.
                    let section = i / (seats_per_row * rows_per_section);
                    PlaceId::new(format!(
                        "{}{}{}{}",
                        config.prefix,
                        base36(section, 1),
                        base36(row, row_width),
                        base36(seat, seat_width),
                    ))
                })
                .collect())
        }
    }
}

/// Produce `count` identifiers by delegating each index to `encode`.
///
/// The engine performs no uniqueness enforcement here beyond position-based
/// invocation; duplicates are the caller's responsibility.
pub fn generate_custom_ids(
    prefix: &str,
    count: usize,
    encode: impl Fn(usize) -> String,
) -> Vec<PlaceId> {
    (0..count)
        .map(|i| PlaceId::new(format!("{}{}", prefix, encode(i))))
        .collect()
}
