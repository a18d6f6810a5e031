//! Venue section model: geometry, row configuration, presentation.
//!
//! Sections are supplied by the caller (venue configuration owns them);
//! the engine never mutates one. Bounds are advisory for manual sections:
//! the exact-capacity invariant may push seats outside them.

use serde::{Deserialize, Serialize};

use crate::clip::point_in_polygon;
use crate::geometry::{Point, Polygon, Rect};

/// The geometric outline of a section or obstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionShape {
    Rect(Rect),
    Polygon(Polygon),
}

impl SectionShape {
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            SectionShape::Rect(rect) => Some(*rect),
            SectionShape::Polygon(poly) => poly.bounding_box(),
        }
    }

    /// Geometric center: rectangle center or polygon centroid.
    pub fn centroid(&self) -> Option<Point> {
        match self {
            SectionShape::Rect(rect) => Some(rect.center()),
            SectionShape::Polygon(poly) => poly.centroid(),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            SectionShape::Rect(rect) => rect.contains(x, y),
            SectionShape::Polygon(poly) => point_in_polygon(x, y, &poly.outer),
        }
    }
}

/// Horizontal alignment and curve strategy for a section's rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresentationStyle {
    /// Each row's own width centered on the row span.
    #[default]
    Flat,
    /// Rows share one spacing and center on the section centroid, so
    /// narrower rows taper into a fan; a parabolic curve pushes edge seats
    /// toward the stage.
    Cone,
    /// Rows left-aligned to the row span.
    LeftFixed,
    /// Rows right-aligned to the row span.
    RightFixed,
}

impl PresentationStyle {
    pub fn name(&self) -> &'static str {
        match self {
            PresentationStyle::Flat => "flat",
            PresentationStyle::Cone => "cone",
            PresentationStyle::LeftFixed => "leftFixed",
            PresentationStyle::RightFixed => "rightFixed",
        }
    }

    /// Parse a style from a string, tolerating kebab/snake separators.
    pub fn from_name(name: &str) -> Option<PresentationStyle> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "flat" => Some(PresentationStyle::Flat),
            "cone" | "curve" | "fan" => Some(PresentationStyle::Cone),
            "leftfixed" => Some(PresentationStyle::LeftFixed),
            "rightfixed" => Some(PresentationStyle::RightFixed),
            _ => None,
        }
    }
}

/// Seat numbering direction within a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Whole-section rotation applied after placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rotation {
    #[default]
    None,
    Degrees(f64),
    /// Estimate the angle from the polygon's left/right edge slopes.
    Auto,
}

/// Tunable spacing multipliers and paddings.
///
/// All values have documented defaults so config files only state what
/// they change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingConfig {
    /// Multiplier on the computed per-seat spacing. Default 1.0.
    pub seat_spacing: f64,
    /// Multiplier on the computed row pitch. Default 1.0.
    pub row_spacing: f64,
    /// Depth of the cone curve at a row's edge seats. Default 8.0.
    pub curve_depth: f64,
    /// 1.0 curves toward the stage (frown); negative inverts (smile).
    pub curve_direction: f64,
    /// Whole-section rotation. Default none.
    pub rotation: Rotation,
    /// Padding between the top bound and the first row. Default 10.0.
    pub margin_top: f64,
    /// Padding below the last row. Default 10.0.
    pub margin_bottom: f64,
    /// Horizontal padding inside the bounds. Default 10.0.
    pub margin_side: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            seat_spacing: 1.0,
            row_spacing: 1.0,
            curve_depth: 8.0,
            curve_direction: 1.0,
            rotation: Rotation::None,
            margin_top: 10.0,
            margin_bottom: 10.0,
            margin_side: 10.0,
        }
    }
}

fn default_start_seat() -> u32 {
    1
}

/// Per-row descriptor for non-uniform sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpec {
    /// Row number used as the display label.
    pub row: u32,
    pub seats: u32,
    /// First seat number assigned in this row. Default 1.
    #[serde(default = "default_start_seat")]
    pub start_seat: u32,
    /// Empty grid slots before the first seat.
    #[serde(default)]
    pub aisle_left: u32,
    /// Empty grid slots after the last seat.
    #[serde(default)]
    pub aisle_right: u32,
    /// Horizontal fine-tune applied to the whole row.
    #[serde(default)]
    pub offset_x: f64,
    /// Vertical fine-tune; any non-zero value in a section switches all of
    /// its rows to offset-chaining.
    #[serde(default)]
    pub offset_y: f64,
    /// Blocked grid slots local to this row (0-based, counted across
    /// aisles and seats alike).
    #[serde(default)]
    pub blocked: Vec<u32>,
}

impl RowSpec {
    pub fn new(row: u32, seats: u32) -> Self {
        Self {
            row,
            seats,
            start_seat: 1,
            aisle_left: 0,
            aisle_right: 0,
            offset_x: 0.0,
            offset_y: 0.0,
            blocked: Vec::new(),
        }
    }

    /// Grid slots this row occupies: seats plus both aisles.
    #[inline]
    pub fn units(&self) -> u32 {
        self.seats + self.aisle_left + self.aisle_right
    }
}

/// A sub-region inside which no seat may be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstruction {
    #[serde(default)]
    pub name: Option<String>,
    pub shape: SectionShape,
}

impl Obstruction {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.shape.contains(x, y)
    }
}

/// A named geometric region of the venue containing rows of seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: String,
    pub shape: SectionShape,
    /// Uniform fallback row count, used when `row_config` is empty.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Uniform fallback seats per row.
    #[serde(default)]
    pub seats_per_row: Option<u32>,
    /// Explicit capacity override for the uniform path.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Ordered per-row descriptors; when present they define the section's
    /// capacity exactly.
    #[serde(default)]
    pub row_config: Vec<RowSpec>,
    #[serde(default)]
    pub obstructions: Vec<Obstruction>,
    #[serde(default)]
    pub style: PresentationStyle,
    #[serde(default)]
    pub numbering: NumberingDirection,
    #[serde(default)]
    pub spacing: SpacingConfig,
    /// Opaque tag copied onto produced places as `zone`.
    #[serde(default)]
    pub price_tier: Option<String>,
}

impl Section {
    /// Minimal constructor for the common rectangle case.
    pub fn rect(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            shape: SectionShape::Rect(bounds),
            rows: None,
            seats_per_row: None,
            capacity: None,
            row_config: Vec::new(),
            obstructions: Vec::new(),
            style: PresentationStyle::default(),
            numbering: NumberingDirection::default(),
            spacing: SpacingConfig::default(),
            price_tier: None,
        }
    }

    /// Minimal constructor for a polygon section.
    pub fn polygon(name: impl Into<String>, outline: Polygon) -> Self {
        Self {
            shape: SectionShape::Polygon(outline),
            ..Self::rect(name, Rect::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0)))
        }
    }

    /// Effective capacity: row-config sum, else explicit capacity, else
    /// `rows × seats_per_row`.
    pub fn effective_capacity(&self) -> u32 {
        if !self.row_config.is_empty() {
            return self.row_config.iter().map(|r| r.seats).sum();
        }
        if let Some(capacity) = self.capacity {
            return capacity;
        }
        self.rows.unwrap_or(0) * self.seats_per_row.unwrap_or(0)
    }

    /// True when any configured obstruction covers the point.
    pub fn is_obstructed(&self, x: f64, y: f64) -> bool {
        self.obstructions.iter().any(|o| o.contains(x, y))
    }
}
