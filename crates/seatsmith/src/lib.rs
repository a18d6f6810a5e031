//! # seatsmith
//!
//! Deterministic venue seat-manifest generation: section geometry plus a
//! seat-count request in, positioned places and a content-addressed,
//! diffable manifest out.
//!
//! The engine is a pure, synchronous transformation. It holds no state
//! between calls, performs no I/O, and never introduces randomness, so it
//! is safe to drive from any number of threads without locking. It does
//! not persist anything and it knows nothing about money.

pub mod clip;
pub mod error;
pub mod generate;
pub mod geometry;
pub mod ident;
pub mod layout;
pub mod manifest;
pub mod place;
pub mod section;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use error::{EngineError, GeometryWarning, Result, SvgError};
pub use generate::{generate, GenerationOutcome, GenerationRequest, IdentifierSource};
pub use geometry::{Point, Polygon, Rect};
pub use ident::{generate_custom_ids, generate_ids, IdPattern, IdentifierConfig};
pub use layout::{
    generate_admission_zones, generate_grid_layout, generate_manual_layout,
    generate_radial_layout, AdmissionLayout, GridLayout, LayoutOutput, LayoutStrategy,
    ManualLayout, RadialLayout, SectionNaming, Zone, ZoneSpec,
};
pub use manifest::{
    compare_manifests, content_hash, generate_manifest, normalize_manifest_data, Manifest,
    ManifestDiff, NormalizedPlace,
};
pub use place::{
    group_places_by_section, normalize_coordinates, parse_place_id, ParsedPlaceId, Place,
    PlaceId, SectionBucket,
};
pub use section::{
    NumberingDirection, Obstruction, PresentationStyle, Rotation, RowSpec, Section,
    SectionShape, SpacingConfig,
};
pub use svg::extract_sections_from_svg;
