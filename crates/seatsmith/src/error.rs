//! Error and warning taxonomy for the generation engine.
//!
//! Two tiers: [`EngineError`] aborts a generation call, [`GeometryWarning`]
//! is accumulated on the result so the caller can decide whether a partial
//! manifest is acceptable.

use thiserror::Error;

/// Unified result type for the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Fatal errors: generation stops and nothing is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no sections configured")]
    NoSections,
    #[error("resolved capacity is zero but the layout requires seats")]
    ZeroCapacity,
    #[error("manifest requires at least one place identifier")]
    EmptyManifest,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Non-fatal geometry defects.
///
/// The affected row or section is skipped or truncated; generation carries
/// on and the warning is attached to the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryWarning {
    #[error("section `{section}`: row {row} lies outside the polygon's vertical range")]
    RowOutsidePolygon { section: String, row: u32 },
    #[error("section `{section}`: placed {placed} of {expected} seats")]
    UnderCapacity {
        section: String,
        placed: usize,
        expected: usize,
    },
    #[error("section `{section}`: identifiers exhausted at row {row}, {placed} of {expected} placed")]
    IdentifiersExhausted {
        section: String,
        row: u32,
        placed: usize,
        expected: usize,
    },
    #[error("section `{section}`: polygon needs at least 3 vertices")]
    DegenerateSection { section: String },
    #[error("{dropped} seats dropped beyond the configured {total_rows} rows")]
    SeatsDropped { dropped: usize, total_rows: u32 },
}

/// Errors from the floor-plan import path.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),
    #[error("no sections found in SVG")]
    NoSections,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_render_with_context() {
        let w = GeometryWarning::RowOutsidePolygon {
            section: "Balcony".into(),
            row: 4,
        };
        let msg = w.to_string();
        assert!(msg.contains("Balcony"), "message should name the section: {msg}");
        assert!(msg.contains('4'), "message should name the row: {msg}");
    }

    #[test]
    fn engine_errors_display() {
        assert_eq!(EngineError::NoSections.to_string(), "no sections configured");
        let e = EngineError::InvalidInput("seatsPerRow must be positive".into());
        assert!(e.to_string().contains("seatsPerRow"));
    }
}
