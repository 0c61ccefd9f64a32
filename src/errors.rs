//! Error types with rich diagnostics using miette
//!
//! Placement calculations themselves never fail; these errors cover the
//! edges of the engine: parsing symbolic values and loading the placement
//! dataset.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors from parsing symbolic values out of strings
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown grid location: {input:?}")]
    #[diagnostic(
        code(tka::parse::unknown_location),
        help("expected one of n, ne, e, se, s, sw, w, nw")
    )]
    UnknownLocation { input: String },

    #[error("unknown letter: {input:?}")]
    #[diagnostic(code(tka::parse::unknown_letter))]
    UnknownLetter { input: String },

    #[error("unknown grid position: {input:?}")]
    #[diagnostic(
        code(tka::parse::unknown_position),
        help("positions are alpha1-alpha8, beta1-beta8 or gamma1-gamma16")
    )]
    UnknownPosition { input: String },
}

// ============================================================================
// Dataset Errors
// ============================================================================

/// Errors that occur while fetching or decoding the placement dataset
#[derive(Error, Diagnostic, Debug)]
pub enum DatasetError {
    #[error("failed to read placement dataset {path}")]
    #[diagnostic(code(tka::dataset::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid placement dataset: {message}")]
    #[diagnostic(code(tka::dataset::json))]
    Json {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("placement dataset source failed: {message}")]
    #[diagnostic(code(tka::dataset::source))]
    Source { message: String },
}

impl DatasetError {
    /// Wrap a serde_json error, pointing the label at the offending line/column.
    pub fn json(name: &str, source: &str, err: &serde_json::Error) -> Self {
        // serde_json reports 1-based line/column, 0 for errors without a position
        let offset = if err.line() == 0 {
            SourceOffset::from(0)
        } else {
            SourceOffset::from_location(source, err.line(), err.column().max(1))
        };
        DatasetError::Json {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::new(offset, 0),
        }
    }
}
