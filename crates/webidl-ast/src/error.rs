//! Errors raised while loading parser output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading IDL definitions.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The top-level value is not an array of definitions.
    #[error("expected a JSON array of definitions, found {0}")]
    NotAnArray(&'static str),

    /// A recognized definition or member is missing required fields.
    #[error("malformed `{kind}`: {source}")]
    Malformed {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
