//! Schema registry error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the schema registry.
///
/// All variants describe a broken deployment rather than a bad document:
/// validation failures are returned as data, never as `SchemaError`.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name has no backing source.
    #[error("Schema '{name}' not found{}", location.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    NotFound {
        name: String,
        location: Option<PathBuf>,
    },

    /// The schema file exists but could not be read.
    #[error("Failed to read schema '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema source is not valid JSON.
    #[error("Schema '{name}' is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The schema is valid JSON but not a usable JSON Schema.
    #[error("Schema '{name}' failed to compile: {message}")]
    Compile { name: String, message: String },
}
