//! Content pipeline error types.

use std::path::{Path, PathBuf};

use syl_core::errors::ErrorKind;
use syl_db::error::DatabaseError;
use syl_schema::SchemaError;
use thiserror::Error;

/// Errors from importing, scanning, or managing course content.
///
/// Per-task problems never surface here; they become warnings on the
/// `ImportSummary`.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The normalized archive root has no `manifest.json`.
    #[error("manifest.json not found")]
    ManifestMissing,

    /// `manifest.json` exists but is not a decodable JSON document.
    #[error("manifest.json could not be decoded: {0}")]
    ManifestDecode(#[source] serde_json::Error),

    /// The upload is not a readable zip archive.
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// The manifest failed schema validation.
    #[error("manifest.json failed validation: {}", errors.join("; "))]
    ManifestInvalid { errors: Vec<String> },

    /// A course id or version cannot be used as a directory name.
    #[error("Invalid course key '{course_id}@{version}'")]
    InvalidCourseKey { course_id: String, version: String },

    /// No catalog entry or content directory for the key.
    #[error("Course '{course_id}@{version}' not found")]
    CourseNotFound { course_id: String, version: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Filesystem failure inside the service.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Self::Io { path, source }
    }

    /// Classify the failure for reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ManifestMissing
            | Self::ManifestDecode(_)
            | Self::InvalidArchive(_)
            | Self::InvalidCourseKey { .. }
            | Self::CourseNotFound { .. } => ErrorKind::Client,
            Self::ManifestInvalid { .. } => ErrorKind::Validation,
            Self::Schema(_) => ErrorKind::Configuration,
            Self::Database(_) | Self::Io { .. } => ErrorKind::Internal,
        }
    }

    /// Manifest validation errors, if this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::ManifestInvalid { errors } => Some(errors),
            _ => None,
        }
    }
}
