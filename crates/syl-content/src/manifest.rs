//! The course manifest: identity and display metadata for one package.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ContentError;

/// File name of the manifest at a course root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Decoded manifest fields the catalog cares about.
///
/// Other manifest properties (`description`, `modules`, ...) stay on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl Manifest {
    /// Title for the catalog; falls back to the course id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Build from an already schema-checked document.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::ManifestDecode` if `id` or `version` is not a string.
    pub fn from_document(document: &Value) -> Result<Self, ContentError> {
        Self::deserialize(document).map_err(ContentError::ManifestDecode)
    }

    /// Build from a resident document, filling `id` and `version` from the
    /// course and version directory names when the document lacks them or
    /// holds a non-string value.
    #[must_use]
    pub fn resident(document: &Map<String, Value>, course_dir: &str, version_dir: &str) -> Self {
        let text = |key: &str| document.get(key).and_then(Value::as_str).map(String::from);
        Self {
            id: text("id").unwrap_or_else(|| course_dir.to_string()),
            version: text("version").unwrap_or_else(|| version_dir.to_string()),
            title: text("title"),
        }
    }
}

/// Fill `id` and `version` from directory names if absent.
pub(crate) fn set_default_identity(
    document: &mut Map<String, Value>,
    course_dir: &str,
    version_dir: &str,
) {
    document
        .entry("id")
        .or_insert_with(|| Value::String(course_dir.to_string()));
    document
        .entry("version")
        .or_insert_with(|| Value::String(version_dir.to_string()));
}

/// Read and decode `<root>/manifest.json`.
///
/// # Errors
///
/// `ManifestMissing` if the file does not exist, `ManifestDecode` if it is
/// not JSON, `Io` if it cannot be read.
pub fn read_manifest_document(root: &Path) -> Result<Value, ContentError> {
    let path = root.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(ContentError::ManifestMissing);
    }
    let bytes = std::fs::read(&path).map_err(ContentError::io(&path))?;
    serde_json::from_slice(&bytes).map_err(ContentError::ManifestDecode)
}

/// A course id or version must be a single, non-hidden path segment.
#[must_use]
pub fn is_safe_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
