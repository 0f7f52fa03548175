//! Reconciliation: rebuild catalog rows from what is resident under the
//! content root.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;
use syl_core::responses::ImportSummary;
use syl_core::time::from_epoch_seconds;
use syl_schema::MANIFEST;

use crate::error::ContentError;
use crate::manifest::{MANIFEST_FILE, Manifest, read_manifest_document, set_default_identity};
use crate::service::ContentService;

/// Warning for a version directory without a manifest.
pub const MISSING_MANIFEST_WARNING: &str = "manifest.json missing";

impl ContentService {
    /// Re-index every `<content_root>/<course>/<version>` directory.
    ///
    /// Directories are visited in name order. A directory whose manifest is
    /// missing or unreadable, or a course directory that cannot be listed, is
    /// reported with a placeholder summary and left out of the catalog. Timestamps of known courses are preserved, so
    /// repeated scans converge.
    ///
    /// # Errors
    ///
    /// Returns `Io` only if the content root itself cannot be listed, or the
    /// errors of [`Self::index_course`].
    pub async fn scan_content_root(&self) -> Result<Vec<ImportSummary>, ContentError> {
        let mut results = Vec::new();
        for course_dir in sorted_subdirs(self.content_root())? {
            let versions = match sorted_subdirs(&course_dir) {
                Ok(versions) => versions,
                Err(ContentError::Io { source, .. }) => {
                    let course_name = dir_name(&course_dir);
                    let warning = format!("{course_name}: {source}");
                    results.push(placeholder(&course_dir, &course_name, "", warning));
                    continue;
                }
                Err(other) => return Err(other),
            };
            for version_dir in versions {
                results.push(self.reconcile_version(&course_dir, &version_dir).await?);
            }
        }
        tracing::info!(courses = results.len(), "content root scanned");
        Ok(results)
    }

    async fn reconcile_version(
        &self,
        course_dir: &Path,
        version_dir: &Path,
    ) -> Result<ImportSummary, ContentError> {
        let course_name = dir_name(course_dir);
        let version_name = dir_name(version_dir);

        let mut document = match read_manifest_document(version_dir) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Ok(placeholder(
                    version_dir,
                    &course_name,
                    &version_name,
                    format!("{MANIFEST_FILE}: expected a JSON object"),
                ));
            }
            Err(ContentError::ManifestMissing) => {
                return Ok(placeholder(
                    version_dir,
                    &course_name,
                    &version_name,
                    MISSING_MANIFEST_WARNING.to_string(),
                ));
            }
            Err(ContentError::ManifestDecode(error)) => {
                return Ok(placeholder(
                    version_dir,
                    &course_name,
                    &version_name,
                    format!("{MANIFEST_FILE}: {error}"),
                ));
            }
            Err(ContentError::Io { source, .. }) => {
                return Ok(placeholder(
                    version_dir,
                    &course_name,
                    &version_name,
                    format!("{MANIFEST_FILE}: {source}"),
                ));
            }
            Err(other) => return Err(other),
        };

        set_default_identity(&mut document, &course_name, &version_name);
        let manifest = Manifest::resident(&document, &course_name, &version_name);
        let errors = self
            .schemas()
            .validate(&Value::Object(document), MANIFEST)?;

        let mut summary = self.index_course(version_dir, &manifest, None).await?;
        if !errors.is_empty() {
            let warning = format!("{MANIFEST_FILE}: {}", errors.join("; "));
            tracing::warn!(course_id = %manifest.id, %warning, "resident manifest is invalid");
            summary.warnings.push(warning);
        }
        Ok(summary)
    }
}

fn placeholder(version_dir: &Path, course: &str, version: &str, warning: String) -> ImportSummary {
    tracing::warn!(dir = %version_dir.display(), %warning, "course left out of catalog");
    ImportSummary {
        course_id: course.to_string(),
        version: version.to_string(),
        title: course.to_string(),
        installed_at: modified_at(version_dir),
        tasks_indexed: 0,
        warnings: vec![warning],
    }
}

/// Directory mtime truncated to seconds; the epoch if unavailable.
fn modified_at(path: &Path) -> DateTime<Utc> {
    let secs = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|mtime| DateTime::<Utc>::from(mtime).timestamp())
        .unwrap_or_default();
    from_epoch_seconds(secs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Child directories of `dir` sorted by name. A missing `dir` has none.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(ContentError::Io {
                path: dir.to_path_buf(),
                source: error,
            });
        }
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(ContentError::io(dir))?;
        if entry.file_type().map_err(ContentError::io(entry.path()))?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}
