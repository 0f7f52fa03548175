//! Archive import: extract, check the manifest, relocate, index.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::Utc;
use syl_core::responses::ImportSummary;
use syl_schema::MANIFEST;

use crate::error::ContentError;
use crate::extract::extract_archive;
use crate::manifest::{Manifest, is_safe_segment, read_manifest_document};
use crate::relocate::replace_tree;
use crate::service::ContentService;

impl ContentService {
    /// Import a zipped course package.
    ///
    /// Nothing under the content root or in the catalog changes unless the
    /// manifest is present, decodes, and validates. An existing installation
    /// of the same `(id, version)` is replaced wholesale and its
    /// `installed_at` reset to now.
    ///
    /// # Errors
    ///
    /// Client errors: `InvalidArchive`, `ManifestMissing`, `ManifestDecode`,
    /// `InvalidCourseKey`. Validation: `ManifestInvalid`. Otherwise `Io`,
    /// `Schema`, or `Database`.
    pub async fn import_archive<R: Read>(&self, reader: R) -> Result<ImportSummary, ContentError> {
        let (manifest, destination) = {
            let extracted = extract_archive(reader, self.staging_root())?;
            let document = read_manifest_document(extracted.root())?;

            let errors = self.schemas().validate(&document, MANIFEST)?;
            if !errors.is_empty() {
                tracing::info!(errors = errors.len(), "rejected manifest");
                return Err(ContentError::ManifestInvalid { errors });
            }
            let manifest = Manifest::from_document(&document)?;
            if !is_safe_segment(&manifest.id) || !is_safe_segment(&manifest.version) {
                return Err(ContentError::InvalidCourseKey {
                    course_id: manifest.id,
                    version: manifest.version,
                });
            }

            let destination = self.course_dir(&manifest.id, &manifest.version);
            replace_tree(extracted.root(), &destination)?;
            tracing::info!(
                course_id = %manifest.id,
                version = %manifest.version,
                destination = %destination.display(),
                "course package installed"
            );
            (manifest, destination)
        };

        self.index_course(&destination, &manifest, Some(Utc::now()))
            .await
    }

    /// Import the zip file at `path`.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened; otherwise as [`Self::import_archive`].
    pub async fn import_archive_path(&self, path: &Path) -> Result<ImportSummary, ContentError> {
        let file = File::open(path).map_err(ContentError::io(path))?;
        self.import_archive(BufReader::new(file)).await
    }
}
