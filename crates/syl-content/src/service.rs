//! `ContentService`: the catalog database, the schema registry, and the
//! content directories, wired together.
//!
//! The pipeline stages are implemented as `impl ContentService` blocks in
//! `indexer`, `importer`, `reconcile`, and `catalog`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use syl_db::CatalogDb;
use syl_schema::{REQUIRED_SCHEMAS, SchemaRegistry};

use crate::error::ContentError;

/// Filesystem locations the service writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    /// Durable root: `<content_root>/<course_id>/<version>/...`.
    pub content_root: PathBuf,
    /// Parent for per-import scratch directories. Keep it on the same
    /// filesystem as `content_root` so relocation is a rename.
    pub staging_root: PathBuf,
}

impl ContentPaths {
    /// `<data_dir>/content` and `<data_dir>/staging`.
    #[must_use]
    pub fn under(data_dir: &Path) -> Self {
        Self {
            content_root: data_dir.join("content"),
            staging_root: data_dir.join("staging"),
        }
    }
}

/// Imports course packages and keeps the catalog in step with the content root.
///
/// Assumes a single writer; callers serialize `import_archive`,
/// `scan_content_root`, and `remove_course`.
pub struct ContentService {
    db: CatalogDb,
    schemas: Arc<SchemaRegistry>,
    paths: ContentPaths,
}

impl ContentService {
    /// Create a service. Every required schema is resolved and compiled here.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Schema` if a required schema is missing or broken.
    pub fn new(
        db: CatalogDb,
        schemas: Arc<SchemaRegistry>,
        paths: ContentPaths,
    ) -> Result<Self, ContentError> {
        schemas.ensure_loaded(&REQUIRED_SCHEMAS)?;
        Ok(Self { db, schemas, paths })
    }

    /// Open the catalog at `db_path` (or `":memory:"`) and create a service.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Database` or `ContentError::Schema`.
    pub async fn open_local(
        db_path: &str,
        schemas: Arc<SchemaRegistry>,
        paths: ContentPaths,
    ) -> Result<Self, ContentError> {
        let db = CatalogDb::open_local(db_path).await?;
        Self::new(db, schemas, paths)
    }

    #[must_use]
    pub const fn db(&self) -> &CatalogDb {
        &self.db
    }

    #[must_use]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    #[must_use]
    pub fn content_root(&self) -> &Path {
        &self.paths.content_root
    }

    #[must_use]
    pub fn staging_root(&self) -> &Path {
        &self.paths.staging_root
    }

    /// `<content_root>/<course_id>/<version>`.
    #[must_use]
    pub fn course_dir(&self, course_id: &str, version: &str) -> PathBuf {
        self.paths.content_root.join(course_id).join(version)
    }
}
