//! Storage locations: data directory, content root, catalog database.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_data_dir() -> PathBuf {
    PathBuf::from("var")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for everything Syllabus writes.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Catalog database file. Defaults to `<data_dir>/syllabus.db`.
    /// `:memory:` keeps the catalog in process memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_path: None,
        }
    }
}

impl StorageConfig {
    /// Durable content root: `<data_dir>/content/<course_id>/<version>/...`.
    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        self.data_dir.join("content")
    }

    /// Scratch space for archive extraction. Lives next to the content root
    /// so relocation is normally a rename.
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.data_dir.join("staging")
    }

    /// Lock file held by the single writer process.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join("write.lock")
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("syllabus.db"))
    }

    /// Whether the catalog lives in process memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_path
            .as_deref()
            .is_some_and(|path| path == Path::new(":memory:"))
    }

    /// Create the data, content, and staging directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty `data_dir`, or
    /// `ConfigError::CreateDir` if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.data_dir".into(),
                reason: "must not be empty".into(),
            });
        }
        for dir in [self.data_dir.clone(), self.content_dir(), self.staging_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|source| ConfigError::CreateDir { path: dir, source })?;
        }
        Ok(())
    }
}
