//! Catalog records as persisted by `syl-db`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskKind;
use crate::time::from_epoch_seconds;

/// Status written for every course the indexer accepts.
pub const STATUS_INSTALLED: &str = "installed";

/// A versioned course package, keyed by `(course_id, version)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseRecord {
    pub course_id: String,
    pub version: String,
    pub title: String,
    /// Seconds since the Unix epoch (UTC).
    pub installed_at: i64,
    pub status: Option<String>,
}

impl CourseRecord {
    #[must_use]
    pub fn installed_at_utc(&self) -> DateTime<Utc> {
        from_epoch_seconds(self.installed_at)
    }
}

/// Where a task's descriptor lives inside the course tree.
///
/// A task is either a single JSON file or a directory holding `task.json`;
/// the path is relative to the course root and uses `/` separators.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "layout", content = "path")]
pub enum TaskSource {
    /// Standalone descriptor file, e.g. `tasks/sum_two_numbers.json`.
    Json(String),
    /// Directory containing `task.json`, e.g. `tasks/fizzbuzz`.
    Folder(String),
}

impl TaskSource {
    /// Value for the `json_path` column.
    #[must_use]
    pub fn json_path(&self) -> Option<&str> {
        match self {
            Self::Json(path) => Some(path),
            Self::Folder(_) => None,
        }
    }

    /// Value for the `folder_path` column.
    #[must_use]
    pub fn folder_path(&self) -> Option<&str> {
        match self {
            Self::Folder(path) => Some(path),
            Self::Json(_) => None,
        }
    }

    /// The relative path regardless of layout.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Json(path) | Self::Folder(path) => path,
        }
    }

    /// Rebuild from the two nullable columns. Returns `None` unless exactly
    /// one of them is set.
    #[must_use]
    pub fn from_columns(json_path: Option<String>, folder_path: Option<String>) -> Option<Self> {
        match (json_path, folder_path) {
            (Some(json), None) => Some(Self::Json(json)),
            (None, Some(folder)) => Some(Self::Folder(folder)),
            _ => None,
        }
    }
}

/// One exercise belonging to a course version.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: String,
    pub course_id: String,
    pub version: String,
    pub kind: TaskKind,
    pub source: TaskSource,
}
