//! Response types returned by the content service and printed by `syl`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CourseRecord, TaskRecord};
use crate::enums::TaskKind;

/// Outcome of indexing one course version, from an import or a scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    pub course_id: String,
    pub version: String,
    pub title: String,
    pub installed_at: DateTime<Utc>,
    pub tasks_indexed: u32,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Response from `syl scan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScanResponse {
    #[serde(default)]
    pub imported: Vec<ImportSummary>,
}

/// A task as listed in the catalog projection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskIndex {
    pub id: String,
    pub course_id: String,
    pub version: String,
    pub kind: TaskKind,
    /// Relative path of the descriptor file or task folder inside the course.
    pub source_path: String,
}

impl From<&TaskRecord> for TaskIndex {
    fn from(task: &TaskRecord) -> Self {
        Self {
            id: task.id.clone(),
            course_id: task.course_id.clone(),
            version: task.version.clone(),
            kind: task.kind,
            source_path: task.source.path().to_string(),
        }
    }
}

/// Response item from `syl list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseInfo {
    pub id: String,
    pub version: String,
    pub title: String,
    pub installed_at: DateTime<Utc>,
    pub status: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskIndex>,
}

impl CourseInfo {
    /// Build the projection for one course; tasks are sorted by id.
    #[must_use]
    pub fn from_records(course: &CourseRecord, tasks: &[TaskRecord]) -> Self {
        let mut tasks: Vec<TaskIndex> = tasks.iter().map(TaskIndex::from).collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            id: course.course_id.clone(),
            version: course.version.clone(),
            title: course.title.clone(),
            installed_at: course.installed_at_utc(),
            status: course.status.clone(),
            tasks,
        }
    }
}
