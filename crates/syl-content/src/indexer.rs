//! Course indexing: discover and validate task descriptors, then replace the
//! course's catalog rows in one transaction.

use std::path::{Component, Path};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use syl_core::entities::{CourseRecord, STATUS_INSTALLED, TaskRecord, TaskSource};
use syl_core::enums::TaskKind;
use syl_core::responses::ImportSummary;
use syl_core::time::{from_epoch_seconds, now_seconds};
use syl_schema::{TASK, TASK_FOLDER};

use crate::error::ContentError;
use crate::manifest::Manifest;
use crate::scanner::{DescriptorLayout, TaskDescriptor, TaskDescriptors};
use crate::service::ContentService;

/// Directory under a course root that holds task descriptors.
pub const TASKS_DIR: &str = "tasks";

#[derive(Debug, Deserialize)]
struct DescriptorIdentity {
    id: String,
    kind: TaskKind,
}

enum DescriptorOutcome {
    Task(TaskRecord),
    Skipped(String),
}

impl ContentService {
    /// Index the course at `course_dir` under the manifest's key.
    ///
    /// `installed_at` is the override when given, otherwise the existing
    /// record's value, otherwise now. Descriptors that fail to decode or
    /// validate are skipped with one warning each.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Database` if the replace transaction fails
    /// (nothing is written) or `ContentError::Schema` if a task schema
    /// cannot be used.
    pub async fn index_course(
        &self,
        course_dir: &Path,
        manifest: &Manifest,
        installed_at_override: Option<DateTime<Utc>>,
    ) -> Result<ImportSummary, ContentError> {
        let installed_at = match installed_at_override {
            Some(ts) => ts.timestamp(),
            None => self
                .db()
                .find_course(&manifest.id, &manifest.version)
                .await?
                .map_or_else(now_seconds, |existing| existing.installed_at),
        };

        let mut warnings = Vec::new();
        let mut tasks = Vec::new();
        for descriptor in TaskDescriptors::scan(&course_dir.join(TASKS_DIR)) {
            match self.read_descriptor(course_dir, &descriptor, manifest)? {
                DescriptorOutcome::Task(task) => tasks.push(task),
                DescriptorOutcome::Skipped(warning) => {
                    tracing::warn!(course_id = %manifest.id, %warning, "skipping task descriptor");
                    warnings.push(warning);
                }
            }
        }

        let course = CourseRecord {
            course_id: manifest.id.clone(),
            version: manifest.version.clone(),
            title: manifest.display_title().to_string(),
            installed_at,
            status: Some(STATUS_INSTALLED.to_string()),
        };
        let outcome = self.db().replace_course(&course, &tasks).await?;
        for conflict in &outcome.conflicts {
            let warning = format!(
                "{}: task id '{}' already indexed by {}@{}",
                conflict.source_path, conflict.task_id, conflict.owner_course, conflict.owner_version
            );
            tracing::warn!(course_id = %manifest.id, %warning, "task id collision");
            warnings.push(warning);
        }

        tracing::info!(
            course_id = %course.course_id,
            version = %course.version,
            tasks_indexed = outcome.inserted,
            warnings = warnings.len(),
            "course indexed"
        );

        Ok(ImportSummary {
            course_id: course.course_id,
            version: course.version,
            title: course.title,
            installed_at: from_epoch_seconds(installed_at),
            tasks_indexed: outcome.inserted,
            warnings,
        })
    }

    /// Errors only when the schema registry itself fails.
    fn read_descriptor(
        &self,
        course_dir: &Path,
        descriptor: &TaskDescriptor,
        manifest: &Manifest,
    ) -> Result<DescriptorOutcome, ContentError> {
        let rel = relative_slash_path(&descriptor.path, course_dir);

        let document: Value = match std::fs::read(&descriptor.path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| e.to_string()))
        {
            Ok(document) => document,
            Err(error) => return Ok(DescriptorOutcome::Skipped(format!("{rel}: {error}"))),
        };

        let schema = match descriptor.layout {
            DescriptorLayout::Folder => TASK_FOLDER,
            DescriptorLayout::File => TASK,
        };
        let errors = self.schemas().validate(&document, schema)?;
        if !errors.is_empty() {
            return Ok(DescriptorOutcome::Skipped(format!(
                "{rel}: {}",
                errors.join("; ")
            )));
        }

        let identity = match DescriptorIdentity::deserialize(&document) {
            Ok(identity) => identity,
            Err(error) => return Ok(DescriptorOutcome::Skipped(format!("{rel}: {error}"))),
        };

        let source_rel = relative_slash_path(descriptor.source_path(), course_dir);
        let source = match descriptor.layout {
            DescriptorLayout::Folder => TaskSource::Folder(source_rel),
            DescriptorLayout::File => TaskSource::Json(source_rel),
        };
        Ok(DescriptorOutcome::Task(TaskRecord {
            id: identity.id,
            course_id: manifest.id.clone(),
            version: manifest.version.clone(),
            kind: identity.kind,
            source,
        }))
    }
}

/// `path` relative to `root`, joined with `/` on every platform.
pub(crate) fn relative_slash_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
