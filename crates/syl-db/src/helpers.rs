//! Row-to-record parsing helpers.
//!
//! `libsql::Row` is column-indexed; these keep the per-table parsing in one
//! place so the repos only deal with typed records.

use syl_core::entities::{CourseRecord, TaskRecord, TaskSource};

use crate::error::DatabaseError;

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with syl-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column is an error, so nullable
/// columns go through `get::<Option<String>>()`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Column order: `course_id, version, title, installed_at, status`.
pub(crate) const COURSE_COLUMNS: &str = "course_id, version, title, installed_at, status";

/// Column order: `id, course_id, version, kind, json_path, folder_path`.
pub(crate) const TASK_COLUMNS: &str = "id, course_id, version, kind, json_path, folder_path";

pub(crate) fn row_to_course(row: &libsql::Row) -> Result<CourseRecord, DatabaseError> {
    Ok(CourseRecord {
        course_id: row.get::<String>(0)?,
        version: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        installed_at: row.get::<i64>(3)?,
        status: get_opt_string(row, 4)?,
    })
}

pub(crate) fn row_to_task(row: &libsql::Row) -> Result<TaskRecord, DatabaseError> {
    let id = row.get::<String>(0)?;
    let kind_str = row.get::<String>(3)?;
    let source = TaskSource::from_columns(get_opt_string(row, 4)?, get_opt_string(row, 5)?)
        .ok_or_else(|| {
            DatabaseError::InvalidState(format!(
                "task '{id}' must have exactly one of json_path or folder_path"
            ))
        })?;
    Ok(TaskRecord {
        course_id: row.get::<String>(1)?,
        version: row.get::<String>(2)?,
        kind: parse_enum(&kind_str)?,
        source,
        id,
    })
}
