//! Course rows and the per-course replace transaction.

use syl_core::entities::{CourseRecord, TaskRecord};

use crate::CatalogDb;
use crate::error::DatabaseError;
use crate::helpers::{COURSE_COLUMNS, row_to_course};

/// A task that was not inserted because its id is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConflict {
    pub task_id: String,
    /// Relative path of the rejected descriptor.
    pub source_path: String,
    pub owner_course: String,
    pub owner_version: String,
}

/// Result of [`CatalogDb::replace_course`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub inserted: u32,
    pub conflicts: Vec<TaskConflict>,
}

impl CatalogDb {
    /// Fetch one course by key.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row decoding fails.
    pub async fn find_course(
        &self,
        course_id: &str,
        version: &str,
    ) -> Result<Option<CourseRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = ?1 AND version = ?2"
                ),
                libsql::params![course_id, version],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_course(&row)?)),
            None => Ok(None),
        }
    }

    /// All courses ordered by `course_id`, then `version`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row decoding fails.
    pub async fn list_courses(&self) -> Result<Vec<CourseRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY course_id, version"),
                (),
            )
            .await?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next().await? {
            courses.push(row_to_course(&row)?);
        }
        Ok(courses)
    }

    /// Replace a course and its full task set in one transaction.
    ///
    /// Deletes the existing course row and every task owned by the key, then
    /// inserts `course` and `tasks`. A task whose id is still present after
    /// the delete (owned by another course version, or repeated in `tasks`)
    /// is left out and reported in [`ReplaceOutcome::conflicts`].
    ///
    /// Any database error rolls the whole replacement back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement or the commit fails.
    pub async fn replace_course(
        &self,
        course: &CourseRecord,
        tasks: &[TaskRecord],
    ) -> Result<ReplaceOutcome, DatabaseError> {
        let tx = self.conn().transaction().await?;
        match write_course(&tx, course, tasks).await {
            Ok(outcome) => {
                tx.commit().await?;
                tracing::debug!(
                    course_id = %course.course_id,
                    version = %course.version,
                    inserted = outcome.inserted,
                    conflicts = outcome.conflicts.len(),
                    "course replaced"
                );
                Ok(outcome)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, "rollback after failed course replace");
                }
                Err(error)
            }
        }
    }

    /// Delete a course and its tasks. Returns `false` if the key was unknown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement or the commit fails.
    pub async fn remove_course(&self, course_id: &str, version: &str) -> Result<bool, DatabaseError> {
        let tx = self.conn().transaction().await?;
        let result = async {
            tx.execute(
                "DELETE FROM tasks WHERE course_id = ?1 AND version = ?2",
                libsql::params![course_id, version],
            )
            .await?;
            tx.execute(
                "DELETE FROM courses WHERE course_id = ?1 AND version = ?2",
                libsql::params![course_id, version],
            )
            .await
        }
        .await;

        match result {
            Ok(removed) => {
                tx.commit().await?;
                Ok(removed > 0)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, "rollback after failed course removal");
                }
                Err(error.into())
            }
        }
    }
}

async fn write_course(
    conn: &libsql::Connection,
    course: &CourseRecord,
    tasks: &[TaskRecord],
) -> Result<ReplaceOutcome, DatabaseError> {
    let (course_id, version) = (course.course_id.as_str(), course.version.as_str());
    conn.execute(
        "DELETE FROM tasks WHERE course_id = ?1 AND version = ?2",
        libsql::params![course_id, version],
    )
    .await?;
    conn.execute(
        "DELETE FROM courses WHERE course_id = ?1 AND version = ?2",
        libsql::params![course_id, version],
    )
    .await?;

    conn.execute(
        "INSERT INTO courses (course_id, version, title, installed_at, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            course_id,
            version,
            course.title.as_str(),
            course.installed_at,
            course.status.as_deref()
        ],
    )
    .await?;

    let mut outcome = ReplaceOutcome::default();
    for task in tasks {
        if let Some((owner_course, owner_version)) = task_owner(conn, &task.id).await? {
            outcome.conflicts.push(TaskConflict {
                task_id: task.id.clone(),
                source_path: task.source.path().to_string(),
                owner_course,
                owner_version,
            });
            continue;
        }

        conn.execute(
            "INSERT INTO tasks (id, course_id, version, kind, json_path, folder_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                task.id.as_str(),
                course_id,
                version,
                task.kind.as_str(),
                task.source.json_path(),
                task.source.folder_path()
            ],
        )
        .await?;
        outcome.inserted += 1;
    }
    Ok(outcome)
}

pub(crate) async fn task_owner(
    conn: &libsql::Connection,
    task_id: &str,
) -> Result<Option<(String, String)>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT course_id, version FROM tasks WHERE id = ?1",
            [task_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some((row.get::<String>(0)?, row.get::<String>(1)?))),
        None => Ok(None),
    }
}
