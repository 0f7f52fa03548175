//! Task rows. Writes happen only through `CatalogDb::replace_course`.

use syl_core::entities::TaskRecord;

use crate::CatalogDb;
use crate::error::DatabaseError;
use crate::helpers::{TASK_COLUMNS, row_to_task};

impl CatalogDb {
    /// Tasks owned by one course version, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row decoding fails.
    pub async fn tasks_for_course(
        &self,
        course_id: &str,
        version: &str,
    ) -> Result<Vec<TaskRecord>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {TASK_COLUMNS} FROM tasks
                     WHERE course_id = ?1 AND version = ?2
                     ORDER BY id"
                ),
                libsql::params![course_id, version],
            )
            .await?;
        collect_tasks(rows).await
    }

    /// Every task, ordered by owning course, version, then id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row decoding fails.
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY course_id, version, id"),
                (),
            )
            .await?;
        collect_tasks(rows).await
    }

    /// Look up a task by its global id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row decoding fails.
    pub async fn find_task(&self, id: &str) -> Result<Option<TaskRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }
}

async fn collect_tasks(mut rows: libsql::Rows) -> Result<Vec<TaskRecord>, DatabaseError> {
    let mut tasks = Vec::new();
    while let Some(row) = rows.next().await? {
        tasks.push(row_to_task(&row)?);
    }
    Ok(tasks)
}
