//! Read and remove operations over the course catalog.

use std::collections::HashMap;

use syl_core::entities::TaskRecord;
use syl_core::responses::CourseInfo;

use crate::error::ContentError;
use crate::manifest::is_safe_segment;
use crate::service::ContentService;

impl ContentService {
    /// Every course with its tasks, ordered by course id then version;
    /// tasks ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Database` if the catalog cannot be read.
    pub async fn list_courses(&self) -> Result<Vec<CourseInfo>, ContentError> {
        let courses = self.db().list_courses().await?;
        let mut tasks_by_key: HashMap<(String, String), Vec<TaskRecord>> = HashMap::new();
        for task in self.db().list_tasks().await? {
            tasks_by_key
                .entry((task.course_id.clone(), task.version.clone()))
                .or_default()
                .push(task);
        }

        Ok(courses
            .iter()
            .map(|course| {
                let key = (course.course_id.clone(), course.version.clone());
                let tasks = tasks_by_key.get(&key).map_or(&[][..], Vec::as_slice);
                CourseInfo::from_records(course, tasks)
            })
            .collect())
    }

    /// One course by key, or `None` if it is not in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Database` if the catalog cannot be read.
    pub async fn get_course(
        &self,
        course_id: &str,
        version: &str,
    ) -> Result<Option<CourseInfo>, ContentError> {
        let Some(course) = self.db().find_course(course_id, version).await? else {
            return Ok(None);
        };
        let tasks = self.db().tasks_for_course(course_id, version).await?;
        Ok(Some(CourseInfo::from_records(&course, &tasks)))
    }

    /// Delete a course's catalog rows and its directory under the content root.
    ///
    /// # Errors
    ///
    /// `InvalidCourseKey` for ids that are not a single path segment,
    /// `CourseNotFound` when neither rows nor a directory exist, otherwise
    /// `Database` or `Io`.
    pub async fn remove_course(&self, course_id: &str, version: &str) -> Result<(), ContentError> {
        if !is_safe_segment(course_id) || !is_safe_segment(version) {
            return Err(ContentError::InvalidCourseKey {
                course_id: course_id.to_string(),
                version: version.to_string(),
            });
        }

        let removed_rows = self.db().remove_course(course_id, version).await?;
        let dir = self.course_dir(course_id, version);
        let removed_dir = dir.is_dir();
        if removed_dir {
            std::fs::remove_dir_all(&dir).map_err(ContentError::io(&dir))?;
            // Drop the course directory once its last version is gone.
            if let Some(parent) = dir.parent()
                && std::fs::read_dir(parent).is_ok_and(|mut entries| entries.next().is_none())
            {
                std::fs::remove_dir(parent).map_err(ContentError::io(parent))?;
            }
        }

        if !removed_rows && !removed_dir {
            return Err(ContentError::CourseNotFound {
                course_id: course_id.to_string(),
                version: version.to_string(),
            });
        }
        tracing::info!(course_id, version, "course removed");
        Ok(())
    }
}
