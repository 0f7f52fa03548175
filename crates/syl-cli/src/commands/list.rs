use serde::Serialize;
use syl_core::responses::CourseInfo;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// One line per course for table output.
#[derive(Debug, Serialize)]
struct CourseRow {
    id: String,
    version: String,
    title: String,
    installed_at: String,
    status: Option<String>,
    tasks: usize,
}

impl From<&CourseInfo> for CourseRow {
    fn from(course: &CourseInfo) -> Self {
        Self {
            id: course.id.clone(),
            version: course.version.clone(),
            title: course.title.clone(),
            installed_at: course.installed_at.to_rfc3339(),
            status: course.status.clone(),
            tasks: course.tasks.len(),
        }
    }
}

/// Handle `syl list`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut courses = ctx.service.list_courses().await?;
    if let Some(limit) = flags.limit {
        courses.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }

    match flags.format {
        OutputFormat::Table => {
            let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&courses, flags.format),
    }
}
