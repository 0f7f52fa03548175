use syl_content::ContentError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CourseKeyArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `syl show <course_id> <version>`.
pub async fn handle(args: &CourseKeyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let course = ctx
        .service
        .get_course(&args.course_id, &args.version)
        .await?
        .ok_or_else(|| ContentError::CourseNotFound {
            course_id: args.course_id.clone(),
            version: args.version.clone(),
        })?;
    output(&course, flags.format)
}
