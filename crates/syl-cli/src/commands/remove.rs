use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CourseKeyArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RemoveResponse<'a> {
    course_id: &'a str,
    version: &'a str,
    removed: bool,
}

/// Handle `syl remove <course_id> <version>`.
pub async fn handle(args: &CourseKeyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.service
        .remove_course(&args.course_id, &args.version)
        .await?;
    output(
        &RemoveResponse {
            course_id: &args.course_id,
            version: &args.version,
            removed: true,
        },
        flags.format,
    )
}
