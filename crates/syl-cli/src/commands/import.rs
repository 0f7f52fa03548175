use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `syl import <archive>`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = ctx
        .service
        .import_archive_path(&args.archive)
        .await
        .with_context(|| format!("failed to import {}", args.archive.display()))?;
    output(&summary, flags.format)
}
