use syl_core::responses::ScanResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `syl scan`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let imported = ctx.service.scan_content_root().await?;
    output(&ScanResponse { imported }, flags.format)
}
