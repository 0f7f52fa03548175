use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Scan => commands::scan::handle(ctx, flags).await,
        Commands::List => commands::list::handle(ctx, flags).await,
        Commands::Show(args) => commands::show::handle(&args, ctx, flags).await,
        Commands::Remove(args) => commands::remove::handle(&args, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, ctx.service.schemas(), flags),
        Commands::Validate(args) => commands::validate::handle(&args, ctx.service.schemas(), flags),
    }
}
