use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod report;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    if let Err(error) = run(cli, &flags).await {
        eprintln!("syl error: {error:#}");
        let report = report::ErrorReport::from_error(&error);
        if !matches!(flags.format, cli::OutputFormat::Table) {
            let _ = output::output(&report, flags.format);
        }
        std::process::exit(report.exit_code());
    }
}

async fn run(cli: cli::Cli, flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    init_tracing(flags.quiet, flags.verbose)?;
    ui::init(flags);

    let config = bootstrap::load_config(flags)?;

    // Schema inspection never opens the catalog.
    match &cli.command {
        cli::Commands::Schema(args) => {
            let registry = context::schema_registry(&config);
            return commands::schema::handle(args, &registry, flags);
        }
        cli::Commands::Validate(args) => {
            let registry = context::schema_registry(&config);
            return commands::validate::handle(args, &registry, flags);
        }
        _ => {}
    }

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        config
            .storage
            .ensure_dirs()
            .context("failed to prepare data directory")?;
        Some(write_lock::acquire(&config.storage.lock_path()).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize syllabus application context")?;

    let result = commands::dispatch::dispatch(command, &ctx, flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SYLLABUS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

const fn command_requires_write_lock(command: &cli::Commands) -> bool {
    match command {
        cli::Commands::Import(_) | cli::Commands::Scan | cli::Commands::Remove(_) => true,
        cli::Commands::List
        | cli::Commands::Show(_)
        | cli::Commands::Schema(_)
        | cli::Commands::Validate(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_mutating_commands_take_the_lock() {
        let import = cli::Cli::parse_from(["syl", "import", "course.zip"]);
        let list = cli::Cli::parse_from(["syl", "list"]);
        let remove = cli::Cli::parse_from(["syl", "remove", "py-basics", "1.0.0"]);
        let validate = cli::Cli::parse_from(["syl", "validate", "manifest.json"]);

        assert!(command_requires_write_lock(&import.command));
        assert!(command_requires_write_lock(&remove.command));
        assert!(!command_requires_write_lock(&list.command));
        assert!(!command_requires_write_lock(&validate.command));
    }
}
