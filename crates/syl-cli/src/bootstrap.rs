use anyhow::Context;
use syl_config::SyllabusConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered config, then apply `--data-dir` / `--schema-dir`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SyllabusConfig> {
    load_dotenv()?;
    let mut config = SyllabusConfig::load().context("failed to load syllabus configuration")?;
    apply_flag_overrides(&mut config, flags);
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

fn apply_flag_overrides(config: &mut SyllabusConfig, flags: &GlobalFlags) {
    if let Some(data_dir) = &flags.data_dir {
        config.storage.data_dir.clone_from(data_dir);
    }
    if let Some(schema_dir) = &flags.schema_dir {
        config.schemas.dir = Some(schema_dir.clone());
    }
}
