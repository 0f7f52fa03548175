use std::sync::Arc;

use anyhow::Context;
use syl_config::SyllabusConfig;
use syl_content::{ContentPaths, ContentService};
use syl_schema::SchemaRegistry;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ContentService,
    pub config: SyllabusConfig,
}

impl AppContext {
    /// Create the data directories, open the catalog, and load schemas.
    pub async fn init(config: SyllabusConfig) -> anyhow::Result<Self> {
        config
            .storage
            .ensure_dirs()
            .context("failed to prepare data directory")?;

        let db_path = config.storage.database_path();
        let db_path = db_path.to_string_lossy();
        let paths = ContentPaths {
            content_root: config.storage.content_dir(),
            staging_root: config.storage.staging_dir(),
        };

        let service = ContentService::open_local(&db_path, schema_registry(&config), paths)
            .await
            .context("failed to initialize content service")?;
        tracing::debug!(
            data_dir = %config.storage.data_dir.display(),
            database = %db_path,
            "application context ready"
        );
        Ok(Self { service, config })
    }
}

/// Registry from `schemas.dir`, or the built-in schemas.
pub fn schema_registry(config: &SyllabusConfig) -> Arc<SchemaRegistry> {
    let registry = config
        .schemas
        .dir
        .as_ref()
        .map_or_else(SchemaRegistry::builtin, |dir| SchemaRegistry::from_dir(dir.clone()));
    Arc::new(registry)
}
