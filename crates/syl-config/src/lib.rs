//! # syl-config
//!
//! Layered configuration loading for Syllabus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SYLLABUS_*` prefix, `__` as separator)
//! 2. Project-level `.syllabus/config.toml`
//! 3. User-level `~/.config/syllabus/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SYLLABUS_STORAGE__DATA_DIR` -> `storage.data_dir` and
//! `SYLLABUS_SCHEMAS__DIR` -> `schemas.dir`. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use syl_config::SyllabusConfig;
//!
//! let config = SyllabusConfig::load_with_dotenv().expect("config");
//! config.storage.ensure_dirs().expect("data dirs");
//! println!("content root: {}", config.storage.content_dir().display());
//! ```

mod error;
mod schemas;
mod storage;

pub use error::ConfigError;
pub use schemas::SchemaConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "SYLLABUS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SyllabusConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub schemas: SchemaConfig,
}

impl SyllabusConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".syllabus/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("syllabus").join("config.toml"))
    }
}
