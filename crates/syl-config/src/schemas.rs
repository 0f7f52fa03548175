//! Schema registry location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaConfig {
    /// Directory holding `manifest.json`, `task.json`, and `task-folder.json`.
    /// When unset, the schemas compiled into the binary are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl SchemaConfig {
    #[must_use]
    pub const fn uses_builtin(&self) -> bool {
        self.dir.is_none()
    }
}
