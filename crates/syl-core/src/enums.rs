//! Enumerations stored in the catalog.
//!
//! All enums use `snake_case` serialization so the SQL column value, the JSON
//! value in task descriptors, and the CLI output agree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a task's submissions are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Input/expected-output pairs declared in the descriptor.
    Declarative,
    /// A checker program shipped with the task.
    CustomChecker,
}

impl TaskKind {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declarative => "declarative",
            Self::CustomChecker => "custom_checker",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
