//! Cross-cutting error classification.
//!
//! Each crate defines its own `thiserror` enum (`SchemaError`,
//! `DatabaseError`, `ContentError`, ...). `ErrorKind` is the shared
//! vocabulary callers use to decide how to report a failure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a failure should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself is unusable (no manifest, corrupt archive).
    Client,
    /// The manifest failed schema checks; details travel with the error.
    Validation,
    /// Deployment problem such as a missing schema file. Not recoverable per call.
    Configuration,
    /// Storage or I/O failure inside the service.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }

    /// Whether the caller can fix the failure by changing its input.
    #[must_use]
    pub const fn is_caller_fault(self) -> bool {
        matches!(self, Self::Client | Self::Validation)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
