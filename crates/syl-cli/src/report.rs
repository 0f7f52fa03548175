//! Error reporting for the binary: exit code and machine-readable body.

use serde::Serialize;
use syl_content::ContentError;
use syl_core::errors::ErrorKind;
use syl_schema::SchemaError;

/// Exit code for failures the caller can fix (bad archive, invalid manifest).
pub const EXIT_CALLER_FAULT: i32 = 2;
/// Exit code for everything else.
pub const EXIT_FAILURE: i32 = 1;

/// JSON body printed on stdout when a command fails.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Vec<String>>,
}

impl ErrorReport {
    #[must_use]
    pub fn from_error(error: &anyhow::Error) -> Self {
        if let Some(content) = error.downcast_ref::<ContentError>() {
            return Self {
                error: content.to_string(),
                kind: content.kind(),
                manifest: content.validation_errors().map(<[String]>::to_vec),
            };
        }
        let kind = if error.downcast_ref::<SchemaError>().is_some() {
            ErrorKind::Configuration
        } else {
            ErrorKind::Internal
        };
        Self {
            error: format!("{error:#}"),
            kind,
            manifest: None,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.kind.is_caller_fault() {
            EXIT_CALLER_FAULT
        } else {
            EXIT_FAILURE
        }
    }
}
