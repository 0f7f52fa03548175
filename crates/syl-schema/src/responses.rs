//! JSON Schemas for the response types, generated from syl-core with
//! [`schemars::schema_for!`].

use schemars::schema_for;
use serde_json::Value;
use syl_core::errors::ErrorKind;
use syl_core::responses::{CourseInfo, ImportSummary, ScanResponse};

use crate::error::SchemaError;

/// Response shapes with a generated schema, sorted.
pub const RESPONSE_SCHEMAS: [&str; 4] = ["course-info", "error-kind", "import-summary", "scan-response"];

/// Generated schema for a response shape.
///
/// # Errors
///
/// `SchemaError::NotFound` for an unknown name.
pub fn response_schema(name: &str) -> Result<Value, SchemaError> {
    let schema = match name {
        "course-info" => schema_for!(CourseInfo),
        "error-kind" => schema_for!(ErrorKind),
        "import-summary" => schema_for!(ImportSummary),
        "scan-response" => schema_for!(ScanResponse),
        _ => {
            return Err(SchemaError::NotFound {
                name: name.to_string(),
                location: None,
            });
        }
    };
    serde_json::to_value(schema).map_err(|source| SchemaError::Parse {
        name: name.to_string(),
        source,
    })
}
