use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use syl_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub file: String,
    pub schema: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validate one JSON file without touching the catalog.
pub fn validate_file(registry: &SchemaRegistry, schema: &str, file: &Path) -> anyhow::Result<ValidationReport> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let errors = registry.validate(&document, schema)?;
    Ok(ValidationReport {
        file: file.display().to_string(),
        schema: schema.to_string(),
        valid: errors.is_empty(),
        errors,
    })
}

/// Handle `syl validate [--schema name] <file>`.
pub fn handle(args: &ValidateArgs, registry: &SchemaRegistry, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = validate_file(registry, &args.schema, &args.file)?;
    output(&report, flags.format)
}
