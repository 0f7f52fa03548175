use serde::Serialize;
use syl_schema::{RESPONSE_SCHEMAS, SchemaRegistry, response_schema};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaListResponse {
    source: String,
    schemas: Vec<String>,
    responses: Vec<&'static str>,
}

/// Handle `syl schema [--response] [name]`.
pub fn handle(args: &SchemaArgs, registry: &SchemaRegistry, flags: &GlobalFlags) -> anyhow::Result<()> {
    match (&args.name, args.response) {
        (Some(name), true) => output(&response_schema(name)?, flags.format),
        (Some(name), false) => output(&registry.raw(name)?, flags.format),
        (None, _) => {
            let source = registry
                .dir()
                .map_or_else(|| "builtin".to_string(), |dir| dir.display().to_string());
            output(
                &SchemaListResponse {
                    source,
                    schemas: registry.names()?,
                    responses: RESPONSE_SCHEMAS.to_vec(),
                },
                flags.format,
            )
        }
    }
}
