use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Import a zipped course package into the content root and catalog.
    Import(ImportArgs),
    /// Re-index every course directory under the content root.
    Scan,
    /// List catalogued courses with their tasks.
    List,
    /// Show one course version.
    Show(CourseKeyArgs),
    /// Remove a course version from the catalog and the content root.
    Remove(CourseKeyArgs),
    /// List schema names, or print one schema.
    Schema(SchemaArgs),
    /// Validate a JSON document against a named schema.
    Validate(ValidateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Path to the course package (.zip).
    pub archive: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct CourseKeyArgs {
    /// Course id from the manifest.
    pub course_id: String,
    /// Course version from the manifest.
    pub version: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name (`manifest`, `task`, `task-folder`). Lists all when omitted.
    pub name: Option<String>,
    /// Look `name` up among the generated response schemas instead.
    #[arg(long)]
    pub response: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Schema name to validate against.
    #[arg(short, long, default_value = "manifest")]
    pub schema: String,
    /// JSON file to validate.
    pub file: PathBuf,
}
