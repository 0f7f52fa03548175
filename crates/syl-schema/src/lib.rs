//! # syl-schema
//!
//! JSON Schema registry and validation for Syllabus course packages.
//!
//! This crate provides:
//! - `SchemaRegistry`: resolves the `manifest`, `task`, and `task-folder`
//!   schemas by name, from a configured directory or from the copies
//!   compiled into the binary, and caches compiled validators
//! - Deterministic error rendering (`<dotted.path>: <message>`, sorted by path)
//! - Generated schemas for the response shapes `syl` prints
//!
//! Consumer crates (syl-content, syl-cli) receive the registry by injection;
//! there is no process-wide cache.

pub mod error;
pub mod registry;
pub mod render;
pub mod responses;

pub use error::SchemaError;
pub use responses::{RESPONSE_SCHEMAS, response_schema};
pub use registry::{MANIFEST, REQUIRED_SCHEMAS, SchemaRegistry, TASK, TASK_FOLDER};
