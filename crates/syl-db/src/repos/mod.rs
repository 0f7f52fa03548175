//! Repository modules for the catalog tables.
//!
//! Each module adds methods to `CatalogDb` via `impl CatalogDb` blocks.

pub mod course;
pub mod task;

pub use course::{ReplaceOutcome, TaskConflict};
