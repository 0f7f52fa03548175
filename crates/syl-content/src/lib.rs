//! # syl-content
//!
//! The course content pipeline for Syllabus:
//!
//! - `extract`: unpack an uploaded zip into a scratch directory and find the course root
//! - `scanner`: discover task descriptors under `tasks/`
//! - `indexer`: validate descriptors and replace a course's catalog rows
//! - `importer`: the full upload path (extract, validate manifest, relocate, index)
//! - `reconcile`: rebuild catalog rows from the durable content root
//! - `catalog`: list, fetch, and remove courses
//!
//! Everything hangs off [`ContentService`], which owns the catalog database
//! and a shared [`syl_schema::SchemaRegistry`].

pub mod catalog;
pub mod error;
pub mod extract;
pub mod importer;
pub mod indexer;
pub mod manifest;
pub mod reconcile;
pub mod relocate;
pub mod scanner;
pub mod service;

pub use error::ContentError;
pub use manifest::Manifest;
pub use service::{ContentPaths, ContentService};
