//! # syl-core
//!
//! Core types shared across all Syllabus crates:
//! - Catalog records for courses and tasks (`entities`)
//! - The task kind enumeration (`enums`)
//! - Summaries and projections returned to callers (`responses`)
//! - The error taxonomy used to classify failures (`errors`)
//! - Timestamp helpers for the catalog's epoch-seconds columns (`time`)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod time;
