//! Shared fixtures for syl-content integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use syl_content::{ContentPaths, ContentService};
use syl_schema::SchemaRegistry;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// A service over an in-memory catalog with content under a temp data dir.
pub struct Fixture {
    pub data_dir: TempDir,
    pub service: ContentService,
}

impl Fixture {
    pub async fn new() -> Self {
        let data_dir = TempDir::new().unwrap();
        let service = ContentService::open_local(
            ":memory:",
            Arc::new(SchemaRegistry::builtin()),
            ContentPaths::under(data_dir.path()),
        )
        .await
        .unwrap();
        Self { data_dir, service }
    }

    pub fn content_root(&self) -> &Path {
        self.service.content_root()
    }

    /// Number of scratch directories left behind by imports.
    pub fn staging_leftovers(&self) -> usize {
        std::fs::read_dir(self.service.staging_root()).map_or(0, Iterator::count)
    }
}

/// Zip the given `(path, contents)` pairs in memory.
pub fn zip_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in files {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub const PY_BASICS_MANIFEST: &str =
    r#"{"id": "py-basics", "version": "1.0.0", "title": "Python Basics"}"#;

pub const SUM_TWO_NUMBERS: &str = r#"{
    "id": "sum_two_numbers",
    "kind": "declarative",
    "title": "Sum two numbers",
    "tests": [{"name": "simple", "input": "1 2", "expected": "3"}]
}"#;

/// The `py-basics` 1.0.0 package with one standalone task.
pub fn py_basics_archive() -> Vec<u8> {
    zip_archive(&[
        ("py-basics/manifest.json", PY_BASICS_MANIFEST),
        ("py-basics/tasks/sum_two_numbers.json", SUM_TWO_NUMBERS),
    ])
}

/// Write a file under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}
