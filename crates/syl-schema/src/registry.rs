//! Named schema registry with a compiled-validator cache.
//!
//! Schemas are static deployment artifacts: each name is resolved once,
//! compiled with `jsonschema`, and kept for the lifetime of the registry.
//! Entries are never replaced, so concurrent readers only contend on the
//! first lookup of a name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use jsonschema::Validator;
use serde_json::Value;

use crate::error::SchemaError;
use crate::render::{Violation, render_sorted};

/// Course manifest schema.
pub const MANIFEST: &str = "manifest";
/// Standalone task descriptor file.
pub const TASK: &str = "task";
/// `task.json` inside a task folder.
pub const TASK_FOLDER: &str = "task-folder";

/// Every schema the content pipeline needs before it can serve a request.
pub const REQUIRED_SCHEMAS: [&str; 3] = [MANIFEST, TASK, TASK_FOLDER];

const BUILTIN_MANIFEST: &str = include_str!("../schemas/manifest.json");
const BUILTIN_TASK: &str = include_str!("../schemas/task.json");
const BUILTIN_TASK_FOLDER: &str = include_str!("../schemas/task-folder.json");

#[derive(Debug, Clone)]
enum SchemaSource {
    /// `<dir>/<name>.json`
    Dir(PathBuf),
    /// Compiled into the binary.
    Builtin,
}

/// Resolves schemas by name and validates documents against them.
///
/// Construct one at startup and share it (`Arc<SchemaRegistry>`); call
/// [`SchemaRegistry::ensure_loaded`] with [`REQUIRED_SCHEMAS`] so a missing
/// schema fails startup instead of a request.
pub struct SchemaRegistry {
    source: SchemaSource,
    cache: RwLock<HashMap<String, Arc<Validator>>>,
}

impl SchemaRegistry {
    /// Registry backed by `<dir>/<name>.json` files.
    #[must_use]
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: SchemaSource::Dir(dir.into()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Registry backed by the schemas shipped with this crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            source: SchemaSource::Builtin,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Directory the registry reads from, or `None` for the built-in set.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        match &self.source {
            SchemaSource::Dir(dir) => Some(dir),
            SchemaSource::Builtin => None,
        }
    }

    /// Resolve and compile every named schema.
    ///
    /// # Errors
    ///
    /// Returns the first `SchemaError` encountered, typically
    /// `SchemaError::NotFound` for a schema with no backing file.
    pub fn ensure_loaded(&self, names: &[&str]) -> Result<(), SchemaError> {
        for name in names {
            self.validator(name)?;
        }
        tracing::debug!(count = names.len(), source = ?self.source, "schemas loaded");
        Ok(())
    }

    /// Validate `document` against the schema called `name`.
    ///
    /// Returns the violations ordered by their path inside the document,
    /// each rendered `<dotted.path>: <message>`. An empty list means valid.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` only when the schema itself cannot be resolved
    /// or compiled.
    pub fn validate(&self, document: &Value, name: &str) -> Result<Vec<String>, SchemaError> {
        let validator = self.validator(name)?;
        let violations = validator
            .iter_errors(document)
            .map(|error| Violation::from_error(&error))
            .collect();
        Ok(render_sorted(violations))
    }

    /// The raw schema document for `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound`, `Io`, or `Parse`.
    pub fn raw(&self, name: &str) -> Result<Value, SchemaError> {
        let text = self.read_source(name)?;
        serde_json::from_str(&text).map_err(|source| SchemaError::Parse {
            name: name.to_string(),
            source,
        })
    }

    /// Names this registry can resolve, sorted.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Io` if the schema directory cannot be listed.
    pub fn names(&self) -> Result<Vec<String>, SchemaError> {
        let mut names = match &self.source {
            SchemaSource::Builtin => REQUIRED_SCHEMAS.iter().map(ToString::to_string).collect(),
            SchemaSource::Dir(dir) => {
                let entries = std::fs::read_dir(dir).map_err(|source| SchemaError::Io {
                    path: dir.clone(),
                    source,
                })?;
                entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                    .filter_map(|path| {
                        path.file_stem()
                            .and_then(|stem| stem.to_str())
                            .map(String::from)
                    })
                    .collect::<Vec<_>>()
            }
        };
        names.sort_unstable();
        Ok(names)
    }

    /// Number of compiled validators currently cached.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn validator(&self, name: &str) -> Result<Arc<Validator>, SchemaError> {
        if let Some(validator) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(validator));
        }

        let schema = self.raw(name)?;
        let compiled = jsonschema::validator_for(&schema).map_err(|e| SchemaError::Compile {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // A concurrent caller may have compiled the same schema; keep the first.
        let entry = cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(entry))
    }

    fn read_source(&self, name: &str) -> Result<String, SchemaError> {
        match &self.source {
            SchemaSource::Builtin => builtin_source(name)
                .map(String::from)
                .ok_or_else(|| SchemaError::NotFound {
                    name: name.to_string(),
                    location: None,
                }),
            SchemaSource::Dir(dir) => {
                if !is_plain_name(name) {
                    return Err(SchemaError::NotFound {
                        name: name.to_string(),
                        location: None,
                    });
                }
                let path = dir.join(format!("{name}.json"));
                if !path.is_file() {
                    return Err(SchemaError::NotFound {
                        name: name.to_string(),
                        location: Some(path),
                    });
                }
                std::fs::read_to_string(&path).map_err(|source| SchemaError::Io { path, source })
            }
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_source(name: &str) -> Option<&'static str> {
    match name {
        MANIFEST => Some(BUILTIN_MANIFEST),
        TASK => Some(BUILTIN_TASK),
        TASK_FOLDER => Some(BUILTIN_TASK_FOLDER),
        _ => None,
    }
}

/// Schema names map to file names; reject anything that could leave the directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !name.starts_with('.')
}
