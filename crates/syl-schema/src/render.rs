//! Deterministic rendering of validation errors.
//!
//! `jsonschema` reports errors in evaluation order. Warning text is shown to
//! content authors and compared across runs, so errors are re-ordered by the
//! instance path they point at and rendered as `<dotted.path>: <message>`.

use std::cmp::Ordering;

use jsonschema::ValidationError;

/// One validation failure, keyed by its location in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: Vec<String>,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn from_error(error: &ValidationError<'_>) -> Self {
        Self {
            path: pointer_segments(&error.instance_path.to_string()),
            message: error.to_string(),
        }
    }

    /// `<dotted.path>: <message>`; root-level errors keep the empty prefix.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}: {}", self.path.join("."), self.message)
    }
}

/// Split a JSON pointer (`/tests/0/name`) into unescaped segments.
#[must_use]
pub fn pointer_segments(pointer: &str) -> Vec<String> {
    if pointer.is_empty() || pointer == "/" {
        return Vec::new();
    }
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Stable sort by path, then render.
#[must_use]
pub fn render_sorted(mut violations: Vec<Violation>) -> Vec<String> {
    violations.sort_by(|a, b| compare_paths(&a.path, &b.path));
    violations.iter().map(Violation::render).collect()
}

/// Segment-wise order; array indices compare numerically.
fn compare_paths(a: &[String], b: &[String]) -> Ordering {
    for (left, right) in a.iter().zip(b) {
        let ordering = match (left.parse::<usize>(), right.parse::<usize>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => left.cmp(right),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}
