//! Moving an accepted course tree into durable storage.

use std::path::Path;

use ignore::WalkBuilder;

use crate::error::ContentError;

/// Replace `dest` with the tree at `src`.
///
/// Any existing `dest` is removed first. The move is a rename when both
/// paths share a filesystem and a recursive copy followed by removal of
/// `src` otherwise.
///
/// # Errors
///
/// Returns `ContentError::Io` naming the path that failed.
pub fn replace_tree(src: &Path, dest: &Path) -> Result<(), ContentError> {
    if dest.exists() {
        std::fs::remove_dir_all(dest).map_err(ContentError::io(dest))?;
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(ContentError::io(parent))?;
    }

    match std::fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(error) => {
            tracing::debug!(%error, src = %src.display(), "rename failed, copying instead");
            copy_tree(src, dest)?;
            std::fs::remove_dir_all(src).map_err(ContentError::io(src))
        }
    }
}

/// Recursively copy directories and regular files. Symlinks are skipped.
fn copy_tree(src: &Path, dest: &Path) -> Result<(), ContentError> {
    let mut builder = WalkBuilder::new(src);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.follow_links(false);

    for result in builder.build() {
        let entry = result.map_err(|e| ContentError::Io {
            path: src.to_path_buf(),
            source: e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk failed")),
        })?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(rel);
        match entry.file_type() {
            Some(ft) if ft.is_dir() => {
                std::fs::create_dir_all(&target).map_err(ContentError::io(&target))?;
            }
            Some(ft) if ft.is_file() => {
                std::fs::copy(entry.path(), &target).map_err(ContentError::io(&target))?;
            }
            _ => tracing::warn!(path = %entry.path().display(), "skipping non-regular file"),
        }
    }
    Ok(())
}
