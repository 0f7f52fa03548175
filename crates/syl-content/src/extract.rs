//! Archive extraction into a self-cleaning scratch directory.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ContentError;

/// Top-level entries that archivers add and that never belong to a course.
pub const JUNK_PREFIXES: [&str; 2] = ["__MACOSX", ".DS_Store"];

const UPLOAD_FILE: &str = "upload.zip";
const EXTRACTED_DIR: &str = "extracted";

/// An extracted upload. The scratch directory is removed on drop.
#[derive(Debug)]
pub struct ExtractedArchive {
    scratch: TempDir,
    root: PathBuf,
}

impl ExtractedArchive {
    /// The normalized course root inside the scratch directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The scratch directory holding `upload.zip` and `extracted/`.
    #[must_use]
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }
}

/// Write `reader` to a scratch file under `scratch_parent`, unpack it, and
/// locate the course root.
///
/// # Errors
///
/// `InvalidArchive` when the bytes are not a readable zip or contain an
/// entry that would land outside the extraction directory; `Io` for
/// filesystem failures.
pub fn extract_archive<R: Read>(
    mut reader: R,
    scratch_parent: &Path,
) -> Result<ExtractedArchive, ContentError> {
    std::fs::create_dir_all(scratch_parent).map_err(ContentError::io(scratch_parent))?;
    let scratch = tempfile::Builder::new()
        .prefix("import-")
        .tempdir_in(scratch_parent)
        .map_err(ContentError::io(scratch_parent))?;

    let upload_path = scratch.path().join(UPLOAD_FILE);
    {
        let mut upload = File::create(&upload_path).map_err(ContentError::io(&upload_path))?;
        std::io::copy(&mut reader, &mut upload).map_err(ContentError::io(&upload_path))?;
    }

    let extract_dir = scratch.path().join(EXTRACTED_DIR);
    let file = File::open(&upload_path).map_err(ContentError::io(&upload_path))?;
    let mut archive = ZipArchive::new(file).map_err(|e| zip_error(e, &upload_path))?;
    tracing::debug!(entries = archive.len(), "extracting archive");
    std::fs::create_dir_all(&extract_dir).map_err(ContentError::io(&extract_dir))?;
    archive
        .extract(&extract_dir)
        .map_err(|e| zip_error(e, &extract_dir))?;

    let root = single_root(&extract_dir)?;
    Ok(ExtractedArchive { scratch, root })
}

fn zip_error(error: ZipError, path: &Path) -> ContentError {
    match error {
        ZipError::Io(source) => ContentError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => ContentError::InvalidArchive(other.to_string()),
    }
}

/// If the archive wraps everything in one top-level directory, that
/// directory is the course root; otherwise the extraction directory is.
fn single_root(extract_dir: &Path) -> Result<PathBuf, ContentError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(extract_dir).map_err(ContentError::io(extract_dir))? {
        let entry = entry.map_err(ContentError::io(extract_dir))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if JUNK_PREFIXES.iter().any(|junk| name.starts_with(junk)) {
            continue;
        }
        entries.push(entry.path());
    }

    match entries.as_slice() {
        [only] if only.is_dir() => Ok(only.clone()),
        _ => Ok(extract_dir.to_path_buf()),
    }
}
