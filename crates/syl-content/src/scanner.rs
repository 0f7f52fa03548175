//! Task descriptor discovery under a course's `tasks/` directory.
//!
//! A descriptor is either a folder holding `task.json` or a standalone
//! `.json` file. The walk is recursive, includes hidden entries, ignores
//! `.gitignore` rules, and does not follow symlinks.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// File that marks a directory as a task folder.
pub const TASK_FILE: &str = "task.json";

/// How a descriptor was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorLayout {
    /// `<dir>/task.json`; the task is the directory.
    Folder,
    /// A standalone `.json` file.
    File,
}

/// One discovered descriptor. `path` always points at the JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub path: PathBuf,
    pub layout: DescriptorLayout,
}

impl TaskDescriptor {
    /// The path a catalog row records: the folder for `Folder`, the file otherwise.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        match self.layout {
            DescriptorLayout::Folder => self.path.parent().unwrap_or(&self.path),
            DescriptorLayout::File => &self.path,
        }
    }
}

/// Single-pass iterator over the descriptors below a tasks directory,
/// in path order, each yielded once.
pub struct TaskDescriptors {
    walk: Option<ignore::Walk>,
    seen: HashSet<PathBuf>,
}

impl TaskDescriptors {
    /// Start a scan. A missing directory yields nothing.
    #[must_use]
    pub fn scan(tasks_dir: &Path) -> Self {
        let walk = tasks_dir.is_dir().then(|| {
            let mut builder = WalkBuilder::new(tasks_dir);
            builder.standard_filters(false);
            builder.hidden(false);
            builder.follow_links(false);
            builder.sort_by_file_name(|a, b| a.cmp(b));
            builder.build()
        });
        Self {
            walk,
            seen: HashSet::new(),
        }
    }

    fn candidate(entry: &ignore::DirEntry) -> Option<TaskDescriptor> {
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            let task_file = path.join(TASK_FILE);
            return task_file.is_file().then_some(TaskDescriptor {
                path: task_file,
                layout: DescriptorLayout::Folder,
            });
        }
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        (file_type.is_file() && is_json).then(|| TaskDescriptor {
            path: path.to_path_buf(),
            layout: DescriptorLayout::File,
        })
    }
}

impl Iterator for TaskDescriptors {
    type Item = TaskDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let walk = self.walk.as_mut()?;
        for result in walk.by_ref() {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable entry in tasks directory");
                    continue;
                }
            };
            // The tasks directory itself is never a task.
            if entry.depth() == 0 {
                continue;
            }
            if let Some(descriptor) = Self::candidate(&entry)
                && self.seen.insert(descriptor.path.clone())
            {
                tracing::debug!(path = %descriptor.path.display(), layout = ?descriptor.layout, "task descriptor");
                return Some(descriptor);
            }
        }
        self.walk = None;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "{}").unwrap();
    }

    fn scan_rel(root: &Path) -> Vec<(String, DescriptorLayout)> {
        TaskDescriptors::scan(root)
            .map(|d| {
                let rel = d.path.strip_prefix(root).unwrap();
                (rel.to_string_lossy().replace('\\', "/"), d.layout)
            })
            .collect()
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(TaskDescriptors::scan(&temp.path().join("tasks")).count(), 0);
    }

    #[test]
    fn folder_with_task_json_is_yielded_once() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "fizzbuzz/task.json");

        assert_eq!(
            scan_rel(temp.path()),
            vec![("fizzbuzz/task.json".to_string(), DescriptorLayout::Folder)]
        );
    }

    #[test]
    fn files_and_folders_in_path_order() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "b_task.json");
        touch(temp.path(), "a_folder/task.json");
        touch(temp.path(), "nested/deeper/c.JSON");
        touch(temp.path(), "notes.txt");
        touch(temp.path(), ".hidden.json");

        assert_eq!(
            scan_rel(temp.path()),
            vec![
                (".hidden.json".to_string(), DescriptorLayout::File),
                ("a_folder/task.json".to_string(), DescriptorLayout::Folder),
                ("b_task.json".to_string(), DescriptorLayout::File),
                ("nested/deeper/c.JSON".to_string(), DescriptorLayout::File),
            ]
        );
    }

    #[test]
    fn extra_json_inside_task_folder_is_its_own_candidate() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "fizzbuzz/task.json");
        touch(temp.path(), "fizzbuzz/tests.json");

        assert_eq!(
            scan_rel(temp.path()),
            vec![
                ("fizzbuzz/task.json".to_string(), DescriptorLayout::Folder),
                ("fizzbuzz/tests.json".to_string(), DescriptorLayout::File),
            ]
        );
    }

    #[test]
    fn source_path_for_folder_is_directory() {
        let descriptor = TaskDescriptor {
            path: PathBuf::from("tasks/fizzbuzz/task.json"),
            layout: DescriptorLayout::Folder,
        };
        assert_eq!(descriptor.source_path(), Path::new("tasks/fizzbuzz"));
    }

    #[test]
    fn iterator_is_exhausted_after_one_pass() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "a.json");
        let mut scan = TaskDescriptors::scan(temp.path());
        assert!(scan.next().is_some());
        assert!(scan.next().is_none());
        assert!(scan.next().is_none());
    }
}
