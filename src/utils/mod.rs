//! Filesystem helpers for the command-line front end.
//!
//! The library itself never walks directories: the importer takes an explicit
//! ordered file list. These helpers build that list from a folder on disk.

use anyhow::{Context, Result};
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

use crate::core::DiaryxError;
use crate::import::{DiskFile, ImportInput};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// Workspace-relative path with `/` separators.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Every regular file under `root`, in a stable order, as import inputs.
///
/// Hidden files and directories (names starting with `.`) are left out.
/// Entries are sorted by file name within each directory, so the order is
/// the same on every platform.
///
/// # Errors
///
/// Returns an error if `root` is not a directory or cannot be traversed.
pub fn collect_workspace_files(root: &Path) -> Result<Vec<ImportInput<DiskFile>>> {
    if !root.is_dir() {
        return Err(DiaryxError::InvalidArgument {
            message: format!("{} is not a directory", root.display()),
        }
        .into());
    }

    let mut inputs = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        inputs.push(ImportInput::new(DiskFile::new(path), relative_path(root, path)));
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_workspace_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("journal/2024")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join("index.md"), "").unwrap();
        std::fs::write(root.join("journal/2024/day.md"), "").unwrap();
        std::fs::write(root.join("journal/photo.png"), "").unwrap();
        std::fs::write(root.join(".git/config"), "").unwrap();
        std::fs::write(root.join(".hidden.md"), "").unwrap();

        let inputs = collect_workspace_files(root).unwrap();
        let paths: Vec<&str> = inputs.iter().map(|input| input.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["index.md", "journal/2024/day.md", "journal/photo.png"]);
    }

    #[test]
    fn test_collect_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        assert!(collect_workspace_files(&temp.path().join("absent")).is_err());
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/workspace");
        assert_eq!(relative_path(root, &root.join("a").join("b.md")), "a/b.md");
    }
}
