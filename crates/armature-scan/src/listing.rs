//! Directory-listing abstraction.
//!
//! The scanner is a pure function of a listing, so classification logic is
//! testable without touching a real filesystem. [`DiskListing`] is the
//! production implementation; [`MemoryListing`] backs the tests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use armature_config::ProjectRoot;

use crate::errors::ScanError;

/// Read-only view of a project's source tree.
///
/// Paths are root-relative (`src/commands/circle.ts`). `files` returns
/// discovery order: within each directory, files come before
/// subdirectories, each sorted by name - the order handler files are meant
/// to appear in the derived menu.
pub trait SourceListing {
    fn files(&self) -> Result<Vec<PathBuf>, ScanError>;
    fn read_to_string(&self, rel: &Path) -> Result<String, ScanError>;
}

/// Walks `<root>/src` on disk.
pub struct DiskListing {
    root: ProjectRoot,
}

impl DiskListing {
    pub fn new(root: ProjectRoot) -> Self {
        DiskListing { root }
    }
}

impl SourceListing for DiskListing {
    fn files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let src_dir = self.root.src_dir();
        if !src_dir.is_dir() {
            debug!("Source directory {:?} does not exist", src_dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&src_dir).sort_by(|a, b| {
            // Files before directories, each lexicographic.
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
        });
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(self.root.as_path())
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
        debug!("Listed {} source files under {:?}", files.len(), src_dir);
        Ok(files)
    }

    fn read_to_string(&self, rel: &Path) -> Result<String, ScanError> {
        Ok(fs::read_to_string(self.root.join(rel))?)
    }
}

/// In-memory listing for tests: relative path -> file contents.
#[derive(Debug, Default)]
pub struct MemoryListing {
    entries: BTreeMap<PathBuf, String>,
}

impl MemoryListing {
    pub fn new() -> Self {
        MemoryListing::default()
    }

    pub fn with(mut self, path: &str, contents: &str) -> Self {
        self.entries.insert(PathBuf::from(path), contents.to_string());
        self
    }
}

impl SourceListing for MemoryListing {
    fn files(&self) -> Result<Vec<PathBuf>, ScanError> {
        // BTreeMap iteration is plain lexicographic; reorder so files in a
        // directory precede its subdirectories, matching DiskListing.
        let mut files: Vec<PathBuf> = self.entries.keys().cloned().collect();
        files.sort_by(|a, b| {
            let a_components: Vec<_> = a.components().collect();
            let b_components: Vec<_> = b.components().collect();
            let shared = a_components
                .iter()
                .zip(&b_components)
                .take_while(|(x, y)| x == y)
                .count();
            let a_is_leaf = shared + 1 == a_components.len();
            let b_is_leaf = shared + 1 == b_components.len();
            b_is_leaf
                .cmp(&a_is_leaf)
                .then_with(|| a_components[shared..].cmp(&b_components[shared..]))
        });
        Ok(files)
    }

    fn read_to_string(&self, rel: &Path) -> Result<String, ScanError> {
        self.entries.get(rel).cloned().ok_or_else(|| {
            ScanError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not in listing", rel.display()),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armature_config::ProjectRoot;
    use tempfile::TempDir;

    #[test]
    fn test_disk_listing_orders_files_before_directories() {
        let dir = TempDir::new().unwrap();
        let root = ProjectRoot::new(dir.path());
        fs::create_dir_all(root.join("src/commands/ungroup")).unwrap();
        fs::write(root.join("src/main.ts"), "").unwrap();
        fs::write(root.join("src/commands/zoom.ts"), "").unwrap();
        fs::write(root.join("src/commands/ungroup/all.ts"), "").unwrap();

        let listing = DiskListing::new(root);
        let files = listing.files().unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("src/main.ts"),
                PathBuf::from("src/commands/zoom.ts"),
                PathBuf::from("src/commands/ungroup/all.ts"),
            ]
        );
    }

    #[test]
    fn test_disk_listing_missing_src_is_empty() {
        let dir = TempDir::new().unwrap();
        let listing = DiskListing::new(ProjectRoot::new(dir.path()));
        assert!(listing.files().unwrap().is_empty());
    }

    #[test]
    fn test_memory_listing_matches_disk_order() {
        let listing = MemoryListing::new()
            .with("src/commands/ungroup/all.ts", "")
            .with("src/commands/zoom.ts", "")
            .with("src/main.ts", "");
        let files = listing.files().unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("src/main.ts"),
                PathBuf::from("src/commands/zoom.ts"),
                PathBuf::from("src/commands/ungroup/all.ts"),
            ]
        );
    }
}
