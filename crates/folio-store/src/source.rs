//! Filesystem seam.
//!
//! The repository never calls `std::fs` directly; it goes through a
//! [`ContentSource`], which lets tests count or forbid disk access.

use std::{fs, io, path::Path};

/// Read access to a content directory.
pub trait ContentSource: Send + Sync {
    /// File names (not paths) of the regular files in `dir`.
    fn file_names(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`ContentSource`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ContentSource for FsSource {
    fn file_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            // Non UTF-8 names can never form a valid slug.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_skips_directories() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("a.mdx"), "x").expect("write");
        fs::write(dir.path().join("b.txt"), "x").expect("write");
        fs::create_dir(dir.path().join("nested.mdx")).expect("mkdir");

        let mut names = FsSource.file_names(dir.path()).expect("list");
        names.sort();
        assert_eq!(names, vec!["a.mdx", "b.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(FsSource.file_names(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_is_file_and_read() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("a.mdx");
        fs::write(&path, "hello").expect("write");

        assert!(FsSource.is_file(&path));
        assert!(!FsSource.is_file(dir.path()));
        assert_eq!(FsSource.read_to_string(&path).expect("read"), "hello");
    }
}
