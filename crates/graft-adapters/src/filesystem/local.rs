//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use graft_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GraftError, GraftResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> GraftResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> GraftResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GraftResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(to, e, "copy file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> GraftResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: format!("Failed to walk directory: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(dir) {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GraftError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn list_files_is_recursive_relative_and_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("devise/sessions")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("devise/sessions/new.html.erb"), "sign in").unwrap();
        fs::write(root.join("devise/_links.html.erb"), "links").unwrap();
        fs::write(root.join("application.css"), "css").unwrap();

        let files = LocalFilesystem::new().list_files(root).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("application.css"),
                PathBuf::from("devise/_links.html.erb"),
                PathBuf::from("devise/sessions/new.html.erb"),
            ]
        );
    }

    #[test]
    fn copy_file_preserves_bytes() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("logo.png");
        let to = temp.path().join("copy.png");
        fs::write(&from, [0x89, b'P', b'N', b'G', 0x00, 0xff]).unwrap();

        LocalFilesystem::new().copy_file(&from, &to).unwrap();

        assert_eq!(fs::read(&to).unwrap(), vec![0x89, b'P', b'N', b'G', 0x00, 0xff]);
    }

    #[test]
    fn read_missing_file_maps_to_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&temp.path().join("missing.rb"))
            .unwrap_err();
        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
