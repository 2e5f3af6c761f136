//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use modkit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ModkitError, ModkitResult},
};

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
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> ModkitResult<()> {
        fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_new_file(&self, path: &Path, content: &str) -> ModkitResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "create file"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> ModkitResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ModkitResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ModkitError {
    if e.kind() == io::ErrorKind::AlreadyExists {
        return ApplicationError::AlreadyExists {
            path: path.to_path_buf(),
        }
        .into();
    }

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_is_single_level() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        let nested = temp.path().join("a").join("b");
        assert!(fs.create_dir(&nested).is_err());

        fs.create_dir(&temp.path().join("a")).unwrap();
        fs.create_dir(&nested).unwrap();
        assert!(fs.is_dir(&nested));
    }

    #[test]
    fn existing_paths_report_already_exists() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("payments");
        let file = temp.path().join("build.gradle.kts");

        fs.create_dir(&dir).unwrap();
        fs.write_new_file(&file, "one").unwrap();

        assert!(matches!(
            fs.create_dir(&dir),
            Err(ModkitError::Application(ApplicationError::AlreadyExists { .. }))
        ));
        assert!(matches!(
            fs.write_new_file(&file, "two"),
            Err(ModkitError::Application(ApplicationError::AlreadyExists { .. }))
        ));
        assert_eq!(fs.read_to_string(&file).unwrap(), "one");
    }

    #[test]
    fn write_file_overwrites() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = temp.path().join("settings.gradle.kts");

        fs.write_file(&file, "a").unwrap();
        fs.write_file(&file, "b").unwrap();
        assert_eq!(fs.read_to_string(&file).unwrap(), "b");
    }

    #[test]
    fn missing_file_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&temp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            ModkitError::Application(ApplicationError::Filesystem { .. })
        ));
    }
}
