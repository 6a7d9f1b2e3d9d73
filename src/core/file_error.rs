//! File operation context for I/O failures.
//!
//! Every filesystem touch in the generator goes through [`FileOperation`] so
//! that an I/O failure always names both what was being done and which path
//! it was done to.

use std::io;
use std::path::{Path, PathBuf};

use super::error::ChartError;

/// Types of file operations performed while producing a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Reading a file completely
    Read,
    /// Writing a file
    Write,
    /// Creating a directory (recursively)
    CreateDir,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::CreateDir => write!(f, "creating directory"),
        }
    }
}

impl FileOperation {
    /// Build a closure that wraps an [`io::Error`] with this operation and `path`.
    ///
    /// Meant for `map_err`:
    ///
    /// ```rust,no_run
    /// use kube_chartgen::core::FileOperation;
    /// use std::path::Path;
    ///
    /// let path = Path::new("values.yaml");
    /// let result = std::fs::read(path).map_err(FileOperation::Read.on(path));
    /// ```
    pub fn on(self, path: &Path) -> impl FnOnce(io::Error) -> ChartError + '_ {
        move |source| ChartError::Io {
            operation: self,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a whole file, naming the path on failure.
pub fn read_file(path: &Path) -> Result<Vec<u8>, ChartError> {
    std::fs::read(path).map_err(FileOperation::Read.on(path))
}

/// Write `content` to `path`, creating or truncating it.
pub fn write_file(path: &Path, content: &[u8]) -> Result<(), ChartError> {
    std::fs::write(path, content).map_err(FileOperation::Write.on(path))
}

/// Create `path` and all missing parents.
pub fn ensure_dir(path: &Path) -> Result<PathBuf, ChartError> {
    std::fs::create_dir_all(path).map_err(FileOperation::CreateDir.on(path))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_operation_display() {
        assert_eq!(FileOperation::Read.to_string(), "reading");
        assert_eq!(FileOperation::Write.to_string(), "writing");
        assert_eq!(FileOperation::CreateDir.to_string(), "creating directory");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");

        let err = read_file(&missing).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("reading"), "{message}");
        assert!(message.contains("nope.yaml"), "{message}");
    }

    #[test]
    fn test_ensure_dir_is_recursive_and_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");

        write_file(&path, b"hello\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"hello\n");
    }
}
