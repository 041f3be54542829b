//! Filesystem helpers for artifact output.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::GenerateError;

/// Result of a create-only write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    /// The file did not exist and now holds the given bytes.
    Created,
    /// A file already existed at the path; nothing was touched.
    AlreadyExists,
}

/// Write `bytes` to a new file at `path`, never replacing an existing one.
///
/// A partially written file is removed again so a later run does not
/// mistake it for a finished artifact.
pub fn write_new(path: &Path, bytes: &[u8]) -> Result<Written, GenerateError> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(Written::AlreadyExists),
        Err(source) => {
            return Err(GenerateError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if let Err(source) = file.write_all(bytes).and_then(|()| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(GenerateError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(Written::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_new_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icon-192.png");

        assert_eq!(write_new(&path, b"png").unwrap(), Written::Created);
        assert_eq!(fs::read(&path).unwrap(), b"png");
    }

    #[test]
    fn test_write_new_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favicon.ico");
        fs::write(&path, b"original").unwrap();

        assert_eq!(write_new(&path, b"replacement").unwrap(), Written::AlreadyExists);
        assert_eq!(fs::read(&path).unwrap(), b"original");
    }

    #[test]
    fn test_write_new_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("manifest.webmanifest");

        match write_new(&path, b"{}") {
            Err(GenerateError::Write { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
