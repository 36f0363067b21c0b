//! File access for programs and tables
//!
//! Reads go through `tokio::fs`; writes go through [`write_all`] on a plain
//! file handle. Every failure is mapped onto [`OpenError`] so the operator
//! sees which path was at fault.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parser::write_all;

/// Windows sharing and lock violations
const SHARING_VIOLATION: i32 = 32;
const LOCK_VIOLATION: i32 = 33;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("ファイルが見つかりません: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("フォルダが見つかりません: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("ファイルが他のプログラムで使用中です: {}", .0.display())]
    InUse(PathBuf),

    #[error("ファイルを開けません: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OpenError {
    /// Map an I/O failure on `path` onto the operator-facing variants
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        let path_buf = path.to_path_buf();
        match error.kind() {
            io::ErrorKind::NotFound => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                    OpenError::DirectoryNotFound(parent.to_path_buf())
                }
                _ => OpenError::FileNotFound(path_buf),
            },
            io::ErrorKind::PermissionDenied => OpenError::InUse(path_buf),
            _ if matches!(
                error.raw_os_error(),
                Some(SHARING_VIOLATION | LOCK_VIOLATION)
            ) =>
            {
                OpenError::InUse(path_buf)
            }
            _ => OpenError::Io {
                path: path_buf,
                source: error,
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            OpenError::FileNotFound(path)
            | OpenError::DirectoryNotFound(path)
            | OpenError::InUse(path)
            | OpenError::Io { path, .. } => path,
        }
    }
}

/// Read a whole text file
pub async fn read_text(path: &Path) -> Result<String, OpenError> {
    log::debug!("reading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| OpenError::from_io(path, e))
}

/// Create or truncate `path` and write `text` to it
pub fn write_text(path: &Path, text: &str) -> Result<(), OpenError> {
    log::debug!("writing {} bytes to {}", text.len(), path.display());
    let file = File::create(path).map_err(|e| OpenError::from_io(path, e))?;
    write_all(BufWriter::new(file), text).map_err(|e| OpenError::from_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("O1000.nc");

        let err = read_text(&path).await.unwrap_err();
        assert!(matches!(&err, OpenError::FileNotFound(p) if p == &path));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");

        let err = read_text(&missing.join("O1000.nc")).await.unwrap_err();
        assert!(matches!(&err, OpenError::DirectoryNotFound(p) if p == &missing));
        assert_eq!(err.path(), missing.as_path());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("combined.nc");

        write_text(&path, "(RB250F-AL)\nM30").unwrap();
        assert_eq!(read_text(&path).await.unwrap(), "(RB250F-AL)\nM30");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("combined.nc");

        let err = write_text(&path, "M30").unwrap_err();
        assert!(matches!(err, OpenError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_sharing_violation_is_in_use() {
        let err = OpenError::from_io(
            Path::new("O1000.nc"),
            io::Error::from_raw_os_error(SHARING_VIOLATION),
        );
        assert!(matches!(err, OpenError::InUse(_)));
    }
}
