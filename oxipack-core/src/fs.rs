//! File helpers shared by the codecs and the CLI.
//!
//! Opening a source classifies failures into [`OxiPackError::NotFound`] and
//! [`OxiPackError::IsADirectory`]; creating a destination honours an
//! [`OverwritePolicy`].

use crate::error::{OxiPackError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Fail with [`OxiPackError::AlreadyExists`].
    #[default]
    FailIfExists,
    /// Replace the existing contents.
    Truncate,
}

/// Check that `path` names an existing regular file.
pub fn ensure_regular_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| OxiPackError::from_io_at(e, path))?;
    if metadata.is_dir() {
        return Err(OxiPackError::is_a_directory(path));
    }
    if !metadata.is_file() {
        return Err(OxiPackError::invalid_argument(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    Ok(())
}

/// Open a regular file for buffered reading.
pub fn open_input(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    ensure_regular_file(path)?;
    let file = File::open(path).map_err(|e| OxiPackError::from_io_at(e, path))?;
    Ok(BufReader::new(file))
}

/// Read a whole regular file into memory.
pub fn read_input(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    ensure_regular_file(path)?;
    std::fs::read(path).map_err(|e| OxiPackError::from_io_at(e, path))
}

/// Create a destination file for buffered writing.
pub fn create_output(path: impl AsRef<Path>, policy: OverwritePolicy) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    options.write(true);
    match policy {
        OverwritePolicy::FailIfExists => options.create_new(true),
        OverwritePolicy::Truncate => options.create(true).truncate(true),
    };
    let file = options
        .open(path)
        .map_err(|e| OxiPackError::from_io_at(e, path))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, OxiPackError::NotFound { .. }));
    }

    #[test]
    fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(dir.path()).unwrap_err();
        assert!(matches!(err, OxiPackError::IsADirectory { .. }));
    }

    #[test]
    fn test_create_fail_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old").unwrap();

        let err = create_output(&path, OverwritePolicy::FailIfExists).unwrap_err();
        assert!(matches!(err, OxiPackError::AlreadyExists { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"old");
    }

    #[test]
    fn test_create_truncate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old contents").unwrap();

        {
            let mut out = create_output(&path, OverwritePolicy::Truncate).unwrap();
            out.write_all(b"new").unwrap();
        }

        let mut contents = Vec::new();
        open_input(&path)
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, b"new");
    }
}
