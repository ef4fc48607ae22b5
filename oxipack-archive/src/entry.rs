//! Archive entries.

use oxipack_core::error::{OxiPackError, Result};
use oxipack_core::fs;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// A named file held in an archive.
///
/// Names are byte strings. They are only interpreted as paths on
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name as stored, usually the path the file was added with.
    pub name: Vec<u8>,
    /// Raw file contents.
    pub content: Vec<u8>,
}

/// Name and size of an entry, without its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Name as stored.
    pub name: Vec<u8>,
    /// Content size in bytes.
    pub size: u64,
}

impl EntryInfo {
    /// Name for display, with invalid UTF-8 replaced.
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

#[cfg(unix)]
fn path_to_name(path: &Path) -> Result<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes().to_vec())
}

#[cfg(not(unix))]
fn path_to_name(path: &Path) -> Result<Vec<u8>> {
    path.to_str().map(|s| s.as_bytes().to_vec()).ok_or_else(|| {
        OxiPackError::invalid_argument(format!("path {} is not valid Unicode", path.display()))
    })
}

#[cfg(unix)]
fn name_to_os_str(name: &[u8]) -> Option<&OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Some(OsStr::from_bytes(name))
}

#[cfg(not(unix))]
fn name_to_os_str(name: &[u8]) -> Option<&OsStr> {
    std::str::from_utf8(name).ok().map(OsStr::new)
}

impl ArchiveEntry {
    /// Create an entry from a name and its contents.
    pub fn new(name: impl Into<Vec<u8>>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a regular file into an entry named after `path` as given.
    ///
    /// Fails with `NotFound` or `IsADirectory` for unusable inputs. On Unix
    /// the name is the raw bytes of the path; elsewhere a path that is not
    /// valid Unicode fails with `InvalidArgument`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::ensure_regular_file(path)?;
        let name = path_to_name(path)?;
        Ok(Self::new(name, fs::read_input(path)?))
    }

    /// Name for display, with invalid UTF-8 replaced.
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Content size in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Name and size summary.
    pub fn info(&self) -> EntryInfo {
        EntryInfo {
            name: self.name.clone(),
            size: self.size(),
        }
    }

    /// Relative path to extract this entry to.
    ///
    /// Root and prefix components are dropped so absolute names land under
    /// the extraction directory. A `..` component, a NUL byte, a name
    /// with no file component, or a name the platform cannot represent as a
    /// path fails with `PathTraversal`.
    pub fn extraction_path(&self) -> Result<PathBuf> {
        let rejected = || OxiPackError::path_traversal(self.display_name());
        if self.name.contains(&0) {
            return Err(rejected());
        }
        let name = name_to_os_str(&self.name).ok_or_else(rejected)?;

        let mut relative = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::ParentDir => return Err(rejected()),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(rejected());
        }
        Ok(relative)
    }
}
