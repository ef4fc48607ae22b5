//! Error types for OxiPack operations.
//!
//! Every codec in the workspace reports failures through [`OxiPackError`].
//! The codec layer never recovers silently: a structural violation aborts
//! the current call and surfaces one of these variants to the caller.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for OxiPack operations.
#[derive(Debug, Error)]
pub enum OxiPackError {
    /// Input path does not exist.
    #[error("No such file: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Destination already exists and the overwrite policy forbids replacing it.
    #[error("File already exists: {}", path.display())]
    AlreadyExists {
        /// The colliding path.
        path: PathBuf,
    },

    /// A regular file was expected but a directory was given.
    #[error("{} is a directory", path.display())]
    IsADirectory {
        /// The directory path.
        path: PathBuf,
    },

    /// Out-of-range argument (bit width, value, configuration).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// Read past the last available bit.
    #[error("Unexpected end of stream at bit position {bit_position}")]
    EndOfStream {
        /// Bit position where the read was attempted.
        bit_position: u64,
    },

    /// Structurally invalid trie, dictionary code or archive frame.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptData {
        /// Bit offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Archive entry name would escape the extraction directory.
    #[error("Path traversal detected in entry: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },

    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for OxiPack operations.
pub type Result<T> = std::result::Result<T, OxiPackError>;

impl OxiPackError {
    /// Create a not found error.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an already exists error.
    pub fn already_exists(path: impl AsRef<Path>) -> Self {
        Self::AlreadyExists {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an is-a-directory error.
    pub fn is_a_directory(path: impl AsRef<Path>) -> Self {
        Self::IsADirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an end of stream error.
    pub fn end_of_stream(bit_position: u64) -> Self {
        Self::EndOfStream { bit_position }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptData {
            offset,
            message: message.into(),
        }
    }

    /// Create a path traversal error.
    pub fn path_traversal(path: impl Into<String>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    /// Map an [`OxiPackError::EndOfStream`] to [`OxiPackError::CorruptData`].
    ///
    /// Decoders use this when running out of bits in the middle of a
    /// structure that the stream itself promised to contain.
    pub fn truncated(self, what: &str) -> Self {
        match self {
            Self::EndOfStream { bit_position } => {
                Self::corrupted(bit_position, format!("truncated {what}"))
            }
            other => other,
        }
    }

    /// Classify an I/O error raised while opening `path`.
    pub fn from_io_at(err: io::Error, path: impl AsRef<Path>) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            io::ErrorKind::AlreadyExists => Self::already_exists(path),
            io::ErrorKind::IsADirectory => Self::is_a_directory(path),
            _ => Self::Io(err),
        }
    }
}
