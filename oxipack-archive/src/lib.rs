//! # OxiPack Archive
//!
//! Multi-file archives compressed with LZW (`.zl`).
//!
//! Each file becomes a frame of name length, name, size and contents
//! separated by the byte `R - 1`; the concatenated frames are then LZW
//! encoded as one stream. See [`frame`] for the exact layout.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_archive::{ArchiveEntry, Archiver};
//!
//! let archiver = Archiver::default();
//! let entries = vec![
//!     ArchiveEntry::new("a.txt", b"A".to_vec()),
//!     ArchiveEntry::new("b.txt", b"B".to_vec()),
//! ];
//!
//! let packed = archiver.pack(&entries).unwrap();
//! assert_eq!(archiver.unpack(&packed).unwrap(), entries);
//! ```
//!
//! ## Files on Disk
//!
//! ```rust,no_run
//! use oxipack_archive::{Archiver, OverwritePolicy};
//!
//! let archiver = Archiver::default();
//! archiver
//!     .create("bundle.zl", &["notes.txt", "data.bin"], OverwritePolicy::FailIfExists)
//!     .unwrap();
//! for info in archiver.list("bundle.zl").unwrap() {
//!     println!("{} {}", info.size, info.display_name());
//! }
//! archiver.extract("bundle.zl", "out").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod archiver;
mod entry;
pub mod frame;

pub use archiver::Archiver;
pub use entry::{ArchiveEntry, EntryInfo};
pub use oxipack_core::error::{OxiPackError, Result};
pub use oxipack_core::fs::OverwritePolicy;
pub use oxipack_lzw::LzwConfig;
