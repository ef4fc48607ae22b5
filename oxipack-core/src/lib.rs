//! # OxiPack Core
//!
//! Core components for the OxiPack compression toolkit.
//!
//! This crate provides the fundamental building blocks shared by every
//! codec:
//!
//! - [`bitstream`]: MSB-first bit-level I/O (Huffman codes, LZW codewords,
//!   big-endian integers)
//! - [`fs`]: opening sources and creating destinations with an
//!   [`OverwritePolicy`]
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Container                                           │
//! │     .zl archive framing (oxipack-archive), CLI          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Huffman (.hh), LZW (.ll)                            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, file helpers, errors           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut data = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut data);
//!     writer.write_bits(0xABC, 12).unwrap();
//! }
//! assert_eq!(data, vec![0xAB, 0xC0]);
//!
//! let mut reader = BitReader::new(Cursor::new(data)).unwrap();
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod fs;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiPackError, Result};
pub use fs::OverwritePolicy;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiPackError, Result};
    pub use crate::fs::OverwritePolicy;
}
