//! # OxiPack-LZW: Pure Rust LZW Compression
//!
//! This crate provides the fixed-width LZW codec behind `.ll` files and
//! `.zl` archives.
//!
//! ## Stream Layout
//!
//! - **MSB-first bit order**, shared with the rest of OxiPack
//! - **Fixed-width codewords**: every code is written with `W` bits
//! - **No clear codes**: once the table holds `L` entries it stops growing
//!   and the existing entries keep being used
//! - **Sentinel termination**: the stream ends with code `R`
//!
//! With [`LzwConfig::DEFAULT`] (`R = 256`, `L = 4096`, `W = 12`) codes
//! `0..=255` are single bytes, `256` is the end-of-stream code and
//! `257..=4095` are learned strings.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_lzw::{compress, decompress, LzwConfig};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
//! let decompressed = decompress(&compressed, LzwConfig::DEFAULT).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Smaller Tables
//!
//! The parameters are plain values, so alternative alphabets and table
//! sizes need no global state:
//!
//! ```rust
//! use oxipack_lzw::{compress, decompress, LzwConfig};
//!
//! // 7-bit text, 256 codes, 8-bit codewords
//! let config = LzwConfig::new(128, 256, 8).unwrap();
//! let text = b"It was the best of times, it was the worst of times";
//! let compressed = compress(text, config).unwrap();
//! assert_eq!(decompress(&compressed, config).unwrap(), text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;

pub use config::LzwConfig;
pub use decoder::LzwDecoder;
pub use dictionary::{DecodeTable, PrefixDictionary};
pub use encoder::LzwEncoder;
pub use oxipack_core::error::{OxiPackError, Result};

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use oxipack_lzw::{compress, LzwConfig};
///
/// let data = b"TOBEORNOT".repeat(50);
/// let compressed = compress(&data, LzwConfig::DEFAULT).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwEncoder::new(config)?.encode(data)
}

/// Decompress an LZW stream produced with the same configuration.
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(config)?.decode(data)
}
