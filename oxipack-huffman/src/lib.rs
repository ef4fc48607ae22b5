//! # OxiPack-Huffman: Static Huffman Coding
//!
//! This crate implements the codec behind `.hh` files: a Huffman trie is
//! built from the byte frequencies of the whole input, serialized in front
//! of the payload, and used to write one prefix-free code per input byte.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_huffman::{compress, decompress};
//!
//! let original = b"abracadabra abracadabra abracadabra";
//! let compressed = compress(original).unwrap();
//! assert!(compressed.len() < original.len());
//! assert_eq!(decompress(&compressed).unwrap(), original);
//! ```
//!
//! ## Inspecting Codes
//!
//! ```rust
//! use oxipack_huffman::HuffmanTrie;
//!
//! let trie = HuffmanTrie::from_data(b"aaaabbc");
//! let codes = trie.code_table();
//! assert_eq!(codes.get(b'a').map(<[bool]>::len), Some(1));
//! assert!(codes.get(b'z').is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codec;
mod trie;

pub use codec::{compress, decode_from, decompress, encode_to};
pub use oxipack_core::error::{OxiPackError, Result};
pub use trie::{ALPHABET_SIZE, CodeTable, HuffmanNode, HuffmanTrie};
