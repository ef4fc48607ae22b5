//! Huffman stream encoder and decoder.
//!
//! # Stream Format
//!
//! ```text
//! +----------------+-------------------+---------------------------+
//! | trie preamble  | length (32 bits)  | one code per input byte   |
//! +----------------+-------------------+---------------------------+
//! ```
//!
//! The stream is zero-padded to a byte boundary at the end.

use crate::trie::HuffmanTrie;
use oxipack_core::bitstream::{BitReader, BitWriter};
use oxipack_core::error::{OxiPackError, Result};
use std::io::{Cursor, Read, Write};
use tracing::debug;

/// Largest output preallocated from an untrusted length field.
const MAX_PREALLOC: usize = 1 << 20;

/// Compress `data` into a fresh buffer.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    {
        let mut writer = BitWriter::new(&mut output);
        encode_to(data, &mut writer)?;
        writer.flush()?;
    }
    Ok(output)
}

/// Decompress a complete Huffman stream held in memory.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(Cursor::new(data))?;
    decode_from(&mut reader)
}

/// Encode `data` into an existing bit stream.
///
/// The length field is 32 bits wide, so inputs of more than `u32::MAX` bytes
/// fail with [`OxiPackError::InvalidArgument`] before anything is written.
pub fn encode_to<W: Write>(data: &[u8], writer: &mut BitWriter<W>) -> Result<()> {
    let length = u32::try_from(data.len()).map_err(|_| {
        OxiPackError::invalid_argument(format!(
            "input of {} bytes exceeds the 32-bit length field",
            data.len()
        ))
    })?;

    let trie = HuffmanTrie::from_data(data);
    let table = trie.code_table();

    trie.write_to(writer)?;
    writer.write_u32(length)?;
    let payload_start = writer.bits_written();

    for &byte in data {
        // Every byte of `data` has a leaf, so the lookup cannot miss.
        if let Some(code) = table.get(byte) {
            for &bit in code {
                writer.write_bit(bit)?;
            }
        }
    }

    debug!(
        input_len = data.len(),
        symbols = trie.leaf_count(),
        payload_bits = writer.bits_written() - payload_start,
        "huffman encode"
    );
    Ok(())
}

/// Decode a Huffman stream: preamble, length, then `length` symbols.
///
/// Running out of bits anywhere before the last symbol fails with
/// [`OxiPackError::CorruptData`]. Padding after the last symbol is ignored.
pub fn decode_from<R: Read>(reader: &mut BitReader<R>) -> Result<Vec<u8>> {
    let trie = HuffmanTrie::read_from(reader)?;
    let length = reader
        .read_u32()
        .map_err(|e| e.truncated("Huffman length"))? as usize;

    let mut output = Vec::with_capacity(length.min(MAX_PREALLOC));
    for _ in 0..length {
        output.push(trie.decode_symbol(reader)?);
    }

    debug!(
        output_len = output.len(),
        symbols = trie.leaf_count(),
        "huffman decode"
    );
    Ok(output)
}
