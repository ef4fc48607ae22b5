//! LZW decoder (decompression).

use crate::config::LzwConfig;
use crate::dictionary::DecodeTable;
use oxipack_core::bitstream::BitReader;
use oxipack_core::error::{OxiPackError, Result};
use std::io::{Cursor, Read};
use tracing::debug;

/// LZW decoder for decompression.
#[derive(Debug, Clone)]
pub struct LzwDecoder {
    config: LzwConfig,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Decode a complete LZW stream held in memory.
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(Cursor::new(input))?;
        self.decode_from(&mut reader)
    }

    /// Decode codewords from a bit stream until the sentinel.
    ///
    /// Decoding also stops cleanly if the stream runs out on a codeword
    /// boundary. A codeword that names neither an assigned entry nor the
    /// self-referential next code fails with [`OxiPackError::CorruptData`].
    pub fn decode_from<R: Read>(&self, reader: &mut BitReader<R>) -> Result<Vec<u8>> {
        let width = self.config.code_width;
        let eos = self.config.end_of_stream();
        let mut table = DecodeTable::new(&self.config);
        let mut output = Vec::new();

        let code = reader
            .read_bits(width)
            .map_err(|e| e.truncated("LZW codeword"))?;
        if code == eos {
            debug!(output_len = 0, "lzw decode");
            return Ok(output);
        }
        let mut previous = table
            .get(code)
            .ok_or_else(|| unassigned(code, reader.bits_read()))?
            .to_vec();

        loop {
            output.extend_from_slice(&previous);
            if reader.is_exhausted() {
                break;
            }

            let code = reader
                .read_bits(width)
                .map_err(|e| e.truncated("LZW codeword"))?;
            if code == eos {
                break;
            }

            let next_code = table.next_code();
            let current = match table.get(code) {
                Some(entry) => entry.to_vec(),
                // Self-reference: the code being defined by this very step.
                None if code == next_code && next_code < self.config.table_size => {
                    let mut entry = previous.clone();
                    entry.push(previous[0]);
                    entry
                }
                None => return Err(unassigned(code, reader.bits_read())),
            };

            if next_code < self.config.table_size {
                let mut entry = previous;
                entry.push(current[0]);
                table.push(entry);
            }
            previous = current;
        }

        debug!(
            output_len = output.len(),
            table_len = table.next_code(),
            "lzw decode"
        );
        Ok(output)
    }
}

fn unassigned(code: u32, bit_position: u64) -> OxiPackError {
    OxiPackError::corrupted(bit_position, format!("LZW code {code} is not assigned"))
}
