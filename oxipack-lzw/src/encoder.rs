//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::PrefixDictionary;
use oxipack_core::bitstream::BitWriter;
use oxipack_core::error::{OxiPackError, Result};
use std::io::Write;
use tracing::debug;

/// LZW encoder for compression.
///
/// The encoder only holds its configuration; the dictionary is rebuilt for
/// every call, so one encoder can be reused freely.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    config: LzwConfig,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Encode data into a fresh buffer.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            self.encode_to(input, &mut writer)?;
            writer.flush()?;
        }
        Ok(output)
    }

    /// Encode data into an existing bit stream.
    ///
    /// # Algorithm
    ///
    /// 1. Seed the dictionary with all `R` single-byte strings
    /// 2. Find the longest dictionary prefix of the remaining input
    /// 3. Emit its code as a `W`-bit word
    /// 4. If input remains and the table has room, add prefix + next byte
    /// 5. Advance past the prefix and repeat
    /// 6. Emit the end-of-stream code `R`
    ///
    /// Returns the number of codewords written, sentinel included.
    pub fn encode_to<W: Write>(&self, input: &[u8], writer: &mut BitWriter<W>) -> Result<u64> {
        let width = self.config.code_width;
        let mut dict = PrefixDictionary::with_alphabet(self.config.alphabet_size);
        let mut next_code = self.config.first_code();
        let mut codewords = 0u64;
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let (len, code) = dict.longest_prefix(rest).ok_or_else(|| {
                OxiPackError::invalid_argument(format!(
                    "byte {:#04x} at offset {pos} is outside the {}-symbol alphabet",
                    rest[0], self.config.alphabet_size
                ))
            })?;

            writer.write_bits(code, width)?;
            codewords += 1;

            if len < rest.len() && next_code < self.config.table_size {
                dict.insert(&rest[..=len], next_code)?;
                next_code += 1;
            }
            pos += len;
        }

        writer.write_bits(self.config.end_of_stream(), width)?;
        codewords += 1;

        debug!(
            input_len = input.len(),
            codewords,
            dictionary_len = dict.len(),
            "lzw encode"
        );
        Ok(codewords)
    }
}
