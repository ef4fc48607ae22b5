//! LZW configuration: alphabet size, table capacity and codeword width.

use oxipack_core::error::{OxiPackError, Result};

/// LZW configuration parameters.
///
/// Codes `0..R` are the single-byte strings, code `R` is the end-of-stream
/// sentinel, and codes `R+1..L` are assigned as the dictionary grows. Every
/// codeword is written with exactly `W` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Alphabet size `R` (1-256).
    pub alphabet_size: u16,
    /// Table capacity `L`; codes stay below this value.
    pub table_size: u32,
    /// Codeword width `W` in bits, with `2^W >= L`.
    pub code_width: u8,
}

impl LzwConfig {
    /// Standard configuration used by `.ll` and `.zl` files.
    ///
    /// - One-byte alphabet (`R = 256`)
    /// - 4096-entry table
    /// - 12-bit codewords
    pub const DEFAULT: Self = Self {
        alphabet_size: 256,
        table_size: 4096,
        code_width: 12,
    };

    /// Create and validate a configuration.
    pub fn new(alphabet_size: u16, table_size: u32, code_width: u8) -> Result<Self> {
        let config = Self {
            alphabet_size,
            table_size,
            code_width,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the relations between `R`, `L` and `W`.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet_size == 0 || self.alphabet_size > 256 {
            return Err(OxiPackError::invalid_argument(format!(
                "alphabet size {} out of range 1..=256",
                self.alphabet_size
            )));
        }
        if self.code_width == 0 || self.code_width > 32 {
            return Err(OxiPackError::invalid_argument(format!(
                "code width {} out of range 1..=32",
                self.code_width
            )));
        }
        if self.table_size <= self.alphabet_size as u32 {
            return Err(OxiPackError::invalid_argument(format!(
                "table size {} leaves no room for the end-of-stream code {}",
                self.table_size, self.alphabet_size
            )));
        }
        if self.table_size as u64 > 1u64 << self.code_width {
            return Err(OxiPackError::invalid_argument(format!(
                "table size {} does not fit in {}-bit codewords",
                self.table_size, self.code_width
            )));
        }
        Ok(())
    }

    /// End-of-stream sentinel code (`R`).
    pub fn end_of_stream(&self) -> u32 {
        self.alphabet_size as u32
    }

    /// First code handed out to a new dictionary entry (`R + 1`).
    pub fn first_code(&self) -> u32 {
        self.end_of_stream() + 1
    }

    /// Largest code the table may hold (`L - 1`).
    pub fn max_code(&self) -> u32 {
        self.table_size - 1
    }

    /// Archive separator byte, one below the sentinel (`R - 1`).
    pub fn separator(&self) -> u8 {
        (self.alphabet_size - 1) as u8
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
