//! Command implementations for OxiPack CLI.

pub mod archive;
pub mod compress;
pub mod extract;
pub mod list;

pub use archive::cmd_archive;
pub use compress::cmd_compress;
pub use extract::cmd_extract;
pub use list::cmd_list;

use oxipack_core::OverwritePolicy;

/// File suffix of Huffman-compressed files.
pub const HUFFMAN_SUFFIX: &str = "hh";
/// File suffix of LZW-compressed files.
pub const LZW_SUFFIX: &str = "ll";
/// File suffix of archives.
pub const ARCHIVE_SUFFIX: &str = "zl";

/// Single-file codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Static Huffman coding (`.hh`)
    Huffman,
    /// LZW with the default parameters (`.ll`)
    Lzw,
}

impl Method {
    /// Suffix appended on compression.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Huffman => HUFFMAN_SUFFIX,
            Self::Lzw => LZW_SUFFIX,
        }
    }
}

/// Options shared by the multi-file commands.
#[derive(Debug, Clone, Copy)]
pub struct CompressOptions {
    pub policy: OverwritePolicy,
    pub progress: bool,
}
