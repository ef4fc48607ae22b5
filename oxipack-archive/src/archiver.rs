//! LZW-compressed archives (`.zl`).

use crate::entry::{ArchiveEntry, EntryInfo};
use crate::frame;
use oxipack_core::bitstream::{BitReader, BitWriter};
use oxipack_core::error::Result;
use oxipack_core::fs::{self, OverwritePolicy};
use oxipack_lzw::{LzwConfig, LzwDecoder, LzwEncoder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Packs files into LZW-compressed archives and unpacks them again.
#[derive(Debug, Clone)]
pub struct Archiver {
    config: LzwConfig,
}

impl Default for Archiver {
    fn default() -> Self {
        Self {
            config: LzwConfig::DEFAULT,
        }
    }
}

impl Archiver {
    /// Create an archiver using the given LZW parameters.
    ///
    /// The frame separator is `R - 1`.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Frame and compress entries into archive bytes.
    pub fn pack(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
        let blob = frame::frame_entries(entries, self.config.separator())?;
        LzwEncoder::new(self.config)?.encode(&blob)
    }

    /// Decompress archive bytes and split them into entries.
    pub fn unpack(&self, archive: &[u8]) -> Result<Vec<ArchiveEntry>> {
        let blob = LzwDecoder::new(self.config)?.decode(archive)?;
        frame::unframe_entries(&blob, self.config.separator())
    }

    /// Read each path into an entry, in order.
    ///
    /// Every input is checked before any archive is written, so a missing
    /// file or directory argument leaves no partial archive behind.
    pub fn read_file_entries<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ArchiveEntry>> {
        paths.iter().map(ArchiveEntry::from_path).collect()
    }

    /// Archive `files` into `archive_path`.
    ///
    /// Returns the number of entries written.
    pub fn create<P: AsRef<Path>>(
        &self,
        archive_path: impl AsRef<Path>,
        files: &[P],
        policy: OverwritePolicy,
    ) -> Result<usize> {
        let archive_path = archive_path.as_ref();
        let entries = Self::read_file_entries(files)?;
        let blob = frame::frame_entries(&entries, self.config.separator())?;

        let encoder = LzwEncoder::new(self.config)?;
        let mut writer = BitWriter::create(archive_path, policy)?;
        let codewords = encoder.encode_to(&blob, &mut writer)?;
        writer.flush()?;

        debug!(
            archive = %archive_path.display(),
            entries = entries.len(),
            blob_len = blob.len(),
            codewords,
            "created archive"
        );
        Ok(entries.len())
    }

    /// Read every entry of an archive file.
    pub fn read_entries(&self, archive_path: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>> {
        let mut reader = BitReader::open(archive_path)?;
        let blob = LzwDecoder::new(self.config)?.decode_from(&mut reader)?;
        frame::unframe_entries(&blob, self.config.separator())
    }

    /// Extract an archive file under `dest_dir`.
    ///
    /// Entry names are resolved relative to `dest_dir`; parent directories
    /// are created as needed. All names are checked before anything is
    /// written. An existing destination file fails with `AlreadyExists`.
    /// Returns the paths written, in archive order.
    pub fn extract(
        &self,
        archive_path: impl AsRef<Path>,
        dest_dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let archive_path = archive_path.as_ref();
        let dest_dir = dest_dir.as_ref();
        let entries = self.read_entries(archive_path)?;

        let targets = entries
            .iter()
            .map(|entry| entry.extraction_path().map(|p| dest_dir.join(p)))
            .collect::<Result<Vec<_>>>()?;

        for (entry, target) in entries.iter().zip(&targets) {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut output = fs::create_output(target, OverwritePolicy::FailIfExists)?;
            output.write_all(&entry.content)?;
            output.flush()?;
        }

        debug!(
            archive = %archive_path.display(),
            entries = entries.len(),
            dest = %dest_dir.display(),
            "extracted archive"
        );
        Ok(targets)
    }

    /// List entry names and sizes of an archive file.
    pub fn list(&self, archive_path: impl AsRef<Path>) -> Result<Vec<EntryInfo>> {
        Ok(self
            .read_entries(archive_path)?
            .iter()
            .map(ArchiveEntry::info)
            .collect())
    }
}
