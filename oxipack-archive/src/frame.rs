//! Entry framing inside the uncompressed archive blob.
//!
//! # Frame Layout
//!
//! ```text
//! name_len (32) | sep | name | sep | size (64) | sep | content | [sep]
//! ```
//!
//! Integers are big-endian. `sep` is the configured separator byte and
//! follows every entry except the last. The whole blob is then LZW encoded.

use crate::entry::ArchiveEntry;
use oxipack_core::bitstream::{BitReader, BitWriter};
use oxipack_core::error::{OxiPackError, Result};
use std::io::{Read, Write};
use tracing::trace;

/// Write all entries as consecutive frames.
pub fn write_frames<W: Write>(
    entries: &[ArchiveEntry],
    separator: u8,
    writer: &mut BitWriter<W>,
) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        let name_len = u32::try_from(entry.name.len()).map_err(|_| {
            OxiPackError::invalid_argument(format!(
                "entry name of {} bytes is too long",
                entry.name.len()
            ))
        })?;

        writer.write_u32(name_len)?;
        writer.write_byte(separator)?;
        writer.write_bytes(&entry.name)?;
        writer.write_byte(separator)?;
        writer.write_u64(entry.size())?;
        writer.write_byte(separator)?;
        writer.write_bytes(&entry.content)?;
        if index + 1 < entries.len() {
            writer.write_byte(separator)?;
        }

        trace!(name = %entry.display_name(), size = entry.size(), "framed entry");
    }
    Ok(())
}

/// Serialize entries into a fresh blob.
pub fn frame_entries(entries: &[ArchiveEntry], separator: u8) -> Result<Vec<u8>> {
    let mut blob = Vec::new();
    {
        let mut writer = BitWriter::new(&mut blob);
        write_frames(entries, separator, &mut writer)?;
        writer.flush()?;
    }
    Ok(blob)
}

/// Read frames until the stream ends.
///
/// The separator after the last entry is optional. Any other byte where a
/// separator belongs or a frame cut short fails with
/// [`OxiPackError::CorruptData`]. Names are returned as raw bytes.
pub fn read_frames<R: Read>(reader: &mut BitReader<R>, separator: u8) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();

    while !reader.is_exhausted() {
        let entry = read_frame(reader, separator).map_err(|e| e.truncated("archive frame"))?;
        trace!(name = %entry.display_name(), size = entry.size(), "unframed entry");
        entries.push(entry);

        if reader.is_exhausted() {
            break;
        }
        expect_separator(reader, separator)?;
    }

    Ok(entries)
}

fn read_frame<R: Read>(reader: &mut BitReader<R>, separator: u8) -> Result<ArchiveEntry> {
    let name_len = reader.read_u32()? as usize;
    expect_separator(reader, separator)?;

    let name = reader.read_bytes(name_len)?;
    expect_separator(reader, separator)?;

    let size = usize::try_from(reader.read_u64()?).map_err(|_| {
        OxiPackError::corrupted(reader.bits_read(), "entry size exceeds addressable memory")
    })?;
    expect_separator(reader, separator)?;

    let content = reader.read_bytes(size)?;
    Ok(ArchiveEntry { name, content })
}

fn expect_separator<R: Read>(reader: &mut BitReader<R>, separator: u8) -> Result<()> {
    let offset = reader.bits_read();
    let byte = reader.read_byte()?;
    if byte != separator {
        return Err(OxiPackError::corrupted(
            offset,
            format!("expected separator {separator:#04x}, found {byte:#04x}"),
        ));
    }
    Ok(())
}

/// Parse a blob produced by [`frame_entries`].
pub fn unframe_entries(blob: &[u8], separator: u8) -> Result<Vec<ArchiveEntry>> {
    let mut reader = BitReader::new(std::io::Cursor::new(blob))?;
    read_frames(&mut reader, separator)
}
