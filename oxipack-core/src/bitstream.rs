//! Bit-level I/O operations for the OxiPack codecs.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level. Every on-disk format in OxiPack (Huffman, LZW and
//! archive streams) goes through this pair.
//!
//! # Bit Ordering
//!
//! All formats use MSB-first ordering: the first bit written lands in the
//! most significant position of its byte, and multi-byte integers are
//! big-endian. A final partial byte is padded with zero bits on the low end.
//! Padding is never self-describing; formats carry their own length or
//! end-of-stream marker.
//!
//! # Example
//!
//! ```
//! use oxipack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//!     writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output)).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiPackError, Result};
use crate::fs::{OverwritePolicy, create_output, open_input};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Maximum number of bits accepted by `read_bits`/`write_bits`.
pub const MAX_BITS: u8 = 32;

fn check_width(width: u8) -> Result<()> {
    if width == 0 || width > MAX_BITS {
        return Err(OxiPackError::invalid_argument(format!(
            "bit width {width} out of range 1..={MAX_BITS}"
        )));
    }
    Ok(())
}

/// A bit-level reader that wraps any `Read` implementation.
///
/// The reader keeps a one-byte lookahead: the byte currently being consumed
/// is always fetched ahead of time, so [`BitReader::is_exhausted`] reports
/// whether the *next* read would fail without touching the source.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Byte currently being consumed.
    buffer: u8,
    /// Unread bits remaining in `buffer` (low end), `0..=8`.
    bits_in_buffer: u8,
    /// Source has no more bytes and `buffer` is spent.
    exhausted: bool,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl BitReader<BufReader<File>> {
    /// Open a regular file for bit-level reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(open_input(path)?)
    }
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    ///
    /// The first byte is fetched immediately to prime the lookahead.
    pub fn new(reader: R) -> Result<Self> {
        let mut this = Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            exhausted: false,
            total_bits_read: 0,
        };
        this.fill()?;
        Ok(this)
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Whether the next read would fail because no bits remain.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether the read position sits on a byte boundary.
    pub fn is_aligned(&self) -> bool {
        self.exhausted || self.bits_in_buffer == 8
    }

    fn fill(&mut self) -> Result<()> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    self.bits_in_buffer = 0;
                    return Ok(());
                }
                Ok(_) => {
                    self.buffer = byte[0];
                    self.bits_in_buffer = 8;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn eos(&self) -> OxiPackError {
        OxiPackError::end_of_stream(self.total_bits_read)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.exhausted {
            return Err(self.eos());
        }

        self.bits_in_buffer -= 1;
        let bit = (self.buffer >> self.bits_in_buffer) & 1 == 1;
        self.total_bits_read += 1;

        if self.bits_in_buffer == 0 {
            self.fill()?;
        }
        Ok(bit)
    }

    /// Read 8 bits as a byte.
    ///
    /// On a byte boundary this hands out the lookahead byte directly;
    /// otherwise the byte is stitched together from the tail of the current
    /// byte and the head of the next one.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.exhausted {
            return Err(self.eos());
        }

        if self.bits_in_buffer == 8 {
            let byte = self.buffer;
            self.total_bits_read += 8;
            self.fill()?;
            return Ok(byte);
        }

        let n = self.bits_in_buffer;
        let high = (self.buffer & ((1u8 << n) - 1)) << (8 - n);
        self.fill()?;
        if self.exhausted {
            return Err(self.eos());
        }
        let low = self.buffer >> n;
        self.bits_in_buffer = n;
        self.total_bits_read += 8;
        Ok(high | low)
    }

    /// Read `width` bits (1-32), most significant bit first.
    pub fn read_bits(&mut self, width: u8) -> Result<u32> {
        check_width(width)?;

        let mut value = 0u32;
        let mut remaining = width;
        while remaining > 0 {
            if remaining >= 8 {
                value = (value << 8) | self.read_byte()? as u32;
                remaining -= 8;
            } else {
                value = (value << 1) | self.read_bit()? as u32;
                remaining -= 1;
            }
        }
        Ok(value)
    }

    /// Read a big-endian 32-bit integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bits(32)
    }

    /// Read a big-endian 64-bit integer.
    pub fn read_u64(&mut self) -> Result<u64> {
        let high = self.read_u32()? as u64;
        let low = self.read_u32()? as u64;
        Ok((high << 32) | low)
    }

    /// Read exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        // Length fields come from untrusted input; grow as bytes arrive.
        let mut out = Vec::with_capacity(len.min(64 * 1024));
        for _ in 0..len {
            out.push(self.read_byte()?);
        }
        Ok(out)
    }

    /// Read every remaining byte.
    ///
    /// Fails with [`OxiPackError::EndOfStream`] if the stream ends in the
    /// middle of a byte.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        while !self.exhausted {
            out.push(self.read_byte()?);
        }
        Ok(out)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in a one-byte buffer and hands complete
/// bytes to the underlying writer. Call `flush()` when done to write any
/// remaining partial byte; dropping the writer performs a best-effort flush
/// so a partially written stream stays byte-complete on error paths.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits, right-aligned.
    buffer: u8,
    /// Number of pending bits in buffer, `0..8`.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl BitWriter<BufWriter<File>> {
    /// Create a destination file for bit-level writing.
    pub fn create(path: impl AsRef<Path>, policy: OverwritePolicy) -> Result<Self> {
        Ok(Self::new(create_output(path, policy)?))
    }
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | bit as u8;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        Ok(())
    }

    /// Write 8 bits.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        let n = self.bits_in_buffer;
        if n == 0 {
            self.writer.write_all(&[byte])?;
        } else {
            let out = (self.buffer << (8 - n)) | (byte >> n);
            self.writer.write_all(&[out])?;
            self.buffer = byte & ((1u8 << n) - 1);
        }
        self.total_bits_written += 8;
        Ok(())
    }

    /// Write the low `width` bits (1-32) of `value`, most significant first.
    ///
    /// Fails with [`OxiPackError::InvalidArgument`] if `value` does not fit
    /// in `width` bits.
    pub fn write_bits(&mut self, value: u32, width: u8) -> Result<()> {
        check_width(width)?;
        if width < MAX_BITS && value >> width != 0 {
            return Err(OxiPackError::invalid_argument(format!(
                "value {value} does not fit in {width} bits"
            )));
        }

        let mut remaining = width;
        while remaining >= 8 {
            remaining -= 8;
            self.write_byte((value >> remaining) as u8)?;
        }
        while remaining > 0 {
            remaining -= 1;
            self.write_bit((value >> remaining) & 1 == 1)?;
        }
        Ok(())
    }

    /// Write a big-endian 32-bit integer.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bits(value, 32)
    }

    /// Write a big-endian 64-bit integer.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_u32((value >> 32) as u32)?;
        self.write_u32(value as u32)
    }

    /// Write a run of bytes.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        if self.bits_in_buffer == 0 {
            self.writer.write_all(buf)?;
            self.total_bits_written += buf.len() as u64 * 8;
            return Ok(());
        }
        for &byte in buf {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Flush any remaining bits to the underlying writer.
    ///
    /// A partial final byte is padded with zero bits on the low end.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let out = self.buffer << (8 - self.bits_in_buffer);
            self.writer.write_all(&[out])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &[u8]) -> BitReader<Cursor<&[u8]>> {
        BitReader::new(Cursor::new(data)).unwrap()
    }

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let mut reader = reader(&[0xB5]);

        assert!(reader.read_bit().unwrap()); // MSB first
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(!reader.is_exhausted());
        assert!(reader.read_bit().unwrap());
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = reader(&[0xFF]);
        assert_eq!(reader.read_byte().unwrap(), 0xFF);
        assert!(matches!(
            reader.read_bit(),
            Err(OxiPackError::EndOfStream { bit_position: 8 })
        ));
        assert!(reader.read_byte().is_err());
    }

    #[test]
    fn test_empty_source_is_exhausted() {
        let reader = reader(&[]);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_unaligned_byte_read() {
        let mut reader = reader(&[0b1010_1100, 0b0101_0000]);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1010);
        assert_eq!(reader.read_byte().unwrap(), 0b1100_0101);
        assert_eq!(reader.read_bits(4).unwrap(), 0);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_alignment_tracks_lookahead() {
        let mut reader = reader(&[0xAB, 0xCD]);
        assert!(reader.is_aligned());
        reader.read_bit().unwrap();
        assert!(!reader.is_aligned());
        reader.read_bits(7).unwrap();
        assert!(reader.is_aligned());
        assert_eq!(reader.read_bits(3).unwrap(), 0b110);
        assert!(!reader.is_aligned());
        reader.read_bits(5).unwrap();
        assert!(reader.is_exhausted());
        assert!(reader.is_aligned());
    }

    #[test]
    fn test_unaligned_byte_read_at_end() {
        let mut reader = reader(&[0xFF]);
        reader.read_bit().unwrap();
        assert!(matches!(
            reader.read_byte(),
            Err(OxiPackError::EndOfStream { .. })
        ));
    }

    #[test]
    fn test_read_integers() {
        let data = [0x12, 0x34, 0x56, 0x78, 0, 0, 0, 0, 0, 0, 0x01, 0x02];
        let mut reader = reader(&data);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_u64().unwrap(), 0x0102);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_bits_width_checked() {
        let mut reader = reader(&[0; 8]);
        assert!(matches!(
            reader.read_bits(0),
            Err(OxiPackError::InvalidArgument { .. })
        ));
        assert!(matches!(
            reader.read_bits(33),
            Err(OxiPackError::InvalidArgument { .. })
        ));
        assert_eq!(reader.bits_read(), 0);
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            for bit in [true, false, true, true, false, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_flush_pads_low_bits() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b11, 2).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0b1100_0000]);
    }

    #[test]
    fn test_drop_flushes_partial_byte() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bit(true).unwrap();
        }
        assert_eq!(output, vec![0x80]);
    }

    #[test]
    fn test_write_bits_rejects_bad_input() {
        let mut output = Vec::new();
        let mut writer = BitWriter::new(&mut output);
        assert!(matches!(
            writer.write_bits(0, 0),
            Err(OxiPackError::InvalidArgument { .. })
        ));
        assert!(matches!(
            writer.write_bits(0, 33),
            Err(OxiPackError::InvalidArgument { .. })
        ));
        assert!(matches!(
            writer.write_bits(256, 8),
            Err(OxiPackError::InvalidArgument { .. })
        ));
        assert!(writer.write_bits(u32::MAX, 32).is_ok());
        assert_eq!(writer.bits_written(), 32);
    }

    #[test]
    fn test_integers_big_endian() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_u32(0x0A0B_0C0D).unwrap();
            writer.write_u64(0x0102_0304_0506_0708).unwrap();
        }
        assert_eq!(
            output,
            vec![0x0A, 0x0B, 0x0C, 0x0D, 1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_roundtrip_mixed_widths() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_byte(0xA7).unwrap();
            writer.write_bits(4095, 12).unwrap();
            writer.write_u32(0xDEAD_BEEF).unwrap();
            writer.write_bytes(b"xy").unwrap();
            writer.write_bit(true).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = reader(&output);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_byte().unwrap(), 0xA7);
        assert_eq!(reader.read_bits(12).unwrap(), 4095);
        assert_eq!(reader.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_bytes(2).unwrap(), b"xy");
        assert!(reader.read_bit().unwrap());
        // 72 bits, so no padding byte
        assert_eq!(output.len(), 9);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_to_end() {
        let mut reader = reader(b"hello");
        assert_eq!(reader.read_byte().unwrap(), b'h');
        assert_eq!(reader.read_to_end().unwrap(), b"ello");
        assert!(reader.read_to_end().unwrap().is_empty());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bits.bin");
        {
            let mut writer = BitWriter::create(&path, OverwritePolicy::FailIfExists).unwrap();
            writer.write_bits(0x2A, 7).unwrap();
        }
        assert!(matches!(
            BitWriter::create(&path, OverwritePolicy::FailIfExists),
            Err(OxiPackError::AlreadyExists { .. })
        ));

        let mut reader = BitReader::open(&path).unwrap();
        assert_eq!(reader.read_bits(7).unwrap(), 0x2A);
        assert!(!reader.read_bit().unwrap());
        assert!(reader.is_exhausted());
    }
}
