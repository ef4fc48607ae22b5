//! Single-file Huffman/LZW compression and decompression.

use super::{CompressOptions, Method};
use crate::utils::{create_progress_bar, expand_inputs, with_suffix};
use oxipack_core::error::Result;
use oxipack_core::fs::{self, OverwritePolicy};
use oxipack_core::{BitReader, BitWriter};
use oxipack_lzw::{LzwConfig, LzwDecoder, LzwEncoder};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Compress each input to `<input>.<suffix>`.
pub fn cmd_compress(
    method: Method,
    files: &[String],
    options: &CompressOptions,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let inputs = expand_inputs(files)?;
    let pb = create_progress_bar(inputs.len() as u64, options.progress);

    for input in &inputs {
        pb.set_message(input.display().to_string());
        let output = with_suffix(input, method.suffix());
        compress_file(method, input, &output, options.policy)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

/// Compress one file into `output`.
pub fn compress_file(
    method: Method,
    input: &Path,
    output: &Path,
    policy: OverwritePolicy,
) -> Result<()> {
    let data = fs::read_input(input)?;
    let mut writer = BitWriter::create(output, policy)?;

    match method {
        Method::Huffman => oxipack_huffman::encode_to(&data, &mut writer)?,
        Method::Lzw => {
            LzwEncoder::new(LzwConfig::DEFAULT)?.encode_to(&data, &mut writer)?;
        }
    }
    writer.flush()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        input_len = data.len(),
        output_bits = writer.bits_written(),
        "compressed"
    );
    Ok(())
}

/// Decompress one file into `output`.
pub fn decompress_file(
    method: Method,
    input: &Path,
    output: &Path,
    policy: OverwritePolicy,
) -> Result<()> {
    let mut reader = BitReader::open(input)?;
    let data = match method {
        Method::Huffman => oxipack_huffman::decode_from(&mut reader)?,
        Method::Lzw => LzwDecoder::new(LzwConfig::DEFAULT)?.decode_from(&mut reader)?,
    };

    let mut writer = fs::create_output(output, policy)?;
    writer.write_all(&data)?;
    writer.flush()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        output_len = data.len(),
        "decompressed"
    );
    Ok(())
}
