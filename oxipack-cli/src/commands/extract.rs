//! Extract command implementation.

use super::compress::decompress_file;
use super::{ARCHIVE_SUFFIX, CompressOptions, HUFFMAN_SUFFIX, LZW_SUFFIX, Method};
use crate::utils::{create_progress_bar, expand_inputs, relocate, strip_suffix};
use oxipack_archive::{Archiver, OverwritePolicy};
use oxipack_core::OxiPackError;
use std::path::Path;
use tracing::info;

/// Decompress or unpack each input according to its extension.
///
/// `.hh` and `.ll` files are restored next to the input (or into `output`);
/// `.zl` archives are unpacked under `output`, defaulting to the current
/// directory. Archive extraction never replaces existing files, so it fails
/// with `InvalidArgument` when asked to overwrite.
pub fn cmd_extract(
    files: &[String],
    output: Option<&Path>,
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = expand_inputs(files)?;
    let pb = create_progress_bar(inputs.len() as u64, options.progress);

    for input in &inputs {
        pb.set_message(input.display().to_string());
        extract_one(input, output, options)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

fn extract_one(
    input: &Path,
    output: Option<&Path>,
    options: &CompressOptions,
) -> Result<(), OxiPackError> {
    let extension = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    let method = match extension {
        HUFFMAN_SUFFIX => Method::Huffman,
        LZW_SUFFIX => Method::Lzw,
        ARCHIVE_SUFFIX => {
            if options.policy == OverwritePolicy::Truncate {
                return Err(OxiPackError::invalid_argument(format!(
                    "{}: --force is not supported for .{ARCHIVE_SUFFIX} archives",
                    input.display()
                )));
            }
            let dest = output.unwrap_or(Path::new("."));
            let written = Archiver::default().extract(input, dest)?;
            info!(
                archive = %input.display(),
                files = written.len(),
                dest = %dest.display(),
                "unpacked"
            );
            return Ok(());
        }
        _ => {
            return Err(OxiPackError::invalid_argument(format!(
                "{}: expected a .{HUFFMAN_SUFFIX}, .{LZW_SUFFIX} or .{ARCHIVE_SUFFIX} file",
                input.display()
            )));
        }
    };

    let restored = strip_suffix(input, method.suffix()).ok_or_else(|| {
        OxiPackError::invalid_argument(format!("{}: no name left to restore", input.display()))
    })?;
    decompress_file(method, input, &relocate(restored, output), options.policy)
}
