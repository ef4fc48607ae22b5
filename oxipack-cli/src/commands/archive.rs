//! Archive creation command.

use super::ARCHIVE_SUFFIX;
use crate::utils::{expand_inputs, with_suffix};
use oxipack_archive::{Archiver, OverwritePolicy};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pack `files` into `archive`, appending `.zl` if it is missing.
pub fn cmd_archive(
    archive: &Path,
    files: &[String],
    policy: OverwritePolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let archive = archive_name(archive);
    let inputs = expand_inputs(files)?;
    let count = Archiver::default().create(&archive, &inputs, policy)?;

    info!(archive = %archive.display(), files = count, "created archive");
    Ok(())
}

fn archive_name(archive: &Path) -> PathBuf {
    if archive.extension().is_some_and(|e| e == ARCHIVE_SUFFIX) {
        archive.to_path_buf()
    } else {
        with_suffix(archive, ARCHIVE_SUFFIX)
    }
}
