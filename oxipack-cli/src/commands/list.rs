//! List command implementation.

use oxipack_archive::{Archiver, EntryInfo};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable entry data for archive listings.
///
/// Names that are not valid UTF-8 are shown with replacement characters.
#[derive(Debug, Serialize, Deserialize)]
struct EntryJson {
    name: String,
    size: u64,
}

impl From<&EntryInfo> for EntryJson {
    fn from(info: &EntryInfo) -> Self {
        Self {
            name: info.display_name().into_owned(),
            size: info.size,
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize, Deserialize)]
struct ArchiveListJson {
    archive: String,
    total_size: u64,
    entries: Vec<EntryJson>,
}

impl ArchiveListJson {
    fn new(archive: &Path, entries: &[EntryInfo]) -> Self {
        Self {
            archive: archive.display().to_string(),
            total_size: entries.iter().map(|e| e.size).sum(),
            entries: entries.iter().map(EntryJson::from).collect(),
        }
    }
}

pub fn cmd_list(archive: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries = Archiver::default().list(archive)?;

    if json {
        let listing = ArchiveListJson::new(archive, &entries);
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Archive: {}", archive.display());
    println!();
    println!("{:>10}  Name", "Size");
    println!("{}", "-".repeat(40));
    for entry in &entries {
        println!("{:>10}  {}", entry.size, entry.display_name());
    }
    println!("{}", "-".repeat(40));
    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!("{:>10}  {} files", total, entries.len());

    Ok(())
}
