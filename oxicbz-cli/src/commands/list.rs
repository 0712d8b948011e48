//! List command implementation.

use oxicbz_core::Entry;
use oxicbz_zip::ZipReader;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON serializable entry data for archive listings.
#[derive(Debug, Serialize)]
struct EntryJson {
    name: String,
    size: u64,
    compressed_size: u64,
    method: String,
    crc: u32,
}

impl EntryJson {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.size,
            compressed_size: entry.compressed_size,
            method: entry.method.name().to_string(),
            crc: entry.crc32,
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize)]
struct ArchiveListJson {
    archive: String,
    entries: Vec<EntryJson>,
}

pub fn cmd_list(archive: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let zip = ZipReader::new(BufReader::new(File::open(archive)?))?;
    let entries = zip.entries();

    if json {
        let listing = ArchiveListJson {
            archive: archive.display().to_string(),
            entries: entries.iter().map(EntryJson::from_entry).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Archive: {}", archive.display());
    println!();
    crate::utils::print_entries(entries);
    Ok(())
}
