//! Verify command implementation.

use oxicbz_zip::ZipReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn cmd_verify(archive: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut zip = ZipReader::new(BufReader::new(File::open(archive)?))?;
    let entries = zip.entries().to_vec();

    println!("Verifying {}", archive.display());

    let mut ok_count = 0usize;
    let mut errors: Vec<(String, String)> = Vec::new();

    for entry in entries.iter().filter(|e| e.is_file()) {
        match zip.extract(entry) {
            Ok(_) => {
                ok_count += 1;
                if verbose {
                    println!("  OK: {}", entry.name);
                }
            }
            Err(e) => {
                println!("  FAILED: {} - {}", entry.name, e);
                errors.push((entry.name.clone(), e.to_string()));
            }
        }
    }

    let metadata = oxicbz::read(archive);
    match &metadata {
        Ok(info) => println!("  Metadata: OK ({} pages)", info.page_count),
        Err(e) => println!("  Metadata: FAILED - {}", e),
    }

    println!();
    println!(
        "{} entries: {} OK, {} failed",
        ok_count + errors.len(),
        ok_count,
        errors.len()
    );

    if !errors.is_empty() {
        return Err(format!("{} of {} entries failed", errors.len(), ok_count + errors.len()).into());
    }
    metadata?;
    Ok(())
}
