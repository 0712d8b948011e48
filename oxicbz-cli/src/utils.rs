//! Utility functions for the CLI.

use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use oxicbz_core::Entry;
use std::path::PathBuf;
use std::time::Duration;

/// Create a spinner with standard styling.
pub fn create_spinner(message: String, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Expand command-line inputs into file paths, keeping argument order.
///
/// Arguments containing glob metacharacters are expanded and their matches
/// sorted; anything else is taken literally so a missing file is reported by
/// the writer with its position.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(input));
            continue;
        }

        let mut matches = glob(input)?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect::<Vec<_>>();
        if matches.is_empty() {
            return Err(format!("pattern matched no files: {}", input).into());
        }
        matches.sort();
        paths.extend(matches);
    }
    Ok(paths)
}

/// Print entries in a formatted table.
pub fn print_entries(entries: &[Entry]) {
    println!("{:>10} {:>8} {:>8}  Name", "Size", "Method", "CRC-32");
    println!("{}", "-".repeat(50));

    let mut total_size = 0u64;
    for entry in entries {
        println!(
            "{:>10} {:>8} {:08x}  {}",
            entry.size,
            entry.method.name(),
            entry.crc32,
            entry.name
        );
        total_size += entry.size;
    }

    println!("{}", "-".repeat(50));
    println!("{:>10} {:>8} {:>8}  {} entries", total_size, "", "", entries.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_inputs_sorts_glob_matches() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["010.jpg", "002.jpg", "001.jpg", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let cover = dir.path().join("cover.png");
        fs::write(&cover, b"x").unwrap();

        let inputs = [
            cover.display().to_string(),
            dir.path().join("*.jpg").display().to_string(),
        ];
        let paths = expand_inputs(&inputs).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["cover.png", "001.jpg", "002.jpg", "010.jpg"]);
    }

    #[test]
    fn test_expand_inputs_keeps_literal_paths() {
        let paths = expand_inputs(&["missing/page.jpg".to_string()]).unwrap();
        assert_eq!(paths, [PathBuf::from("missing/page.jpg")]);
    }

    #[test]
    fn test_expand_inputs_rejects_empty_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.webp").display().to_string();
        assert!(expand_inputs(&[pattern]).is_err());
    }
}
