//! Pack command implementation.

use crate::utils::{create_spinner, expand_inputs};
use oxicbz::{ComicBook, ComicInfo};
use std::fs;
use std::path::Path;

/// Options for packing an archive.
pub struct PackOptions<'a> {
    pub output: &'a Path,
    pub images: &'a [String],
    pub metadata: Option<&'a Path>,
    pub title: Option<String>,
    pub series: Option<String>,
    pub number: Option<String>,
    pub writer: Vec<String>,
    pub describe_pages: bool,
    pub progress: bool,
}

pub fn cmd_pack(options: &PackOptions) -> Result<(), Box<dyn std::error::Error>> {
    let images = expand_inputs(options.images)?;
    if images.is_empty() {
        return Err("no input images".into());
    }

    let info = build_info(options)?;
    let book = if options.describe_pages {
        ComicBook::create(info, images)
    } else {
        ComicBook::new(info, images)
    };

    let spinner = create_spinner(
        format!("Writing {}", options.output.display()),
        options.progress,
    );
    let result = book.write(options.output);
    spinner.finish_and_clear();
    let written = result?;

    println!(
        "Created {} ({} images)",
        written.display(),
        book.images().len()
    );
    Ok(())
}

/// Start from the metadata file, if any, and apply the command-line fields.
fn build_info(options: &PackOptions) -> Result<ComicInfo, Box<dyn std::error::Error>> {
    let mut info = match options.metadata {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ComicInfo::default(),
    };

    if options.title.is_some() {
        info.title = options.title.clone();
    }
    if options.series.is_some() {
        info.series = options.series.clone();
    }
    if options.number.is_some() {
        info.number = options.number.clone();
    }
    if !options.writer.is_empty() {
        info.writer = options.writer.clone();
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options<'a>(output: &'a Path, metadata: Option<&'a Path>) -> PackOptions<'a> {
        PackOptions {
            output,
            images: &[],
            metadata,
            title: None,
            series: None,
            number: None,
            writer: Vec::new(),
            describe_pages: true,
            progress: false,
        }
    }

    #[test]
    fn test_flags_override_metadata_file() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("info.json");
        fs::write(
            &json,
            r#"{"title": "From File", "series": "Kept", "writer": ["File Writer"], "manga": "YesAndRightToLeft"}"#,
        )
        .unwrap();

        let output = dir.path().join("out.cbz");
        let mut opts = options(&output, Some(&json));
        opts.title = Some("From Flag".to_string());
        opts.writer = vec!["Flag Writer".to_string()];

        let info = build_info(&opts).unwrap();
        assert_eq!(info.title.as_deref(), Some("From Flag"));
        assert_eq!(info.series.as_deref(), Some("Kept"));
        assert_eq!(info.writer, ["Flag Writer"]);
        assert_eq!(info.manga, Some(oxicbz::Manga::YesAndRightToLeft));
    }

    #[test]
    fn test_pack_requires_images() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.cbz");
        assert!(cmd_pack(&options(&output, None)).is_err());
        assert!(!output.exists());
    }
}
