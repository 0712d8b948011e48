//! Info command implementation.

use oxicbz::ComicInfo;
use std::path::Path;

pub fn cmd_info(archive: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let info = oxicbz::read(archive)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Comic Book Information");
    println!("======================");
    println!("File: {}", archive.display());
    println!("Size: {} bytes", std::fs::metadata(archive)?.len());
    println!();
    print_summary(&info);
    Ok(())
}

fn print_summary(info: &ComicInfo) {
    let field = |label: &str, value: Option<&str>| {
        if let Some(value) = value {
            println!("{:<14} {}", format!("{}:", label), value);
        }
    };
    let list = |label: &str, values: &[String]| {
        if !values.is_empty() {
            println!("{:<14} {}", format!("{}:", label), values.join(", "));
        }
    };

    field("Title", info.title.as_deref());
    field("Series", info.series.as_deref());
    field("Number", info.number.as_deref());
    if let Some(count) = info.count {
        println!("{:<14} {}", "Count:", count);
    }
    if let Some(volume) = info.volume {
        println!("{:<14} {}", "Volume:", volume);
    }
    if let Some(date) = info.date {
        println!("{:<14} {}", "Date:", date);
    }
    list("Writer", &info.writer);
    list("Penciller", &info.penciller);
    list("Cover artist", &info.cover_artist);
    field("Publisher", info.publisher.as_deref());
    list("Genre", &info.genre);
    field("Language", info.language_iso.as_deref());
    if let Some(manga) = info.manga {
        println!("{:<14} {}", "Manga:", manga);
    }
    if let Some(age_rating) = info.age_rating {
        println!("{:<14} {}", "Age rating:", age_rating);
    }
    if let Some(rating) = info.community_rating {
        println!("{:<14} {:.1}", "Rating:", rating);
    }
    println!("{:<14} {}", "Pages:", info.page_count);
    field("Summary", info.summary.as_deref());

    if !info.pages.is_empty() {
        println!();
        println!("{:>5} {:>12} {:>11}  Type", "Page", "Size", "Dimensions");
        println!("{}", "-".repeat(44));
        for page in &info.pages {
            let size = page
                .image_size
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            let dimensions = match (page.image_width, page.image_height) {
                (Some(w), Some(h)) => format!("{}x{}", w, h),
                _ => "-".to_string(),
            };
            let page_type = page.page_type.map_or("Story", |t| t.as_str());
            let spread = if page.double_page == Some(true) {
                " (double)"
            } else {
                ""
            };
            println!(
                "{:>5} {:>12} {:>11}  {}{}",
                page.image, size, dimensions, page_type, spread
            );
        }
    }
}
