#![allow(dead_code)]

use chrono::NaiveDate;
use image::{ImageFormat, Rgb, RgbImage};
use oxicbz::{AgeRating, ComicInfo, ComicPage, ComicPageType, Manga, YesNo};
use std::path::{Path, PathBuf};

/// Write a solid-colour image of the given size and format.
pub fn image_file(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 40, 90]))
        .save_with_format(&path, format)
        .unwrap();
    path
}

/// Three small page images: two JPEG, one PNG.
pub fn pages(dir: &Path) -> Vec<PathBuf> {
    vec![
        image_file(dir, "001.jpg", 16, 24, ImageFormat::Jpeg),
        image_file(dir, "002.png", 32, 24, ImageFormat::Png),
        image_file(dir, "003.jpg", 16, 24, ImageFormat::Jpeg),
    ]
}

/// Metadata with most fields set.
pub fn sample_info() -> ComicInfo {
    ComicInfo {
        title: Some("The Long Night".to_string()),
        series: Some("Night Watch".to_string()),
        number: Some("3".to_string()),
        count: Some(12),
        volume: Some(2),
        alternate_series: Some("Crossover Event".to_string()),
        alternate_number: Some("7".to_string()),
        alternate_count: Some(9),
        summary: Some("A city without daylight & the people who guard it.".to_string()),
        notes: Some("Scanned from print".to_string()),
        date: NaiveDate::from_ymd_opt(2021, 10, 31),
        writer: vec!["A. Writer".to_string(), "B. Writer".to_string()],
        penciller: vec!["C. Penciller".to_string()],
        inker: vec!["D. Inker".to_string()],
        colorist: vec!["E. Colorist".to_string()],
        letterer: vec!["F. Letterer".to_string()],
        cover_artist: vec!["G. Cover".to_string()],
        editor: vec!["H. Editor".to_string()],
        translator: vec!["I. Translator".to_string()],
        publisher: Some("Lantern Press".to_string()),
        imprint: Some("Lantern Noir".to_string()),
        genre: vec!["Horror".to_string(), "Mystery".to_string()],
        tags: vec!["night".to_string(), "city".to_string()],
        web: vec![
            "https://example.com/night-watch/3".to_string(),
            "https://example.org/reviews/nw3".to_string(),
        ],
        page_count: 3,
        language_iso: Some("en".to_string()),
        format: Some("Trade Paperback".to_string()),
        black_and_white: Some(YesNo::No),
        manga: Some(Manga::No),
        characters: vec!["Warden".to_string(), "Lamplighter".to_string()],
        teams: vec!["Night Watch".to_string()],
        locations: vec!["Old Town".to_string()],
        scan_information: Some("600dpi".to_string()),
        story_arc: vec!["Darkfall".to_string()],
        story_arc_number: vec!["3".to_string()],
        series_group: vec!["Lantern Universe".to_string()],
        age_rating: Some(AgeRating::Teen),
        pages: vec![
            ComicPage {
                page_type: Some(ComicPageType::FrontCover),
                image_size: Some(1024),
                image_width: Some(16),
                image_height: Some(24),
                ..ComicPage::new(0)
            },
            ComicPage {
                double_page: Some(true),
                key: Some("spread".to_string()),
                bookmark: Some("Chapter 1".to_string()),
                ..ComicPage::new(1)
            },
            ComicPage::new(2),
        ],
        community_rating: Some(4.5),
        main_character_or_team: Some("Warden".to_string()),
        review: Some("Moody and tense.".to_string()),
        gtin: Some("9781234567897".to_string()),
    }
}
