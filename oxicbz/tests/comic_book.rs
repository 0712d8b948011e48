mod common;

use image::ImageFormat;
use oxicbz::{ComicBook, ComicInfo, ComicPage, probe_dimensions};
use std::fs;

#[test]
fn create_describes_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let cover = common::image_file(dir.path(), "cover.png", 40, 60, ImageFormat::Png);
    let spread = common::image_file(dir.path(), "spread.jpg", 80, 60, ImageFormat::Jpeg);
    let info = ComicInfo {
        page_count: 99,
        pages: vec![ComicPage::new(7)],
        ..Default::default()
    };

    let book = ComicBook::create(info, [&cover, &spread]);
    let pages = &book.info().pages;
    assert_eq!(book.info().page_count, 2);
    assert_eq!(pages.len(), 2);

    assert_eq!(pages[0].image, 0);
    assert_eq!(pages[0].image_size, Some(fs::metadata(&cover).unwrap().len()));
    assert_eq!((pages[0].image_width, pages[0].image_height), (Some(40), Some(60)));

    assert_eq!(pages[1].image, 1);
    assert_eq!((pages[1].image_width, pages[1].image_height), (Some(80), Some(60)));
    assert_eq!(pages[1].page_type, None);
}

#[test]
fn unreadable_images_still_get_pages() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.jpg");
    fs::write(&broken, b"definitely not a jpeg").unwrap();
    let empty = dir.path().join("empty.png");
    fs::write(&empty, b"").unwrap();

    let book = ComicBook::create(ComicInfo::default(), [&broken, &empty]);
    let pages = &book.info().pages;
    assert_eq!(pages[0].image_size, Some(21));
    assert_eq!(pages[0].image_width, None);
    assert_eq!(pages[1], ComicPage::new(1));
}

#[test]
fn created_book_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let info = ComicInfo {
        title: Some("Probed".to_string()),
        ..Default::default()
    };
    let destination = dir.path().join("probed.cbz");

    let book = ComicBook::create(info, images.clone());
    book.write(&destination).unwrap();

    let read_back = oxicbz::read(&destination).unwrap();
    assert_eq!(&read_back, book.info());
    assert_eq!(read_back.page_count, 3);
    assert_eq!(read_back.pages[1].image_width, Some(32));
}

#[test]
fn new_writes_info_as_given() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let destination = dir.path().join("plain.cbz");

    let book = ComicBook::new(ComicInfo::default(), images);
    book.write(&destination).unwrap();
    let read_back = oxicbz::read(&destination).unwrap();
    assert_eq!(read_back.page_count, 0);
    assert!(read_back.pages.is_empty());
}

#[test]
fn probe_sniffs_content() {
    let dir = tempfile::tempdir().unwrap();
    let jpeg = common::image_file(dir.path(), "page.png", 12, 9, ImageFormat::Jpeg);
    assert_eq!(probe_dimensions(&jpeg), Some((12, 9)));
    assert_eq!(probe_dimensions(dir.path().join("missing.jpg")), None);
}
