mod common;

use oxicbz::{ComicInfo, METADATA_ENTRY, WriterConfig};
use oxicbz_core::CompressionMethod;
use oxicbz_zip::ZipReader;
use std::fs::{self, File};
use std::io::BufReader;

#[test]
fn metadata_survives_archive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let info = common::sample_info();
    let destination = dir.path().join("night-watch-3.cbz");

    let written = oxicbz::write(&info, &images, &destination).unwrap();
    assert_eq!(written, destination);
    assert_eq!(oxicbz::read(&destination).unwrap(), info);
}

#[test]
fn empty_metadata_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("empty.cbz");
    let images: [&str; 0] = [];

    oxicbz::write(&ComicInfo::default(), &images, &destination).unwrap();
    assert_eq!(oxicbz::read(&destination).unwrap(), ComicInfo::default());
}

#[test]
fn entries_are_stored_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let destination = dir.path().join("out").join("book.cbz");

    oxicbz::write(&common::sample_info(), &images, &destination).unwrap();

    let mut archive = ZipReader::new(BufReader::new(File::open(&destination).unwrap())).unwrap();
    let names: Vec<&str> = archive.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, [METADATA_ENTRY, "001.jpg", "002.png", "003.jpg"]);
    assert!(
        archive
            .entries()
            .iter()
            .all(|e| e.method == CompressionMethod::Stored && e.size == e.compressed_size)
    );

    let entries = archive.entries().to_vec();
    for (entry, image) in entries[1..].iter().zip(&images) {
        assert_eq!(archive.extract(entry).unwrap(), fs::read(image).unwrap());
    }
}

#[test]
fn identical_input_gives_identical_archives() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let info = common::sample_info();
    let first = dir.path().join("first.cbz");
    let second = dir.path().join("second.cbz");

    oxicbz::write(&info, &images, &first).unwrap();
    oxicbz::write(&info, &images, &second).unwrap();
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn streamed_and_buffered_images_give_identical_archives() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let info = common::sample_info();
    let buffered = dir.path().join("buffered.cbz");
    let streamed = dir.path().join("streamed.cbz");

    oxicbz::write_with_config(&info, &images, &buffered, &WriterConfig::FAST).unwrap();
    oxicbz::write_with_config(&info, &images, &streamed, &WriterConfig::LOW_MEMORY).unwrap();
    assert_eq!(fs::read(buffered).unwrap(), fs::read(streamed).unwrap());
}

#[test]
fn zip_extension_is_accepted_in_any_case() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("BOOK.ZIP");
    let images = common::pages(dir.path());

    oxicbz::write(&common::sample_info(), &images, &destination).unwrap();
    assert_eq!(oxicbz::read(&destination).unwrap().title.as_deref(), Some("The Long Night"));
}

#[test]
fn temp_files_are_not_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::pages(dir.path());
    let config = WriterConfig::new().temp_prefix("pending-").temp_suffix(".part");

    oxicbz::write_with_config(
        &common::sample_info(),
        &images,
        dir.path().join("book.cbz"),
        &config,
    )
    .unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("pending-"))
        .collect();
    assert!(leftovers.is_empty());
}
