//! Conversions between the domain model and the wire model.
//!
//! Both directions are total except for the community rating, which must
//! land in `[0.0, 5.0]` after rounding. Values the schema cannot tell apart
//! from its own defaults are normalised on the way back in:
//!
//! - blank text reads as `None`
//! - counts, volume and page dimensions of zero or below read as `None`
//! - `DoublePage="false"` and page type `Story` read as `None`

use crate::error::MetadataError;
use crate::model::{ComicInfo, ComicPage, ComicPageType};
use crate::rating::Rating;
use crate::wire::{ComicInfoXml, ComicPageXml, PagesXml, UNKNOWN_INT};
use chrono::{Datelike, NaiveDate};

const LIST_SEPARATOR: &str = ",";
const WEB_SEPARATOR: &str = " ";

/// Map domain metadata onto the schema's wire form.
pub(crate) fn to_wire(info: &ComicInfo) -> Result<ComicInfoXml, MetadataError> {
    let (year, month, day) = match info.date {
        Some(date) => (date.year(), date.month() as i32, date.day() as i32),
        None => (UNKNOWN_INT, UNKNOWN_INT, UNKNOWN_INT),
    };
    let community_rating = info.community_rating.map(Rating::from_f64).transpose()?;
    let pages = if info.pages.is_empty() {
        None
    } else {
        Some(PagesXml {
            page: info.pages.iter().map(page_to_wire).collect(),
        })
    };

    Ok(ComicInfoXml {
        xmlns_xsi: (),
        xmlns_xsd: (),
        title: text_out(&info.title),
        series: text_out(&info.series),
        number: text_out(&info.number),
        count: count_out(info.count),
        volume: count_out(info.volume),
        alternate_series: text_out(&info.alternate_series),
        alternate_number: text_out(&info.alternate_number),
        alternate_count: count_out(info.alternate_count),
        summary: text_out(&info.summary),
        notes: text_out(&info.notes),
        year,
        month,
        day,
        writer: info.writer.join(LIST_SEPARATOR),
        penciller: info.penciller.join(LIST_SEPARATOR),
        inker: info.inker.join(LIST_SEPARATOR),
        colorist: info.colorist.join(LIST_SEPARATOR),
        letterer: info.letterer.join(LIST_SEPARATOR),
        cover_artist: info.cover_artist.join(LIST_SEPARATOR),
        editor: info.editor.join(LIST_SEPARATOR),
        translator: info.translator.join(LIST_SEPARATOR),
        publisher: text_out(&info.publisher),
        imprint: text_out(&info.imprint),
        genre: info.genre.join(LIST_SEPARATOR),
        tags: info.tags.join(LIST_SEPARATOR),
        web: info.web.join(WEB_SEPARATOR),
        page_count: i32::try_from(info.page_count).unwrap_or(i32::MAX),
        language_iso: text_out(&info.language_iso),
        format: text_out(&info.format),
        black_and_white: info.black_and_white.into(),
        manga: info.manga.into(),
        characters: info.characters.join(LIST_SEPARATOR),
        teams: info.teams.join(LIST_SEPARATOR),
        locations: info.locations.join(LIST_SEPARATOR),
        scan_information: text_out(&info.scan_information),
        story_arc: info.story_arc.join(LIST_SEPARATOR),
        story_arc_number: info.story_arc_number.join(LIST_SEPARATOR),
        series_group: info.series_group.join(LIST_SEPARATOR),
        age_rating: info.age_rating.into(),
        pages,
        community_rating,
        main_character_or_team: text_out(&info.main_character_or_team),
        review: text_out(&info.review),
        gtin: text_out(&info.gtin),
    })
}

/// Map a decoded wire document back to domain metadata.
pub(crate) fn from_wire(wire: ComicInfoXml) -> ComicInfo {
    ComicInfo {
        title: text_in(wire.title),
        series: text_in(wire.series),
        number: text_in(wire.number),
        count: count_in(wire.count),
        volume: count_in(wire.volume),
        alternate_series: text_in(wire.alternate_series),
        alternate_number: text_in(wire.alternate_number),
        alternate_count: count_in(wire.alternate_count),
        summary: text_in(wire.summary),
        notes: text_in(wire.notes),
        date: date_in(wire.year, wire.month, wire.day),
        writer: list_in(&wire.writer),
        penciller: list_in(&wire.penciller),
        inker: list_in(&wire.inker),
        colorist: list_in(&wire.colorist),
        letterer: list_in(&wire.letterer),
        cover_artist: list_in(&wire.cover_artist),
        editor: list_in(&wire.editor),
        translator: list_in(&wire.translator),
        publisher: text_in(wire.publisher),
        imprint: text_in(wire.imprint),
        genre: list_in(&wire.genre),
        tags: list_in(&wire.tags),
        web: split_trimmed(&wire.web, WEB_SEPARATOR),
        page_count: u32::try_from(wire.page_count).unwrap_or(0),
        language_iso: text_in(wire.language_iso),
        format: text_in(wire.format),
        black_and_white: wire.black_and_white.into_option(),
        manga: wire.manga.into_option(),
        characters: list_in(&wire.characters),
        teams: list_in(&wire.teams),
        locations: list_in(&wire.locations),
        scan_information: text_in(wire.scan_information),
        story_arc: list_in(&wire.story_arc),
        story_arc_number: list_in(&wire.story_arc_number),
        series_group: list_in(&wire.series_group),
        age_rating: wire.age_rating.into_option(),
        pages: wire
            .pages
            .map(|pages| pages.page.into_iter().map(page_from_wire).collect())
            .unwrap_or_default(),
        community_rating: wire.community_rating.map(Rating::to_f64),
        main_character_or_team: text_in(wire.main_character_or_team),
        review: text_in(wire.review),
        gtin: text_in(wire.gtin),
    }
}

fn page_to_wire(page: &ComicPage) -> ComicPageXml {
    ComicPageXml {
        image: page.image,
        page_type: page.page_type.unwrap_or(ComicPageType::Story),
        double_page: page.double_page == Some(true),
        image_size: page
            .image_size
            .map_or(0, |size| i64::try_from(size).unwrap_or(i64::MAX)),
        key: text_out(&page.key),
        bookmark: text_out(&page.bookmark),
        image_width: count_out(page.image_width),
        image_height: count_out(page.image_height),
    }
}

fn page_from_wire(page: ComicPageXml) -> ComicPage {
    ComicPage {
        image: page.image,
        page_type: Some(page.page_type).filter(|t| *t != ComicPageType::Story),
        double_page: page.double_page.then_some(true),
        image_size: u64::try_from(page.image_size).ok().filter(|&size| size > 0),
        key: text_in(page.key),
        bookmark: text_in(page.bookmark),
        image_width: count_in(page.image_width),
        image_height: count_in(page.image_height),
    }
}

fn text_out(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn text_in(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn count_out(value: Option<u32>) -> i32 {
    value.map_or(UNKNOWN_INT, |v| i32::try_from(v).unwrap_or(i32::MAX))
}

fn count_in(value: i32) -> Option<u32> {
    u32::try_from(value).ok().filter(|&v| v > 0)
}

fn date_in(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    if year <= 0 || month <= 0 || day <= 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn list_in(value: &str) -> Vec<String> {
    split_trimmed(value, LIST_SEPARATOR)
}

fn split_trimmed(value: &str, separator: &str) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
