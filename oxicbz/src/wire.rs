//! Wire model mirroring the `ComicInfo.xml` schema.
//!
//! Field order follows the schema's declared sequence and every field holds
//! the schema's own default instead of an absence: `""` for text, `-1` for
//! unknown integers, `Unknown` for tri-states, `Story` for page types,
//! `false`/`0` for the page flag and size. Fields equal to their default are
//! not written, except `PageCount`.

use crate::model::{AgeRating, ComicPageType, Manga, SchemaEnum, YesNo};
use crate::rating::Rating;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `xmlns:xsi` declared on the root element.
pub(crate) const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// `xmlns:xsd` declared on the root element.
pub(crate) const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Schema default for integers whose value is not known.
pub(crate) const UNKNOWN_INT: i32 = -1;

const UNKNOWN: &str = "Unknown";

fn unknown_int() -> i32 {
    UNKNOWN_INT
}

fn is_unknown_int(value: &i32) -> bool {
    *value == UNKNOWN_INT
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_story(value: &ComicPageType) -> bool {
    *value == ComicPageType::Story
}

fn story() -> ComicPageType {
    ComicPageType::Story
}

fn xsi_namespace<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(XSI_NAMESPACE)
}

fn xsd_namespace<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(XSD_NAMESPACE)
}

/// An enumerated schema value with a dedicated `Unknown` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice<T> {
    /// The schema default.
    Unknown,
    /// A concrete value.
    Value(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::Unknown
    }
}

impl<T> Choice<T> {
    pub(crate) fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub(crate) fn into_option(self) -> Option<T> {
        match self {
            Self::Unknown => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Value)
    }
}

impl<T: SchemaEnum> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unknown => serializer.serialize_str(UNKNOWN),
            Self::Value(value) => serializer.serialize_str(value.as_str()),
        }
    }
}

impl<'de, T: SchemaEnum> Deserialize<'de> for Choice<T> {
    /// Unrecognised values decode as `Unknown`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(T::from_schema(&text).into())
    }
}

/// Page type attribute. The schema types it as a list; the first token wins
/// and anything unrecognised is `Story`.
mod page_type {
    use super::*;

    pub(super) fn serialize<S: Serializer>(
        value: &ComicPageType,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ComicPageType, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(text
            .split_whitespace()
            .next()
            .and_then(ComicPageType::from_schema)
            .unwrap_or(ComicPageType::Story))
    }
}

/// `<ComicInfo>` root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "ComicInfo", rename_all = "PascalCase")]
pub(crate) struct ComicInfoXml {
    #[serde(rename = "@xmlns:xsi", serialize_with = "xsi_namespace", skip_deserializing)]
    pub xmlns_xsi: (),
    #[serde(rename = "@xmlns:xsd", serialize_with = "xsd_namespace", skip_deserializing)]
    pub xmlns_xsd: (),

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub series: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(default = "unknown_int", skip_serializing_if = "is_unknown_int")]
    pub count: i32,
    #[serde(default = "unknown_int", skip_serializing_if = "is_unknown_int")]
    pub volume: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alternate_series: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alternate_number: String,
    #[serde(default = "unknown_int", skip_serializing_if = "is_unknown_int")]
    pub alternate_count: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default = "unknown_int", skip_serializing_if = "is_unknown_int")]
    pub year: i32,
    #[serde(default = "unknown_int", skip_serializing_if = "is_unknown_int")]
    pub month: i32,
    #[serde(default = "unknown_int", skip_serializing_if = "is_unknown_int")]
    pub day: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub writer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub penciller: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub inker: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub colorist: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub letterer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cover_artist: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub editor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub translator: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub imprint: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub genre: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tags: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub web: String,
    #[serde(default)]
    pub page_count: i32,
    #[serde(rename = "LanguageISO", default, skip_serializing_if = "String::is_empty")]
    pub language_iso: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Choice::is_unknown")]
    pub black_and_white: Choice<YesNo>,
    #[serde(default, skip_serializing_if = "Choice::is_unknown")]
    pub manga: Choice<Manga>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub characters: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub teams: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locations: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scan_information: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub story_arc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub story_arc_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub series_group: String,
    #[serde(default, skip_serializing_if = "Choice::is_unknown")]
    pub age_rating: Choice<AgeRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PagesXml>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub main_character_or_team: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub review: String,
    #[serde(rename = "GTIN", default, skip_serializing_if = "String::is_empty")]
    pub gtin: String,
}

/// `<Pages>` container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PagesXml {
    #[serde(rename = "Page", default)]
    pub page: Vec<ComicPageXml>,
}

/// `<Page>` element; every value is an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ComicPageXml {
    #[serde(rename = "@Image")]
    pub image: u32,
    #[serde(
        rename = "@Type",
        with = "page_type",
        default = "story",
        skip_serializing_if = "is_story"
    )]
    pub page_type: ComicPageType,
    #[serde(rename = "@DoublePage", default, skip_serializing_if = "is_false")]
    pub double_page: bool,
    #[serde(rename = "@ImageSize", default, skip_serializing_if = "is_zero")]
    pub image_size: i64,
    #[serde(rename = "@Key", default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "@Bookmark", default, skip_serializing_if = "String::is_empty")]
    pub bookmark: String,
    #[serde(
        rename = "@ImageWidth",
        default = "unknown_int",
        skip_serializing_if = "is_unknown_int"
    )]
    pub image_width: i32,
    #[serde(
        rename = "@ImageHeight",
        default = "unknown_int",
        skip_serializing_if = "is_unknown_int"
    )]
    pub image_height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_option_conversions() {
        let known: Choice<YesNo> = Some(YesNo::Yes).into();
        assert_eq!(known, Choice::Value(YesNo::Yes));
        assert_eq!(known.into_option(), Some(YesNo::Yes));

        let unknown: Choice<Manga> = None.into();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.into_option(), None);
        assert_eq!(Choice::<AgeRating>::default(), Choice::Unknown);
    }
}
