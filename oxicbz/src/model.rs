//! Domain model for comic book metadata.
//!
//! Every optional field is a true [`Option`]: `None` means "not known" and is
//! never conflated with a zero, an empty string or a schema default. The XML
//! schema's own defaults live in the wire form and are reconciled by the
//! mapper only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// String form of an enumerated schema value.
pub(crate) trait SchemaEnum: Sized + Copy {
    /// The value as written in `ComicInfo.xml`.
    fn as_str(&self) -> &'static str;

    /// Parse a schema value, ignoring ASCII case.
    fn from_schema(value: &str) -> Option<Self>;
}

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in schema order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The value as written in `ComicInfo.xml`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parse a schema value, ignoring ASCII case.
            pub fn from_schema(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(value))
            }
        }

        impl SchemaEnum for $name {
            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }

            fn from_schema(value: &str) -> Option<Self> {
                $name::from_schema(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

schema_enum! {
    /// Yes/no answer, e.g. whether a book is black and white.
    YesNo {
        /// No.
        No => "No",
        /// Yes.
        Yes => "Yes",
    }
}

schema_enum! {
    /// Whether a book is manga, and its reading direction.
    Manga {
        /// Not manga.
        No => "No",
        /// Manga read left to right.
        Yes => "Yes",
        /// Manga read right to left.
        YesAndRightToLeft => "YesAndRightToLeft",
    }
}

schema_enum! {
    /// Age rating.
    AgeRating {
        /// Adults Only 18+.
        AdultsOnly18Plus => "Adults Only 18+",
        /// Early Childhood.
        EarlyChildhood => "Early Childhood",
        /// Everyone.
        Everyone => "Everyone",
        /// Everyone 10+.
        Everyone10Plus => "Everyone 10+",
        /// G.
        G => "G",
        /// Kids to Adults.
        KidsToAdults => "Kids to Adults",
        /// M.
        M => "M",
        /// MA15+.
        Ma15Plus => "MA15+",
        /// Mature 17+.
        Mature17Plus => "Mature 17+",
        /// PG.
        Pg => "PG",
        /// R18+.
        R18Plus => "R18+",
        /// Rating Pending.
        RatingPending => "Rating Pending",
        /// Teen.
        Teen => "Teen",
        /// X18+.
        X18Plus => "X18+",
    }
}

schema_enum! {
    /// Role of a page within the book.
    ///
    /// `Story` is the schema default, so it does not survive a round trip:
    /// a page written as `Some(Story)` reads back as `None`.
    ComicPageType {
        /// Front cover.
        FrontCover => "FrontCover",
        /// Inside of a cover.
        InnerCover => "InnerCover",
        /// Recap of earlier issues.
        Roundup => "Roundup",
        /// Story page.
        Story => "Story",
        /// Advertisement.
        Advertisement => "Advertisement",
        /// Editorial.
        Editorial => "Editorial",
        /// Letters page.
        Letters => "Letters",
        /// Preview of another book.
        Preview => "Preview",
        /// Back cover.
        BackCover => "BackCover",
        /// Anything else.
        Other => "Other",
        /// Page marked as deleted.
        Deleted => "Deleted",
    }
}

/// Metadata for one page image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComicPage {
    /// Zero-based index of the image in the archive.
    pub image: u32,
    /// Page role; `None` means an ordinary story page.
    pub page_type: Option<ComicPageType>,
    /// `Some(true)` for a double-page spread; `None` for a single page.
    pub double_page: Option<bool>,
    /// Image file size in bytes.
    pub image_size: Option<u64>,
    /// Opaque key.
    pub key: Option<String>,
    /// Bookmark label.
    pub bookmark: Option<String>,
    /// Width in pixels.
    pub image_width: Option<u32>,
    /// Height in pixels.
    pub image_height: Option<u32>,
}

impl ComicPage {
    /// A page with only its image index set.
    pub fn new(image: u32) -> Self {
        Self {
            image,
            ..Default::default()
        }
    }
}

/// Comic book metadata.
///
/// List fields keep their order. Most of them (writers, genres, tags, ...)
/// behave like sets to consumers, but the order given here is the order
/// written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComicInfo {
    /// Title of the book.
    pub title: Option<String>,
    /// Series name.
    pub series: Option<String>,
    /// Issue number within the series (free text, e.g. "1.5").
    pub number: Option<String>,
    /// Total issues in the series.
    pub count: Option<u32>,
    /// Volume number.
    pub volume: Option<u32>,
    /// Alternate (crossover) series name.
    pub alternate_series: Option<String>,
    /// Issue number within the alternate series.
    pub alternate_number: Option<String>,
    /// Total issues in the alternate series.
    pub alternate_count: Option<u32>,
    /// Summary.
    pub summary: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Publication date.
    pub date: Option<NaiveDate>,
    /// Writers.
    pub writer: Vec<String>,
    /// Pencillers.
    pub penciller: Vec<String>,
    /// Inkers.
    pub inker: Vec<String>,
    /// Colorists.
    pub colorist: Vec<String>,
    /// Letterers.
    pub letterer: Vec<String>,
    /// Cover artists.
    pub cover_artist: Vec<String>,
    /// Editors.
    pub editor: Vec<String>,
    /// Translators.
    pub translator: Vec<String>,
    /// Publisher.
    pub publisher: Option<String>,
    /// Publisher imprint.
    pub imprint: Option<String>,
    /// Genres.
    pub genre: Vec<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Web links.
    pub web: Vec<String>,
    /// Number of pages. Zero is a real count, not "unknown".
    pub page_count: u32,
    /// Language as an ISO code.
    pub language_iso: Option<String>,
    /// Original format (e.g. "TPB").
    pub format: Option<String>,
    /// Whether the book is black and white.
    pub black_and_white: Option<YesNo>,
    /// Whether the book is manga.
    pub manga: Option<Manga>,
    /// Characters.
    pub characters: Vec<String>,
    /// Teams.
    pub teams: Vec<String>,
    /// Locations.
    pub locations: Vec<String>,
    /// Scan information.
    pub scan_information: Option<String>,
    /// Story arcs.
    pub story_arc: Vec<String>,
    /// Position within each story arc.
    pub story_arc_number: Vec<String>,
    /// Series groups.
    pub series_group: Vec<String>,
    /// Age rating.
    pub age_rating: Option<AgeRating>,
    /// Per-page metadata.
    pub pages: Vec<ComicPage>,
    /// Community rating in `[0.0, 5.0]`, kept to one decimal place.
    pub community_rating: Option<f64>,
    /// Main character or team.
    pub main_character_or_team: Option<String>,
    /// Review.
    pub review: Option<String>,
    /// Global Trade Item Number.
    pub gtin: Option<String>,
}
