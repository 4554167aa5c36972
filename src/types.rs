//! Core types for catalog-dl

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::template::format::natural_join;

/// Separator between the artist credit and the title in `artistsTitle`
pub const CREDIT_SEPARATOR: &str = " - ";

/// Artist credits the catalog uses for releases without a real artist
const PLACEHOLDER_CREDITS: &[&str] = &["Various Artists", "Various"];

/// Kind of release a catalog item belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    /// A single track release
    #[default]
    Single,
    /// Extended play
    Ep,
    /// Full-length album
    Album,
    /// Label collection (e.g. "Monstercat Uncaged Vol. 1")
    Collection,
    /// "Best of" and anniversary releases
    BestOf,
    /// Compilations
    Compilation,
    /// Continuous mixes
    Mix,
    /// Podcast episodes
    Podcast,
}

impl ReleaseType {
    /// All release types, in classification order
    pub const ALL: [ReleaseType; 8] = [
        ReleaseType::Collection,
        ReleaseType::Compilation,
        ReleaseType::BestOf,
        ReleaseType::Album,
        ReleaseType::Ep,
        ReleaseType::Mix,
        ReleaseType::Single,
        ReleaseType::Podcast,
    ];

    /// Human-readable name, as rendered by the `releaseType` field
    pub fn display_name(&self) -> &'static str {
        match self {
            ReleaseType::Single => "Single",
            ReleaseType::Ep => "EP",
            ReleaseType::Album => "Album",
            ReleaseType::Collection => "Collection",
            ReleaseType::BestOf => "Best of",
            ReleaseType::Compilation => "Compilation",
            ReleaseType::Mix => "Mix",
            ReleaseType::Podcast => "Podcast",
        }
    }

    /// Whether releases of this type consist of several files that belong in one folder
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            ReleaseType::Ep
                | ReleaseType::Album
                | ReleaseType::Collection
                | ReleaseType::BestOf
                | ReleaseType::Compilation
        )
    }

    /// Classify a release from the raw type string reported by the catalog and its title
    ///
    /// Title heuristics take precedence over the raw type, because the catalog
    /// reports label collections and anniversary releases as plain albums.
    /// Unknown types fall back to [`ReleaseType::Album`].
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_dl::ReleaseType;
    ///
    /// assert_eq!(ReleaseType::classify("Album", "Monstercat Uncaged Vol. 1"), ReleaseType::Collection);
    /// assert_eq!(ReleaseType::classify("Mixes", "Call of the Wild 200"), ReleaseType::Mix);
    /// assert_eq!(ReleaseType::classify("single", "Unity"), ReleaseType::Single);
    /// ```
    pub fn classify(raw_type: &str, title: &str) -> ReleaseType {
        let raw = raw_type.trim();

        // Mixes and podcasts are never reclassified by title
        if raw.eq_ignore_ascii_case("Mixes") || raw.eq_ignore_ascii_case("Mix") {
            return ReleaseType::Mix;
        }
        if raw.eq_ignore_ascii_case("Podcast") {
            return ReleaseType::Podcast;
        }

        let title = title.trim();
        let found = Self::ALL.into_iter().find(|candidate| {
            candidate.matches_title(raw, title) || raw.eq_ignore_ascii_case(candidate.display_name())
        });

        match found {
            Some(release_type) => release_type,
            None => {
                tracing::warn!(raw_type = raw, title, "unknown release type, treating as album");
                ReleaseType::Album
            }
        }
    }

    fn matches_title(&self, raw: &str, title: &str) -> bool {
        match self {
            ReleaseType::Collection => {
                raw.eq_ignore_ascii_case("Monstercat Collection")
                    || title.starts_with("Monstercat 0")
                    || title.starts_with("Monstercat Uncaged")
                    || title.starts_with("Monstercat Instinct")
            }
            ReleaseType::Compilation => {
                raw.eq_ignore_ascii_case("Compilation") || raw.eq_ignore_ascii_case("Compilations")
            }
            ReleaseType::BestOf => title.contains("Best of") || title.ends_with("Anniversary"),
            _ => false,
        }
    }
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parts of a track title split on its bracketed sections
///
/// `"Monster (feat. Trove) [Kage Remix]"` yields raw `"Monster"`, feat `"Trove"`
/// and remix `"Kage Remix"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TitleParts {
    /// Title without any bracketed sections
    pub raw: String,
    /// Featured artists from a `(feat. X)` section, empty if none
    pub feat: String,
    /// A bracketed section ending in "mix", empty if none
    pub remix: String,
}

impl TitleParts {
    /// Split a title into its parts
    pub fn parse(title: &str) -> Self {
        let pieces: Vec<&str> = title
            .split(['(', ')', '[', ']'])
            .map(str::trim)
            .collect();

        let mut parts = TitleParts {
            raw: pieces.first().copied().unwrap_or_default().to_string(),
            ..Default::default()
        };

        // The last piece is whatever follows the final bracket
        if pieces.len() > 2 {
            for piece in &pieces[1..pieces.len() - 1] {
                let lower = piece.to_lowercase();
                if lower.starts_with("feat") {
                    parts.feat = piece
                        .split_once(' ')
                        .map(|(_, who)| who.trim().to_string())
                        .unwrap_or_default();
                } else if lower.ends_with("mix") {
                    parts.remix = piece.to_string();
                }
            }
        }

        parts
    }
}

/// Immutable descriptive data for one downloadable catalog item
///
/// Constructed once per item, read-only afterwards. Fields are private; build
/// a record with [`Metadata::new`] and the `with_*` methods.
///
/// # Examples
///
/// ```
/// use catalog_dl::{Metadata, ReleaseType};
///
/// let record = Metadata::new(["Rogue", "Stonebank"], "Unity")
///     .with_album("Monstercat Uncaged Vol. 1")
///     .with_track(1)
///     .with_release_type(ReleaseType::Collection);
///
/// assert_eq!(record.artists_title(), "Rogue & Stonebank - Unity");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    artists: Vec<String>,
    title: String,
    #[serde(default)]
    album: String,
    #[serde(default)]
    track: Option<NonZeroU32>,
    #[serde(default)]
    release_type: ReleaseType,
    #[serde(default)]
    catalog_id: String,
    #[serde(default)]
    release_date: Option<NaiveDate>,
    #[serde(default)]
    track_count: Option<u32>,
}

impl Metadata {
    /// Create a record from its artists (in credit order) and title
    pub fn new<I, S>(artists: I, title: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            artists: artists.into_iter().map(Into::into).collect(),
            title: title.into(),
            album: String::new(),
            track: None,
            release_type: ReleaseType::default(),
            catalog_id: String::new(),
            release_date: None,
            track_count: None,
        }
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the track index; 0 means "no track number"
    #[must_use]
    pub fn with_track(mut self, track: u32) -> Self {
        self.track = NonZeroU32::new(track);
        self
    }

    /// Set the release type
    #[must_use]
    pub fn with_release_type(mut self, release_type: ReleaseType) -> Self {
        self.release_type = release_type;
        self
    }

    /// Set the catalog id
    #[must_use]
    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = catalog_id.into();
        self
    }

    /// Set the release date
    #[must_use]
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Set the number of tracks on the owning release
    #[must_use]
    pub fn with_track_count(mut self, count: u32) -> Self {
        self.track_count = Some(count);
        self
    }

    /// Fixed record used to preview patterns while they are being edited
    pub fn sample() -> Self {
        Metadata::new(["Rogue", "Stonebank", "Slips & Slurs"], "Unity (feat. Kite) [VIP Mix]")
            .with_album("Monstercat Uncaged Vol. 1")
            .with_track(1)
            .with_release_type(ReleaseType::Collection)
            .with_catalog_id("MCUV-1")
            .with_release_date(NaiveDate::from_ymd_opt(2017, 4, 7).unwrap_or_default())
            .with_track_count(30)
    }

    /// Normalise an artist credit reported by the catalog
    ///
    /// Placeholder credits ("Various Artists", "Various", and "Monstercat" on
    /// releases whose title mentions Monstercat) yield `None`; anything else is
    /// returned trimmed.
    pub fn normalize_credit(credit: &str, title: &str) -> Option<String> {
        let credit = credit.trim();
        let placeholder = PLACEHOLDER_CREDITS.contains(&credit)
            || (credit == "Monstercat" && title.contains("Monstercat"));

        if placeholder || credit.is_empty() {
            None
        } else {
            Some(credit.to_string())
        }
    }

    /// Artists in credit order
    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    /// Title as given
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Album, possibly empty
    pub fn album(&self) -> &str {
        &self.album
    }

    /// Track index, if any
    pub fn track(&self) -> Option<u32> {
        self.track.map(NonZeroU32::get)
    }

    /// Release type
    pub fn release_type(&self) -> ReleaseType {
        self.release_type
    }

    /// Catalog id, possibly empty
    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }

    /// Release date, if known
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// Number of tracks on the owning release, if known
    pub fn track_count(&self) -> Option<u32> {
        self.track_count
    }

    /// Artists joined naturally: `"A, B & C"`
    pub fn artist_credit(&self) -> String {
        natural_join(&self.artists)
    }

    /// Artist credit, separator and title; just the title when there are no artists
    pub fn artists_title(&self) -> String {
        if self.artists.is_empty() {
            self.title.clone()
        } else {
            format!("{}{CREDIT_SEPARATOR}{}", self.artist_credit(), self.title)
        }
    }

    /// Title split on its bracketed sections
    pub fn title_parts(&self) -> TitleParts {
        TitleParts::parse(&self.title)
    }
}

impl std::fmt::Display for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.artists_title())
    }
}
