//! Catalog records and configuration fixtures

use catalog_dl::{Metadata, ReleaseType};
use chrono::NaiveDate;

/// Track 1 of a label collection, with a duo name that contains " & "
pub fn uncaged_unity() -> Metadata {
    Metadata::new(["Rogue", "Stonebank", "Slips & Slurs"], "Unity")
        .with_album("Monstercat Uncaged Vol. 1")
        .with_track(1)
        .with_release_type(ReleaseType::Collection)
        .with_catalog_id("MCUV-1")
        .with_release_date(NaiveDate::from_ymd_opt(2017, 4, 7).unwrap_or_default())
        .with_track_count(30)
}

/// A single with a featured artist
pub fn single_with_feat() -> Metadata {
    Metadata::new(["Julian Calor"], "Monster (feat. Trove)")
        .with_album("Monster")
        .with_release_type(ReleaseType::Single)
}

/// A podcast episode credited to the label
pub fn podcast_episode() -> Metadata {
    Metadata::new(["Monstercat"], "Call of the Wild 200").with_release_type(ReleaseType::Podcast)
}

/// Track metadata as a catalog client would hand it over
pub const RELEASE_TRACK_JSON: &str = r#"{
    "artists": ["Case & Point", "Gent & Jawns"],
    "title": "Nightlife",
    "album": "Pulse EP",
    "track": 2,
    "releaseType": "ep",
    "catalogId": "MCEP-42",
    "trackCount": 3
}"#;

/// Settings file as a host application would store it
pub const SETTINGS_JSON: &str = r#"{
    "naming": {
        "track_pattern": "{artists|natural} - {title}",
        "album_track_pattern": "{track|2} {artistsTitle}",
        "album_dir_pattern": "{artist} - {album} [{catalogId}]",
        "single_dir": "Singles",
        "eps_as_singles": 4
    },
    "sanitize": {
        "replacement": "-"
    }
}"#;
