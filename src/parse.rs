//! Parsing of previously downloaded track file names
//!
//! Album tracks are stored as `"<artists> - <album> - <track> <title>.<ext>"`.
//! Parsing such names back into [`Metadata`] lets a downloader skip tracks that
//! are already on disk.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::types::{Metadata, ReleaseType};

/// Artist names that contain a delimiter but are a single act
pub const ARTIST_EXCEPTIONS: &[&str] = &["Slips & Slurs", "Case & Point", "Gent & Jawns"];

/// Extensions are recognized when the last dot is within this many characters of the end
const MAX_EXTENSION_LEN: usize = 5;

fn file_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // constant pattern, covered by tests
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^([^-]+) - (.+) - (\d+) (.+)$").expect("valid regex"))
}

fn delimiter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r" & |, | and | x ").expect("valid regex"))
}

/// Split an artist credit into individual artists
///
/// Splits on `" & "`, `", "`, `" and "` and `" x "`, except inside the names in
/// [`ARTIST_EXCEPTIONS`]. Names are trimmed; empty pieces are dropped.
///
/// # Examples
///
/// ```
/// use catalog_dl::parse::split_artists;
///
/// assert_eq!(
///     split_artists("Rogue, Stonebank & Slips & Slurs"),
///     vec!["Rogue", "Stonebank", "Slips & Slurs"]
/// );
/// ```
pub fn split_artists(credit: &str) -> Vec<String> {
    // Mask exceptions with placeholders no delimiter can match
    let mut masked = credit.to_string();
    for (i, exception) in ARTIST_EXCEPTIONS.iter().enumerate() {
        masked = masked.replace(exception, &format!("\u{0}{i}\u{0}"));
    }

    delimiter_regex()
        .split(&masked)
        .map(|piece| {
            let mut name = piece.to_string();
            for (i, exception) in ARTIST_EXCEPTIONS.iter().enumerate() {
                name = name.replace(&format!("\u{0}{i}\u{0}"), exception);
            }
            name.trim().to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Parse an album track file name back into a record
///
/// The extension, if any, is dropped. The record's release type is
/// [`ReleaseType::Album`]; everything not encoded in the name is left empty.
///
/// # Errors
///
/// [`Error::InvalidFileName`] when the name does not follow the
/// `"<artists> - <album> - <track> <title>"` layout or the track number does
/// not fit a `u32`.
///
/// # Examples
///
/// ```
/// use catalog_dl::parse::parse_track_file_name;
///
/// let record = parse_track_file_name("Rogue & Stonebank - Uncaged Vol. 1 - 3 Unity.mp3")?;
/// assert_eq!(record.artists(), ["Rogue", "Stonebank"]);
/// assert_eq!(record.album(), "Uncaged Vol. 1");
/// assert_eq!(record.track(), Some(3));
/// assert_eq!(record.title(), "Unity");
/// # Ok::<(), catalog_dl::Error>(())
/// ```
pub fn parse_track_file_name(file_name: &str) -> Result<Metadata> {
    let invalid = || Error::InvalidFileName(file_name.to_string());

    let captures = file_name_regex().captures(file_name).ok_or_else(invalid)?;
    let (credit, album, track, title) = match (
        captures.get(1),
        captures.get(2),
        captures.get(3),
        captures.get(4),
    ) {
        (Some(credit), Some(album), Some(track), Some(title)) => {
            (credit.as_str(), album.as_str(), track.as_str(), title.as_str())
        }
        _ => return Err(invalid()),
    };

    let track: u32 = track.parse().map_err(|_| invalid())?;

    Ok(Metadata::new(split_artists(credit), strip_extension(title))
        .with_album(album)
        .with_track(track)
        .with_release_type(ReleaseType::Album))
}

fn strip_extension(title: &str) -> &str {
    match title.rfind('.') {
        Some(dot) if title.len() - dot <= MAX_EXTENSION_LEN + 1 => &title[..dot],
        _ => title,
    }
}
