//! Configuration types for catalog-dl
//!
//! The library never persists settings; these types describe their shape so a
//! host application can load them (JSON) and hand them over.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::template::Template;

/// Built-in file name patterns for singles, offered as presets in editors
pub const TRACK_PATTERNS: &[&str] = &[
    "{artistsTitle}",
    "{artists|, } - {title}",
    "{artists|natural} - {title}",
    "{artists|, } - {titleRaw}",
];

/// Built-in file name patterns for tracks inside an album folder
pub const ALBUM_TRACK_PATTERNS: &[&str] = &[
    "{artist} - {track} {title}",
    "{track|2} {artistsTitle}",
    "{artists|natural} - {title}",
];

/// File naming configuration
///
/// Patterns use the template syntax of [`crate::template`]; directory names for
/// podcasts, mixes and singles are plain folder names (empty = base directory).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// File name pattern for singles and other non-collection tracks
    #[serde(default = "default_track_pattern")]
    pub track_pattern: String,

    /// File name pattern for tracks inside an album folder
    #[serde(default = "default_album_track_pattern")]
    pub album_track_pattern: String,

    /// Folder name pattern for albums, EPs and collections (default: "{album}")
    #[serde(default = "default_album_dir_pattern")]
    pub album_dir_pattern: String,

    /// Cover image file name pattern (default: "{album}")
    #[serde(default = "default_cover_pattern")]
    pub cover_pattern: String,

    /// Folder for singles (default: "", the base directory)
    #[serde(default)]
    pub single_dir: String,

    /// Folder for podcast episodes (default: "Podcast")
    #[serde(default = "default_podcast_dir")]
    pub podcast_dir: String,

    /// Folder for mixes (default: "Mixes")
    #[serde(default = "default_mix_dir")]
    pub mix_dir: String,

    /// Releases with fewer than this many tracks are laid out like singles
    /// (default: 0 = never)
    #[serde(default)]
    pub eps_as_singles: u32,

    /// Which releases get their cover image downloaded
    #[serde(default)]
    pub covers: CoverPolicy,
}

/// Which releases get their cover image downloaded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverPolicy {
    /// Never download covers
    None,
    /// Only releases stored in their own folder (default)
    #[default]
    Collections,
    /// Every release, singles included
    All,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            track_pattern: default_track_pattern(),
            album_track_pattern: default_album_track_pattern(),
            album_dir_pattern: default_album_dir_pattern(),
            cover_pattern: default_cover_pattern(),
            single_dir: String::new(),
            podcast_dir: default_podcast_dir(),
            mix_dir: default_mix_dir(),
            eps_as_singles: 0,
            covers: CoverPolicy::default(),
        }
    }
}

impl NamingConfig {
    /// Patterns with their configuration keys
    pub fn patterns(&self) -> [(&'static str, &str); 4] {
        [
            ("naming.track_pattern", self.track_pattern.as_str()),
            ("naming.album_track_pattern", self.album_track_pattern.as_str()),
            ("naming.album_dir_pattern", self.album_dir_pattern.as_str()),
            ("naming.cover_pattern", self.cover_pattern.as_str()),
        ]
    }
}

/// How rendered file names are made safe for common filesystems
///
/// Illegal and control characters are replaced, never dropped. Surrounding
/// whitespace and trailing dots are trimmed. An empty result becomes `fallback`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizePolicy {
    /// Characters that may not appear in a file name (default: `\/:*?"<>|`)
    #[serde(default = "default_illegal_chars")]
    pub illegal_chars: String,

    /// Replacement for each illegal character (default: "_")
    #[serde(default = "default_replacement")]
    pub replacement: String,

    /// Used when sanitation leaves nothing (default: "Untitled")
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Trim surrounding whitespace and trailing dots (default: true)
    #[serde(default = "default_true")]
    pub trim: bool,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            illegal_chars: default_illegal_chars(),
            replacement: default_replacement(),
            fallback: default_fallback(),
            trim: true,
        }
    }
}

/// Main configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File and folder naming
    #[serde(default)]
    pub naming: NamingConfig,

    /// File name sanitation
    #[serde(default)]
    pub sanitize: SanitizePolicy,
}

impl Config {
    /// Parse a configuration from JSON; missing settings take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded naming configuration");
        Ok(config)
    }

    /// Check that every pattern compiles and the sanitation policy is usable
    pub fn validate(&self) -> Result<()> {
        for (key, pattern) in self.naming.patterns() {
            Template::compile(pattern).map_err(|e| Error::Config {
                message: format!("invalid pattern '{pattern}': {e}"),
                key: Some(key.to_string()),
            })?;
        }

        if self.sanitize.fallback.trim().is_empty() {
            return Err(Error::Config {
                message: "fallback file name must not be empty".to_string(),
                key: Some("sanitize.fallback".to_string()),
            });
        }
        if let Some(c) = self
            .sanitize
            .replacement
            .chars()
            .find(|c| self.sanitize.illegal_chars.contains(*c))
        {
            return Err(Error::Config {
                message: format!("replacement contains illegal character '{c}'"),
                key: Some("sanitize.replacement".to_string()),
            });
        }
        Ok(())
    }
}

fn default_track_pattern() -> String {
    TRACK_PATTERNS[0].to_string()
}

fn default_album_track_pattern() -> String {
    ALBUM_TRACK_PATTERNS[0].to_string()
}

fn default_album_dir_pattern() -> String {
    "{album}".to_string()
}

fn default_cover_pattern() -> String {
    "{album}".to_string()
}

fn default_podcast_dir() -> String {
    "Podcast".to_string()
}

fn default_mix_dir() -> String {
    "Mixes".to_string()
}

fn default_illegal_chars() -> String {
    r#"\/:*?"<>|"#.to_string()
}

fn default_replacement() -> String {
    "_".to_string()
}

fn default_fallback() -> String {
    "Untitled".to_string()
}

fn default_true() -> bool {
    true
}
