//! Where downloaded files go
//!
//! [`PathLayout`] compiles the naming patterns once and maps a record to its
//! destination: collections get their own folder named by the album folder
//! pattern, podcasts and mixes go to their configured folders, singles to the
//! single folder. Every path component is rendered and sanitized on its own,
//! so a rendered name can never introduce extra directories.

use std::path::{Path, PathBuf};

use crate::config::{Config, CoverPolicy, NamingConfig, SanitizePolicy};
use crate::error::{Error, Result};
use crate::template::Template;
use crate::types::{Metadata, ReleaseType};
use crate::utils::sanitize_file_name;

/// Compiled naming configuration
#[derive(Clone, Debug)]
pub struct PathLayout {
    track: Template,
    album_track: Template,
    album_dir: Template,
    cover: Template,
    single_dir: String,
    podcast_dir: String,
    mix_dir: String,
    eps_as_singles: u32,
    covers: CoverPolicy,
    policy: SanitizePolicy,
}

impl PathLayout {
    /// Compile the patterns of `config`
    ///
    /// # Errors
    ///
    /// [`Error::Config`] naming the first pattern that does not compile.
    pub fn new(config: &Config) -> Result<Self> {
        let naming = &config.naming;
        let compile = |key: &str, pattern: &str| {
            Template::compile(pattern).map_err(|e| Error::Config {
                message: format!("invalid pattern '{pattern}': {e}"),
                key: Some(key.to_string()),
            })
        };

        Ok(Self {
            track: compile("naming.track_pattern", naming.track_pattern.as_str())?,
            album_track: compile("naming.album_track_pattern", naming.album_track_pattern.as_str())?,
            album_dir: compile("naming.album_dir_pattern", naming.album_dir_pattern.as_str())?,
            cover: compile("naming.cover_pattern", naming.cover_pattern.as_str())?,
            single_dir: naming.single_dir.clone(),
            podcast_dir: naming.podcast_dir.clone(),
            mix_dir: naming.mix_dir.clone(),
            eps_as_singles: naming.eps_as_singles,
            covers: naming.covers,
            policy: config.sanitize.clone(),
        })
    }

    /// Layout with default naming and sanitation
    pub fn with_naming(naming: NamingConfig) -> Result<Self> {
        Self::new(&Config {
            naming,
            ..Default::default()
        })
    }

    /// Whether the record's release is stored in its own folder
    ///
    /// Collections are, unless their track count is known and below
    /// `eps_as_singles`.
    pub fn is_multi(&self, record: &Metadata) -> bool {
        record.release_type().is_collection() && !self.is_laid_out_as_single(record)
    }

    fn is_laid_out_as_single(&self, record: &Metadata) -> bool {
        record
            .track_count()
            .is_some_and(|count| count < self.eps_as_singles)
    }

    /// Whether the record's release cover should be downloaded
    pub fn wants_cover(&self, record: &Metadata) -> bool {
        match self.covers {
            CoverPolicy::None => false,
            CoverPolicy::Collections => self.is_multi(record),
            CoverPolicy::All => true,
        }
    }

    /// Folder the record's files go to
    pub fn folder(&self, base: &Path, record: &Metadata) -> Result<PathBuf> {
        let folder = if self.is_multi(record) {
            base.join(self.album_dir.render_with(record, &self.policy)?)
        } else {
            let dir = match record.release_type() {
                ReleaseType::Podcast => &self.podcast_dir,
                ReleaseType::Mix => &self.mix_dir,
                _ => &self.single_dir,
            };
            if dir.trim().is_empty() {
                base.to_path_buf()
            } else {
                base.join(sanitize_file_name(dir, &self.policy))
            }
        };
        Ok(folder)
    }

    /// File name for the record's audio file, without folder
    pub fn file_name(&self, record: &Metadata, extension: &str) -> Result<String> {
        let template = if self.is_multi(record) {
            &self.album_track
        } else {
            &self.track
        };
        let stem = template.render_with(record, &self.policy)?;
        Ok(self.with_extension(stem, extension))
    }

    /// Full destination path of the record's audio file
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_dl::{Config, Metadata, PathLayout, ReleaseType};
    /// use std::path::Path;
    ///
    /// let layout = PathLayout::new(&Config::default())?;
    /// let record = Metadata::new(["Rogue"], "Unity")
    ///     .with_album("Uncaged")
    ///     .with_track(1)
    ///     .with_release_type(ReleaseType::Album);
    ///
    /// assert_eq!(
    ///     layout.track_path(Path::new("Music"), &record, "mp3")?,
    ///     Path::new("Music/Uncaged/Rogue - 1 Unity.mp3")
    /// );
    /// # Ok::<(), catalog_dl::Error>(())
    /// ```
    pub fn track_path(&self, base: &Path, record: &Metadata, extension: &str) -> Result<PathBuf> {
        Ok(self
            .folder(base, record)?
            .join(self.file_name(record, extension)?))
    }

    /// Destination path of the release cover image
    pub fn cover_path(&self, base: &Path, record: &Metadata, extension: &str) -> Result<PathBuf> {
        let stem = self.cover.render_with(record, &self.policy)?;
        Ok(self
            .folder(base, record)?
            .join(self.with_extension(stem, extension)))
    }

    fn with_extension(&self, stem: String, extension: &str) -> String {
        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{}", sanitize_file_name(extension, &self.policy))
        }
    }
}
