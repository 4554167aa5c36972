//! # catalog-dl
//!
//! File naming and transfer progress for music catalog download managers.
//!
//! ## Design Philosophy
//!
//! catalog-dl is designed to be:
//! - **Pure** - No I/O, no network, no UI; the host application owns all of that
//! - **Configurable** - Patterns, folders and the sanitation policy are settings
//! - **Reportable** - Every failure comes back as a structured value, never a panic
//!
//! ## Quick Start
//!
//! ```
//! use catalog_dl::{Metadata, ProgressTracker, ReleaseType, Template};
//!
//! let template = Template::compile("{artistsTitle} - {album} - {track} {title}")?;
//! let record = Metadata::new(["Rogue", "Stonebank", "Slips & Slurs"], "Unity")
//!     .with_album("Monstercat Uncaged Vol. 1")
//!     .with_track(1)
//!     .with_release_type(ReleaseType::Collection);
//!
//! assert_eq!(
//!     template.render(&record)?,
//!     "Rogue, Stonebank & Slips & Slurs - Unity - Monstercat Uncaged Vol. 1 - 1 Unity"
//! );
//!
//! let mut progress = ProgressTracker::with_maximum(500);
//! assert_eq!(progress.update_current(500).permille, 1000);
//! # Ok::<(), catalog_dl::TemplateError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Destination paths per release type
pub mod layout;
/// Parsing of downloaded file names
pub mod parse;
/// Transfer progress tracking
pub mod progress;
/// File name pattern templates
pub mod template;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, CoverPolicy, NamingConfig, SanitizePolicy};
pub use error::{Error, ErrorCode, ErrorDetail, Result, TemplateError};
pub use layout::PathLayout;
pub use progress::{
    ProgressReporter, ProgressSnapshot, ProgressTracker, ProgressUpdate, ProgressWatcher,
    progress_channel,
};
pub use template::{Segment, Template, ValidationOutcome, validate};
pub use types::{Metadata, ReleaseType, TitleParts};
