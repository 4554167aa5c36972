//! File name pattern templates
//!
//! A pattern is literal text with field references: `{name}` or
//! `{name|modifier}`. Rendering is a two-phase pipeline:
//!
//! 1. [`Template::compile`] scans the pattern into [`Segment`]s. It fails on
//!    unterminated references, empty names and modifiers that cannot apply to
//!    a registered field's kind.
//! 2. [`Template::render`] resolves each field against a [`Metadata`] record
//!    through the [`fields`] registry, formats it (see [`format`]) and runs
//!    the complete string through the sanitation policy. Unknown field names
//!    fail here.
//!
//! Both phases are pure. A compiled template is immutable and can be cached
//! and shared between threads.
//!
//! ```
//! use catalog_dl::{Metadata, Template};
//!
//! let template = Template::compile("{artists|natural} - {track|2} {title}")?;
//! let record = Metadata::new(["Rogue", "Stonebank"], "Unity").with_track(1);
//!
//! assert_eq!(template.render(&record)?, "Rogue & Stonebank - 01 Unity");
//! # Ok::<(), catalog_dl::TemplateError>(())
//! ```

pub mod fields;
pub mod format;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::SanitizePolicy;
use crate::error::{ErrorDetail, TemplateError};
use crate::types::Metadata;
use crate::utils::sanitize_file_name;

/// One piece of a compiled pattern
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text copied verbatim
    Literal(String),
    /// A field reference
    Field {
        /// Field name, looked up in the registry at render time
        name: String,
        /// Text after the first `|`, if any
        modifier: Option<String>,
    },
}

/// A compiled pattern
///
/// Compiling the same text twice yields equal templates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile pattern text into segments
    ///
    /// # Errors
    ///
    /// - [`TemplateError::UnterminatedField`] when a `{` is not closed before
    ///   the end of the pattern or before another `{`
    /// - [`TemplateError::EmptyFieldName`] for `{}` and `{|...}`
    /// - [`TemplateError::InvalidModifier`] when a registered field gets a
    ///   modifier its kind cannot use
    ///
    /// Unknown field names compile; they are reported by [`render`](Self::render).
    pub fn compile(pattern: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().enumerate();

        while let Some((position, c)) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let mut interior = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                match c {
                    '}' => {
                        closed = true;
                        break;
                    }
                    '{' => break,
                    _ => interior.push(c),
                }
            }
            if !closed {
                tracing::trace!(pattern, position, "unterminated field reference");
                return Err(TemplateError::UnterminatedField { position });
            }

            let (name, modifier) = match interior.split_once('|') {
                Some((name, modifier)) => (name.to_string(), Some(modifier.to_string())),
                None => (interior, None),
            };
            if name.is_empty() {
                return Err(TemplateError::EmptyFieldName { position });
            }
            if let (Some(def), Some(modifier)) = (fields::field(&name), modifier.as_deref()) {
                format::check_modifier(def.kind, &name, modifier)?;
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field { name, modifier });
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// The compiled segments, in pattern order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all fields referenced by this template
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render against a record with the default sanitation policy
    ///
    /// # Errors
    ///
    /// [`TemplateError::UnknownField`] for the first field the record cannot resolve.
    pub fn render(&self, record: &Metadata) -> Result<String, TemplateError> {
        self.render_with(record, &SanitizePolicy::default())
    }

    /// Render against a record, sanitizing the result with `policy`
    pub fn render_with(
        &self,
        record: &Metadata,
        policy: &SanitizePolicy,
    ) -> Result<String, TemplateError> {
        let raw = self.expand(record)?;
        Ok(sanitize_file_name(&raw, policy))
    }

    /// Render against a record without sanitation
    pub fn expand(&self, record: &Metadata) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { name, modifier } => {
                    let value = record
                        .lookup(name)
                        .ok_or_else(|| TemplateError::UnknownField { name: name.clone() })?;
                    out.push_str(&format::format_value(name, &value, modifier.as_deref())?);
                }
            }
        }
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl std::fmt::Display for Template {
    /// Writes the pattern back in source form
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Field {
                    name,
                    modifier: None,
                } => write!(f, "{{{name}}}")?,
                Segment::Field {
                    name,
                    modifier: Some(modifier),
                } => write!(f, "{{{name}|{modifier}}}")?,
            }
        }
        Ok(())
    }
}

/// Result of [`validate`]
///
/// Serializes to `{"preview": "..."}` or `{"error": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationOutcome {
    /// The pattern compiled and rendered
    Preview {
        /// Rendered sample file name
        preview: String,
    },
    /// The pattern failed to compile or render
    Error {
        /// What went wrong, for inline display
        error: ErrorDetail,
    },
}

impl ValidationOutcome {
    /// Whether the pattern is usable
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Preview { .. })
    }

    /// Rendered preview, if the pattern is valid
    pub fn preview(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Preview { preview } => Some(preview),
            ValidationOutcome::Error { .. } => None,
        }
    }

    /// Error detail, if the pattern is invalid
    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            ValidationOutcome::Preview { .. } => None,
            ValidationOutcome::Error { error } => Some(error),
        }
    }
}

impl From<Result<String, TemplateError>> for ValidationOutcome {
    fn from(result: Result<String, TemplateError>) -> Self {
        match result {
            Ok(preview) => ValidationOutcome::Preview { preview },
            Err(e) => ValidationOutcome::Error {
                error: ErrorDetail::from(&e),
            },
        }
    }
}

/// Compile and render `pattern` against a sample record
///
/// Meant for live feedback while a pattern is edited; never fails, every
/// problem is reported in the returned outcome.
///
/// ```
/// use catalog_dl::{Metadata, template::validate};
///
/// let outcome = validate("{artists|natural} - {title}", &Metadata::new(["A", "B"], "T"));
/// assert_eq!(outcome.preview(), Some("A & B - T"));
///
/// let outcome = validate("{nope}", &Metadata::sample());
/// assert_eq!(outcome.error().map(|e| e.code.as_str()), Some("unknown_field"));
/// ```
pub fn validate(pattern: &str, sample: &Metadata) -> ValidationOutcome {
    validate_with(pattern, sample, &SanitizePolicy::default())
}

/// [`validate`] with an explicit sanitation policy
pub fn validate_with(
    pattern: &str,
    sample: &Metadata,
    policy: &SanitizePolicy,
) -> ValidationOutcome {
    Template::compile(pattern)
        .and_then(|template| template.render_with(sample, policy))
        .into()
}

#[cfg(test)]
mod tests;
