//! Value formatting for field segments
//!
//! Modifiers are interpreted per field kind:
//!
//! - text: the modifier must be non-empty and is otherwise ignored
//! - number: no modifier renders the bare integer, a modifier is a zero-padding
//!   width (`{track|2}` renders `01`)
//! - date: `%Y-%m-%d` by default, a modifier is a strftime format made of
//!   date specifiers (time of day and time zone cannot apply to a date)
//! - list: joined with `", "` by default; `natural` joins with a final `" & "`,
//!   any other modifier is used as the literal separator

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

use super::fields::{FieldKind, FieldValue};
use crate::error::TemplateError;

/// Separator used for list fields without a modifier
pub const DEFAULT_LIST_SEPARATOR: &str = ", ";

/// Modifier token selecting natural-language joining
pub const NATURAL: &str = "natural";

/// Separator before the last element of a natural join
pub const NATURAL_LAST_SEPARATOR: &str = " & ";

/// Date format used when a date field has no modifier
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Widest zero padding accepted for number fields
pub const MAX_PAD_WIDTH: usize = 32;

/// Join elements with `", "`, except `" & "` before the last one
///
/// # Examples
///
/// ```
/// use catalog_dl::template::format::natural_join;
///
/// assert_eq!(natural_join(&["A", "B", "C"]), "A, B & C");
/// assert_eq!(natural_join(&["A"]), "A");
/// assert_eq!(natural_join::<&str>(&[]), "");
/// ```
pub fn natural_join<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!(
                "{}{NATURAL_LAST_SEPARATOR}{}",
                head.join(DEFAULT_LIST_SEPARATOR),
                last.as_ref()
            )
        }
    }
}

/// Check a modifier against the kind of the field it is attached to
pub(crate) fn check_modifier(
    kind: FieldKind,
    field: &str,
    modifier: &str,
) -> Result<(), TemplateError> {
    let invalid = |reason: &str| TemplateError::InvalidModifier {
        field: field.to_string(),
        modifier: modifier.to_string(),
        reason: reason.to_string(),
    };

    match kind {
        // Any separator is valid, the empty one included
        FieldKind::List => Ok(()),
        _ if modifier.is_empty() => Err(invalid("empty modifier")),
        FieldKind::Text => Ok(()),
        FieldKind::Number => match modifier.trim().parse::<usize>() {
            Ok(width) if width <= MAX_PAD_WIDTH => Ok(()),
            Ok(_) => Err(invalid(&format!(
                "padding width must be at most {MAX_PAD_WIDTH}"
            ))),
            Err(_) => Err(invalid("expected a zero-padding width")),
        },
        FieldKind::Date => {
            if StrftimeItems::new(modifier).any(|item| matches!(item, Item::Error)) {
                return Err(invalid("invalid date format"));
            }
            // time and offset specifiers parse but cannot be applied to a date
            let mut sample = String::new();
            if write!(sample, "{}", NaiveDate::default().format(modifier)).is_err() {
                return Err(invalid("date format needs a time of day or time zone"));
            }
            Ok(())
        }
    }
}

/// Render the resolved value of `field` with an optional modifier
///
/// Modifiers are expected to have passed [`check_modifier`]. A date format
/// that still cannot be applied is reported as
/// [`TemplateError::InvalidModifier`].
pub(crate) fn format_value(
    field: &str,
    value: &FieldValue,
    modifier: Option<&str>,
) -> Result<String, TemplateError> {
    let formatted = match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Number(None) | FieldValue::Date(None) => String::new(),
        FieldValue::Number(Some(n)) => {
            let width = modifier
                .and_then(|m| m.trim().parse::<usize>().ok())
                .filter(|w| *w <= MAX_PAD_WIDTH)
                .unwrap_or(0);
            format!("{n:0width$}")
        }
        FieldValue::Date(Some(date)) => {
            let fmt = modifier.unwrap_or(DEFAULT_DATE_FORMAT);
            let mut out = String::new();
            write!(out, "{}", date.format(fmt)).map_err(|_| TemplateError::InvalidModifier {
                field: field.to_string(),
                modifier: fmt.to_string(),
                reason: "date format cannot be applied".to_string(),
            })?;
            out
        }
        FieldValue::List(items) => match modifier {
            None => items.join(DEFAULT_LIST_SEPARATOR),
            Some(NATURAL) => natural_join(items),
            Some(separator) => items.join(separator),
        },
    };
    Ok(formatted)
}
