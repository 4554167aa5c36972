//! Utility functions for file names and byte counts

use crate::config::SanitizePolicy;

/// Units for [`format_bytes`], each 1024 times the previous
const BYTE_UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Make a rendered file name safe for common filesystems
///
/// Applied to the complete rendered name, never per field:
/// - every character in `policy.illegal_chars` and every control character is
///   replaced with `policy.replacement`
/// - with `policy.trim`, surrounding whitespace and trailing dots are removed
///   (Windows refuses names ending in a dot)
/// - an empty result becomes `policy.fallback`
///
/// # Arguments
///
/// * `name` - The rendered file name
/// * `policy` - Which characters to replace and with what
///
/// # Examples
///
/// ```
/// use catalog_dl::config::SanitizePolicy;
/// use catalog_dl::utils::sanitize_file_name;
///
/// let policy = SanitizePolicy::default();
/// assert_eq!(sanitize_file_name("AC/DC: Live?", &policy), "AC_DC_ Live_");
/// assert_eq!(sanitize_file_name(" ... ", &policy), "Untitled");
/// ```
pub fn sanitize_file_name(name: &str, policy: &SanitizePolicy) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_control() || policy.illegal_chars.contains(c) {
            out.push_str(&policy.replacement);
        } else {
            out.push(c);
        }
    }

    let cleaned = if policy.trim {
        out.trim_end_matches(|c: char| c == '.' || c.is_whitespace())
            .trim_start()
            .to_string()
    } else {
        out
    };

    if cleaned.is_empty() {
        tracing::debug!(name, fallback = %policy.fallback, "file name empty after sanitation");
        policy.fallback.clone()
    } else {
        cleaned
    }
}

/// Format a byte count for display
///
/// Binary units (1 KB = 1024 bytes). Counts below 1024 are shown as whole
/// bytes; larger counts with one decimal, truncated toward zero so a value
/// never reads as the next unit before reaching it.
///
/// # Examples
///
/// ```
/// use catalog_dl::utils::format_bytes;
///
/// assert_eq!(format_bytes(1023), "1023 B");
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1024 * 1024 - 1), "1023.9 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut unit = 0;
    let mut divisor: u128 = 1024;
    while unit + 1 < BYTE_UNITS.len() && u128::from(bytes) >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let tenths = u128::from(bytes) * 10 / divisor;
    format!("{}.{} {}", tenths / 10, tenths % 10, BYTE_UNITS[unit])
}
