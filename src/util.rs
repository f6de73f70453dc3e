//! Small shared helpers: slugs, paths, date parsing.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};

/// Convert a title or filename stem to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_is_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            result.push(c);
            prev_is_dash = false;
        } else if !prev_is_dash && !result.is_empty() {
            result.push('-');
            prev_is_dash = true;
        }
    }

    result.trim_matches('-').to_string()
}

/// Derive the publish slug from a note path: filename stem, slugified.
/// Deterministic, and matches the published URL segment.
pub fn slug_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    slugify(&stem)
}

/// Display a path with forward slashes (cross-platform standard).
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Epoch seconds for a filesystem time, zero on failure.
pub fn epoch_secs(time: std::io::Result<SystemTime>) -> u64 {
    time.unwrap_or(SystemTime::UNIX_EPOCH)
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Current time as epoch seconds.
pub fn now_epoch_secs() -> u64 {
    epoch_secs(Ok(SystemTime::now()))
}

/// Parse frontmatter dates: RFC 3339, bare datetime, or `YYYY-MM-DD`.
pub fn parse_iso_date(date_str: &str) -> Option<u64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.timestamp() as u64);
    }
    if let Ok(dt) = date_str.parse::<DateTime<Utc>>() {
        return Some(dt.timestamp() as u64);
    }
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as u64);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test@Note#123"), "test-note-123");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path(&PathBuf::from("/vault/blog/My Great Post.md")), "my-great-post");
        assert_eq!(slug_from_path(&PathBuf::from("already-sluggy.md")), "already-sluggy");
    }

    #[test]
    fn test_parse_iso_date_variants() {
        assert!(parse_iso_date("2026-01-15").is_some());
        assert!(parse_iso_date("2026-01-15T09:30:00-05:00").is_some());
        assert!(parse_iso_date("not a date").is_none());
    }

    #[test]
    fn test_slug_is_deterministic() {
        let p = PathBuf::from("/v/blog/Some Note.md");
        assert_eq!(slug_from_path(&p), slug_from_path(&p));
    }
}
