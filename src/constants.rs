//! Constants for vault-dispatch
//!
//! This module contains the folder names, format strings, and limits
//! used throughout the codebase to avoid duplication.

// === Vault Layout ===

/// Publishable folders under the vault root. Only these two are ever
/// scanned for publish candidates.
pub const PUBLISHABLE_DIRS: [&str; 2] = ["blog", "drafts"];

/// Folders skipped entirely, at any depth, in addition to the
/// configured exclusion list.
pub const ALWAYS_EXCLUDED_DIRS: [&str; 2] = ["_stale", "_archive"];

/// Default exclusion list for fresh configs.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 5] = [
    "week-notes",
    "robot-notes",
    "private",
    "templates",
    "attachments",
];

/// File extension recognized as a note
pub const MARKDOWN_EXTENSION: &str = "md";

// === Site Layout ===

/// Published artifacts land in <site_repo>/CONTENT_SUBDIR/<year>/<slug>.md
pub const CONTENT_SUBDIR: &str = "content/blog";

/// Default public site base URL
pub const DEFAULT_BASE_URL: &str = "https://ejfox.com";

/// Registry filename inside the site repo
pub const REGISTRY_FILENAME: &str = ".publish-registry.json";

// === Formats ===

/// Year folder format for published artifacts
pub const YEAR_FORMAT: &str = "%Y";

/// Display format for publish timestamps
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

// === Validation Limits ===

/// Maximum size of frontmatter to parse (prevents DoS on malformed files)
pub const MAX_FRONTMATTER_SIZE: usize = 64 * 1024; // 64KB

/// Link text longer than this many words earns an advisory
pub const MAX_LINK_TEXT_WORDS: usize = 4;

// === Warning Messages ===

/// Synthetic warning prepended when source diverges from the
/// published fingerprint. Not produced by the linter.
pub const WARN_MODIFIED_SINCE_PUBLISH: &str = "Modified since publish";

pub const WARN_NO_TITLE: &str = "No title";
pub const WARN_NO_DATE: &str = "No date in frontmatter";
pub const WARN_TODO_MARKERS: &str = "Has TODO/FIXME markers";
pub const WARN_LOCAL_MEDIA: &str = "Local media not uploaded";
pub const WARN_BROKEN_LINK: &str = "Broken link";
pub const WARN_LOCAL_VIDEO: &str = "Local video";
pub const WARN_LONG_LINK_TEXT: &str = "Long link text";
