//! Note records
//!
//! [`Note`] is the ephemeral per-scan view of a vault file. [`NoteView`]
//! is the assembled, read-only projection the rest of the app consumes:
//! Note plus publish status, warnings, and resolved visibility. Both
//! are rebuilt from scratch every scan, never persisted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::frontmatter::Frontmatter;
use crate::markdown;
use crate::status::PublishStatus;
use crate::util;
use crate::visibility::Visibility;

/// A scanned vault note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub path: PathBuf,
    pub filename: String,
    /// Path of the containing folder relative to the vault root
    pub source_dir: String,
    pub frontmatter: Frontmatter,
    pub body: String,
    pub fingerprint: Fingerprint,
    /// Epoch seconds; frontmatter `date` preferred over filesystem ctime
    pub created: u64,
    /// Epoch seconds; frontmatter `modified` preferred over filesystem mtime
    pub modified: u64,
    pub word_count: usize,
}

impl Note {
    /// The publish slug: filename stem, slugified.
    pub fn slug(&self) -> String {
        util::slug_from_path(&self.path)
    }

    /// Effective title: frontmatter `title`, else the first heading.
    pub fn title(&self) -> Option<String> {
        self.frontmatter
            .title
            .clone()
            .or_else(|| markdown::first_heading(&self.body))
    }
}

/// The assembled projection returned by `scan()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteView {
    pub path: PathBuf,
    pub filename: String,
    pub source_dir: String,
    pub title: Option<String>,
    pub dek: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub created: u64,
    pub modified: u64,
    pub word_count: usize,
    pub status: PublishStatus,
    pub published_url: Option<String>,
    pub published_at: Option<u64>,
    /// Ordered: synthetic "Modified since publish" first (when present),
    /// then linter warnings in rule order.
    pub warnings: Vec<String>,
    /// No blocking lint warnings remain
    pub is_safe: bool,
    pub visibility: Visibility,
    /// Plaintext password from the vault source, for the
    /// copy-link-plus-password convenience. Never persisted.
    pub password: Option<String>,
}
