//! Publish status classification
//!
//! The core state machine. States in precedence order, first match
//! wins:
//!
//! 1. Unpublished — no record for the slug.
//! 2. Live — record exists, fingerprints match exactly.
//! 3. Modified — record exists, fingerprints differ. Not a failure
//!    state: the note is still live at its last-published content.
//!
//! Only two events transition: Publish (→ Live, recording the current
//! fingerprint) and Unpublish (→ Unpublished, removing the record).
//! Comparison is exact-match on the fingerprint, re-evaluated fresh
//! each scan; editing an already-Modified note stays Modified.

use serde::{Deserialize, Serialize};

use crate::note::Note;
use crate::registry::RegistrySnapshot;

/// Lifecycle status of a note relative to the publish registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    Unpublished,
    Live,
    Modified,
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PublishStatus::Unpublished => "unpublished",
            PublishStatus::Live => "live",
            PublishStatus::Modified => "modified",
        };
        f.write_str(s)
    }
}

/// Classification result merged into the NoteView.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: PublishStatus,
    pub published_url: Option<String>,
    pub published_at: Option<u64>,
}

/// Classify one note against a registry snapshot.
pub fn classify(note: &Note, registry: &RegistrySnapshot) -> Classification {
    match registry.get(&note.slug()) {
        None => Classification {
            status: PublishStatus::Unpublished,
            published_url: None,
            published_at: None,
        },
        Some(record) => {
            let status = if record.fingerprint == note.fingerprint {
                PublishStatus::Live
            } else {
                PublishStatus::Modified
            };
            Classification {
                status,
                published_url: Some(record.published_url.clone()),
                published_at: Some(record.published_at),
            }
        }
    }
}
