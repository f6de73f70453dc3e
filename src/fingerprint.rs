//! Content fingerprinting
//!
//! A fingerprint is a Sha256 hex digest of a note's body — the text
//! after the frontmatter block. The choice of "the body" lives here
//! and nowhere else: frontmatter-only edits (adding a tag, flipping
//! `unlisted`) do not change the fingerprint and so never flip a note
//! to Modified. Body comparison is exact bytes; any whitespace change
//! is a divergence.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A deterministic hash of a note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a (frontmatter-stripped) body.
    pub fn of_body(body: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(body.as_bytes());
        Fingerprint(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Abbreviated git-style for display
        write!(f, "{}", &self.0[..12.min(self.0.len())])
    }
}
