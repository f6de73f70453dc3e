//! Visibility policy resolution
//!
//! Pure and total: every frontmatter combination maps to exactly one
//! of the three states. A password always wins, and password-protected
//! content is never listed regardless of the literal `unlisted` flag.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::frontmatter::Frontmatter;

/// Discoverability of a published note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Unlisted,
    PasswordProtected,
}

impl Visibility {
    /// PasswordProtected implies unlisted.
    pub fn is_listed(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::PasswordProtected => "password",
        };
        f.write_str(s)
    }
}

/// Resolve effective visibility from frontmatter.
pub fn resolve(frontmatter: &Frontmatter) -> Visibility {
    match &frontmatter.password {
        Some(p) if !p.is_empty() => Visibility::PasswordProtected,
        _ if frontmatter.unlisted => Visibility::Unlisted,
        _ => Visibility::Public,
    }
}

/// One-way hash for the persisted record. The plaintext never leaves
/// the vault source.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(unlisted: bool, password: Option<&str>) -> Frontmatter {
        Frontmatter {
            unlisted,
            password: password.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolution_is_total() {
        // Exhaustive over the 2 x (password present/absent) grid
        assert_eq!(resolve(&fm(false, None)), Visibility::Public);
        assert_eq!(resolve(&fm(true, None)), Visibility::Unlisted);
        assert_eq!(resolve(&fm(false, Some("abc123"))), Visibility::PasswordProtected);
        assert_eq!(resolve(&fm(true, Some("abc123"))), Visibility::PasswordProtected);
    }

    #[test]
    fn test_password_implies_unlisted() {
        // Scenario C: password with literal unlisted: false
        let v = resolve(&fm(false, Some("abc123")));
        assert_eq!(v, Visibility::PasswordProtected);
        assert!(!v.is_listed());
    }

    #[test]
    fn test_empty_password_does_not_protect() {
        assert_eq!(resolve(&fm(false, Some(""))), Visibility::Public);
        assert_eq!(resolve(&fm(true, Some(""))), Visibility::Unlisted);
    }

    #[test]
    fn test_hash_password_one_way_and_stable() {
        let h1 = hash_password("abc123");
        let h2 = hash_password("abc123");
        assert_eq!(h1, h2);
        assert_ne!(h1, "abc123");
        assert_eq!(h1.len(), 64);
    }
}
