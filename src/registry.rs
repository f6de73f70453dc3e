//! Publish registry
//!
//! The persisted slug → [`PublishRecord`] mapping: the single source
//! of truth for what is live on the site. Loaded at scan start,
//! written transactionally (temp file + rename) on publish/unpublish.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::fingerprint::Fingerprint;
use crate::visibility::Visibility;

/// Last-published metadata for one slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRecord {
    pub slug: String,
    pub published_url: String,
    /// Epoch seconds of the most recent publish event
    pub published_at: u64,
    /// Fingerprint of the body at publish time
    pub fingerprint: Fingerprint,
    pub visibility: Visibility,
    /// One-way hash; the plaintext is never persisted here
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password_hash: Option<String>,
}

/// Read-only copy of the registry taken at scan start, so every note
/// in one scan is classified against the same state.
pub type RegistrySnapshot = BTreeMap<String, PublishRecord>;

/// The persisted registry store.
#[derive(Debug)]
pub struct PublishRegistry {
    path: PathBuf,
    records: BTreeMap<String, PublishRecord>,
}

impl PublishRegistry {
    /// Load from disk. A missing file is an empty registry, not an
    /// error (first run).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| RegistryError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(RegistryError::Read { path, source }),
        };
        Ok(PublishRegistry { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, slug: &str) -> Option<&PublishRecord> {
        self.records.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.records.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &PublishRecord> {
        self.records.values()
    }

    /// Copy-on-read snapshot for classification.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.records.clone()
    }

    /// Insert or replace the record for its slug, then persist.
    pub fn upsert(&mut self, record: PublishRecord) -> Result<(), RegistryError> {
        self.records.insert(record.slug.clone(), record);
        self.save()
    }

    /// Remove a slug's record, then persist. Returns the removed
    /// record, or None (registry untouched, nothing written).
    pub fn remove(&mut self, slug: &str) -> Result<Option<PublishRecord>, RegistryError> {
        match self.records.remove(slug) {
            Some(record) => {
                self.save()?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Write the registry transactionally: serialize to a sibling temp
    /// file, then rename over the target.
    fn save(&self) -> Result<(), RegistryError> {
        let write_err = |source| RegistryError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Serialization of BTreeMap<String, _> cannot fail
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(slug: &str, body: &str) -> PublishRecord {
        PublishRecord {
            slug: slug.into(),
            published_url: format!("https://example.com/blog/2026/{}", slug),
            published_at: 1_750_000_000,
            fingerprint: Fingerprint::of_body(body),
            visibility: Visibility::Public,
            password_hash: None,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let reg = PublishRegistry::load(dir.path().join("registry.json")).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn test_upsert_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");

        let mut reg = PublishRegistry::load(&path).unwrap();
        reg.upsert(record("hello-world", "body")).unwrap();

        let reloaded = PublishRegistry::load(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.get("hello-world").unwrap().fingerprint,
            Fingerprint::of_body("body")
        );
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");

        let mut reg = PublishRegistry::load(&path).unwrap();
        reg.upsert(record("post", "v1")).unwrap();
        reg.upsert(record("post", "v2")).unwrap();

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("post").unwrap().fingerprint, Fingerprint::of_body("v2"));
    }

    #[test]
    fn test_remove_missing_slug_leaves_registry_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");

        let mut reg = PublishRegistry::load(&path).unwrap();
        reg.upsert(record("keep", "body")).unwrap();

        assert!(reg.remove("absent").unwrap().is_none());
        assert_eq!(reg.len(), 1);

        let reloaded = PublishRegistry::load(&path).unwrap();
        assert!(reloaded.contains("keep"));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let dir = TempDir::new().unwrap();
        let mut reg = PublishRegistry::load(dir.path().join("registry.json")).unwrap();
        reg.upsert(record("post", "v1")).unwrap();

        let snap = reg.snapshot();
        reg.remove("post").unwrap();
        assert!(snap.contains_key("post"));
        assert!(!reg.contains("post"));
    }

    #[test]
    fn test_malformed_registry_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, "not json at all").unwrap();

        match PublishRegistry::load(&path) {
            Err(RegistryError::Parse { .. }) => {}
            other => panic!("expected Parse error, got {:?}", other),
        }
    }
}
