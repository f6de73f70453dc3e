//! DispatchEngine - scan/publish orchestration
//!
//! Owns the config and the publish registry and exposes the three
//! operations the rest of the app consumes: `scan`, `publish`,
//! `unpublish`. Concurrency discipline:
//!
//! - One scan at a time: a scan-in-progress flag makes overlapping
//!   calls fail fast with `ScanInProgress` so refresh requests
//!   coalesce instead of queueing.
//! - Classification reads a registry snapshot taken once at scan
//!   start; a publish landing mid-scan cannot produce a half-updated
//!   view.
//! - Publish/unpublish serialize per slug through an in-flight set;
//!   a concurrent operation on the same slug is rejected as busy, and
//!   started operations always run to completion.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::info;

use crate::config::Config;
use crate::constants as C;
use crate::error::{PublishError, RegistryError, ScanError, UnpublishError};
use crate::git::{self, RepoStatus};
use crate::lint;
use crate::note::{Note, NoteView};
use crate::publisher::{self, PublishOutcome};
use crate::registry::{PublishRecord, PublishRegistry, RegistrySnapshot};
use crate::scanner;
use crate::status::{self, PublishStatus};
use crate::util;
use crate::visibility;

/// Core engine for publish-state operations.
pub struct DispatchEngine {
    config: Config,
    registry: Mutex<PublishRegistry>,
    scanning: AtomicBool,
    in_flight: Mutex<HashSet<String>>,
}

impl DispatchEngine {
    /// Create an engine, loading the registry from the configured
    /// location.
    pub fn new(config: Config) -> Result<Self, RegistryError> {
        let registry = PublishRegistry::load(config.registry_path())?;
        Ok(DispatchEngine {
            config,
            registry: Mutex::new(registry),
            scanning: AtomicBool::new(false),
            in_flight: Mutex::new(HashSet::new()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the vault and return the assembled NoteViews.
    ///
    /// The list is fully built before it is returned; callers never
    /// observe a partially-updated result. A second scan while one is
    /// running gets `ScanError::ScanInProgress`.
    pub fn scan(&self) -> Result<Vec<NoteView>, ScanError> {
        if self
            .scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ScanError::ScanInProgress);
        }
        let _guard = ScanGuard(&self.scanning);

        let snapshot = self.registry_snapshot();
        let notes = scanner::scan_vault(&self.config)?;

        Ok(notes
            .into_iter()
            .map(|note| assemble(note, &snapshot))
            .collect())
    }

    /// Publish the note at `path`. The slug defaults to the filename
    /// stem, slugified.
    pub fn publish(
        &self,
        path: &Path,
        slug: Option<&str>,
        is_republish: bool,
    ) -> Result<PublishOutcome, PublishError> {
        let slug = slug
            .map(str::to_string)
            .unwrap_or_else(|| util::slug_from_path(path));

        let _slot = SlugSlot::claim(&self.in_flight, &slug)
            .ok_or_else(|| PublishError::SlugBusy(slug.clone()))?;

        let note = scanner::read_note(path, &self.config.vault_path).map_err(|source| {
            PublishError::NoteRead { path: path.to_path_buf(), source }
        })?;

        // Single writer: the registry lock is held for the whole
        // read-modify-write
        let mut registry = self.registry.lock().expect("registry lock poisoned");
        let outcome =
            publisher::publish_note(&self.config, &mut registry, &note, &slug, is_republish)?;
        info!(slug, "publish complete");
        Ok(outcome)
    }

    /// Remove a slug's publish record. The note reverts to Unpublished
    /// on the next scan.
    pub fn unpublish(&self, slug: &str) -> Result<PublishRecord, UnpublishError> {
        let _slot = SlugSlot::claim(&self.in_flight, slug)
            .ok_or_else(|| UnpublishError::SlugBusy(slug.to_string()))?;

        let mut registry = self.registry.lock().expect("registry lock poisoned");
        publisher::unpublish_slug(&self.config, &mut registry, slug)
    }

    /// Current publish records, for display.
    pub fn records(&self) -> Vec<PublishRecord> {
        let registry = self.registry.lock().expect("registry lock poisoned");
        registry.records().cloned().collect()
    }

    /// Site repo health, surfaced before publishing.
    pub fn repo_status(&self) -> RepoStatus {
        git::repo_status(&self.config.site_repo, C::CONTENT_SUBDIR)
    }

    fn registry_snapshot(&self) -> RegistrySnapshot {
        self.registry.lock().expect("registry lock poisoned").snapshot()
    }
}

/// Clears the scan-in-progress flag when the scan ends, on every path.
struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Per-slug mutual exclusion for publish/unpublish. Claiming fails if
/// an operation for the slug is already in flight; the slot is freed
/// on drop, so completed and failed operations both release it.
struct SlugSlot<'a> {
    set: &'a Mutex<HashSet<String>>,
    slug: String,
}

impl<'a> SlugSlot<'a> {
    fn claim(set: &'a Mutex<HashSet<String>>, slug: &str) -> Option<Self> {
        let mut guard = set.lock().expect("in-flight lock poisoned");
        if !guard.insert(slug.to_string()) {
            return None;
        }
        Some(SlugSlot { set, slug: slug.to_string() })
    }
}

impl Drop for SlugSlot<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .expect("in-flight lock poisoned")
            .remove(&self.slug);
    }
}

/// Join one scanned note with the registry snapshot into the final
/// projection.
fn assemble(note: Note, snapshot: &RegistrySnapshot) -> NoteView {
    let classification = status::classify(&note, snapshot);
    let lint_warnings = lint::lint(&note);
    let is_safe = lint::is_safe(&lint_warnings);

    // Synthetic status warning first, then linter output in rule order
    let mut warnings = Vec::with_capacity(lint_warnings.len() + 1);
    if classification.status == PublishStatus::Modified {
        warnings.push(C::WARN_MODIFIED_SINCE_PUBLISH.to_string());
    }
    warnings.extend(lint_warnings.into_iter().map(|w| w.message));

    NoteView {
        title: note.title(),
        dek: note.frontmatter.dek.clone(),
        date: note.frontmatter.date.clone(),
        tags: note.frontmatter.tags.clone(),
        visibility: visibility::resolve(&note.frontmatter),
        password: note.frontmatter.password.clone(),
        path: note.path,
        filename: note.filename,
        source_dir: note.source_dir,
        created: note.created,
        modified: note.modified,
        word_count: note.word_count,
        status: classification.status,
        published_url: classification.published_url,
        published_at: classification.published_at,
        warnings,
        is_safe,
    }
}
