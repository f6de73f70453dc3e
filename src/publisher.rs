//! Publish/unpublish executor
//!
//! The side-effecting transitions. Publish copies the artifact into
//! the site repo, records it in the registry, then hands off to the
//! version-control collaborator. Registry truth and remote-sync truth
//! are kept separate: a failed push still leaves the note published as
//! far as the registry and local copy are concerned, and the outcome
//! tells the caller so it can retry the sync alone.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::constants as C;
use crate::error::{PublishError, UnpublishError};
use crate::git::{self, RemoteSync};
use crate::lint;
use crate::note::Note;
use crate::registry::{PublishRecord, PublishRegistry};
use crate::util;
use crate::visibility;

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub record: PublishRecord,
    pub remote_sync: RemoteSync,
}

/// Publish one note under `slug`.
///
/// First publish requires a clean safety verdict; `is_republish`
/// bypasses the gate (a previously-published, now-unsafe note may be
/// republished deliberately). Republishing identical content keeps the
/// recorded fingerprint and still bumps `published_at` — explicit
/// republish events stay visible in the audit trail.
pub fn publish_note(
    config: &Config,
    registry: &mut PublishRegistry,
    note: &Note,
    slug: &str,
    is_republish: bool,
) -> Result<PublishOutcome, PublishError> {
    if !is_republish {
        let warnings = lint::lint(note);
        if !lint::is_safe(&warnings) {
            return Err(PublishError::Unsafe {
                warnings: warnings
                    .into_iter()
                    .filter(|w| w.blocking)
                    .map(|w| w.message)
                    .collect(),
            });
        }
    }

    let vis = visibility::resolve(&note.frontmatter);
    let password_hash = note
        .frontmatter
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(visibility::hash_password);

    // Artifacts are filed under the current year, matching the site's
    // content layout
    let year = Utc::now().format(C::YEAR_FORMAT).to_string();
    let artifact_dir = config.site_repo.join(C::CONTENT_SUBDIR).join(&year);
    let artifact = artifact_dir.join(format!("{}.{}", slug, C::MARKDOWN_EXTENSION));

    fs::create_dir_all(&artifact_dir)?;
    fs::copy(&note.path, &artifact)?;

    let record = PublishRecord {
        slug: slug.to_string(),
        published_url: format!("{}/blog/{}/{}", config.base_url, year, slug),
        published_at: util::now_epoch_secs(),
        fingerprint: note.fingerprint.clone(),
        visibility: vis,
        password_hash,
    };
    registry.upsert(record.clone())?;
    info!(slug, url = %record.published_url, "recorded publish");

    let remote_sync = git::sync(&config.site_repo, &artifact, slug);

    Ok(PublishOutcome { record, remote_sync })
}

/// Remove a slug's publish record (and, best-effort, the copied
/// artifact). The vault source file is never touched.
pub fn unpublish_slug(
    config: &Config,
    registry: &mut PublishRegistry,
    slug: &str,
) -> Result<PublishRecord, UnpublishError> {
    let record = registry
        .remove(slug)?
        .ok_or_else(|| UnpublishError::NotPublished(slug.to_string()))?;

    if let Some(artifact) = artifact_path(config, &record) {
        let _ = fs::remove_file(artifact);
    }
    info!(slug, "removed publish record");
    Ok(record)
}

/// Reconstruct the artifact path from the published URL's trailing
/// `.../{year}/{slug}` segments.
fn artifact_path(config: &Config, record: &PublishRecord) -> Option<PathBuf> {
    let mut segments = record.published_url.rsplit('/');
    let slug = segments.next()?;
    let year = segments.next()?;
    Some(
        config
            .site_repo
            .join(C::CONTENT_SUBDIR)
            .join(year)
            .join(format!("{}.{}", slug, C::MARKDOWN_EXTENSION)),
    )
}
