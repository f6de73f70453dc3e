//! Vault scanner
//!
//! Enumerates publish-candidate notes. Only the two configured
//! publishable folders are walked; excluded folders are skipped
//! entirely, never partially, and a canonical-path guard keeps
//! excluded content from leaking back in through symlinks or nested
//! same-name folders.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::constants as C;
use crate::error::ScanError;
use crate::fingerprint::Fingerprint;
use crate::frontmatter;
use crate::note::Note;
use crate::util;

/// Scan the vault for eligible notes.
///
/// A missing vault root is a configuration error surfaced once. An
/// unreadable individual file is skipped with a logged warning and the
/// scan continues. Output order is stable (sorted by path).
pub fn scan_vault(config: &Config) -> Result<Vec<Note>, ScanError> {
    if !config.vault_path.is_dir() {
        return Err(ScanError::VaultRootMissing(config.vault_path.clone()));
    }
    let vault_root =
        dunce::canonicalize(&config.vault_path).unwrap_or_else(|_| config.vault_path.clone());

    let mut notes = Vec::new();
    for dir in &config.publishable_dirs {
        let root = config.vault_path.join(dir);
        if !root.is_dir() {
            debug!(dir, "publishable folder not present, skipping");
            continue;
        }
        walk(&root, &vault_root, config, &mut notes)?;
    }

    notes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(notes)
}

fn is_excluded(name: &str, config: &Config) -> bool {
    config.all_excluded().any(|d| d == name)
}

/// An entry is admissible only if its canonical path stays under the
/// vault root and passes through no excluded component. This is what
/// stops a symlink inside blog/ from re-including private/ content.
fn canonical_path_admissible(path: &Path, vault_root: &Path, config: &Config) -> bool {
    let canonical = match dunce::canonicalize(path) {
        Ok(p) => p,
        Err(_) => return false,
    };
    if !canonical.starts_with(vault_root) {
        return false;
    }
    canonical
        .strip_prefix(vault_root)
        .map(|rel| {
            !rel.components().any(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .is_some_and(|name| is_excluded(name, config))
            })
        })
        .unwrap_or(false)
}

fn walk(
    dir: &Path,
    vault_root: &Path,
    config: &Config,
    notes: &mut Vec<Note>,
) -> Result<(), ScanError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            // Unreadable subdirectory: per-directory skip, not fatal
            warn!(dir = %util::display_path(dir), error = %e, "skipping unreadable directory");
            return Ok(());
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if path.is_dir() {
            if is_excluded(&name, config) {
                continue;
            }
            if !canonical_path_admissible(&path, vault_root, config) {
                warn!(path = %util::display_path(&path), "skipping directory escaping the vault");
                continue;
            }
            walk(&path, vault_root, config, notes)?;
        } else if path.extension().is_some_and(|ext| ext == C::MARKDOWN_EXTENSION) {
            if !canonical_path_admissible(&path, vault_root, config) {
                warn!(path = %util::display_path(&path), "skipping file escaping the vault");
                continue;
            }
            match read_note(&path, &config.vault_path) {
                Ok(note) => notes.push(note),
                Err(e) => {
                    warn!(path = %util::display_path(&path), error = %e, "skipping unreadable note");
                }
            }
        }
    }
    Ok(())
}

/// Build a Note from one file. Malformed frontmatter degrades to an
/// empty record (the linter will flag the missing fields); only an
/// unreadable file is an error. Also used by the publish path to load
/// a single candidate.
pub fn read_note(path: &Path, vault_path: &Path) -> std::io::Result<Note> {
    let text = fs::read_to_string(path)?;
    let metadata = fs::metadata(path)?;

    let (fm, body) = frontmatter::parse(&text);

    let fs_modified = util::epoch_secs(metadata.modified());
    let fs_created = metadata
        .created()
        .map(|t| util::epoch_secs(Ok(t)))
        .unwrap_or(fs_modified);

    // Frontmatter dates win over filesystem dates when parseable
    let created = fm
        .date
        .as_deref()
        .and_then(util::parse_iso_date)
        .unwrap_or(fs_created);
    let modified = fm
        .extra
        .get("modified")
        .and_then(|v| v.as_str())
        .and_then(util::parse_iso_date)
        .unwrap_or(fs_modified);

    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let source_dir = path
        .parent()
        .and_then(|p| p.strip_prefix(vault_path).ok())
        .map(util::display_path)
        .unwrap_or_default();

    Ok(Note {
        path: PathBuf::from(path),
        filename,
        source_dir,
        fingerprint: Fingerprint::of_body(body),
        word_count: body.split_whitespace().count(),
        body: body.to_string(),
        frontmatter: fm,
        created,
        modified,
    })
}
