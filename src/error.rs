//! Error taxonomy for vault-dispatch
//!
//! All failures are discriminated types; callers branch on variants,
//! never on message strings. The CLI layer decides presentation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning the vault.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Configuration error: the vault root does not exist or is not a
    /// directory. Surfaced once per scan attempt, not per file.
    #[error("vault root not found: {}", .0.display())]
    VaultRootMissing(PathBuf),

    /// Another scan of the same vault is already running. The caller
    /// should coalesce with the in-flight scan rather than queue.
    #[error("a scan is already in progress")]
    ScanInProgress,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors raised by the publish registry store.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to write registry at {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },

    #[error("registry at {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised by the publish operation.
#[derive(Debug, Error)]
pub enum PublishError {
    /// First publish requires a clean safety verdict. The payload
    /// enumerates the blocking warnings still present.
    #[error("note is not safe to publish: {}", .warnings.join(", "))]
    Unsafe { warnings: Vec<String> },

    /// A publish or unpublish for the same slug is already in flight.
    /// Recoverable: retry after the in-flight operation completes.
    #[error("an operation for slug '{0}' is already in flight")]
    SlugBusy(String),

    #[error("failed to read note {}: {source}", .path.display())]
    NoteRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors raised by the unpublish operation.
#[derive(Debug, Error)]
pub enum UnpublishError {
    /// No PublishRecord exists for the slug. The registry is left
    /// unchanged.
    #[error("slug '{0}' is not published")]
    NotPublished(String),

    /// See [`PublishError::SlugBusy`].
    #[error("an operation for slug '{0}' is already in flight")]
    SlugBusy(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
