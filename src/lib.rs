//! vault-dispatch - publish-state engine for a private note vault
//!
//! Reconciles vault content against the publish registry to classify
//! every candidate note (Unpublished / Live / Modified), applies the
//! frontmatter-derived visibility policy, and gates publishing behind
//! safety checks. The CLI in `main.rs` is a thin layer over
//! [`DispatchEngine`].

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod frontmatter;
pub mod git;
pub mod lint;
pub mod markdown;
pub mod media;
pub mod note;
pub mod publisher;
pub mod registry;
pub mod render;
pub mod scanner;
pub mod status;
pub mod util;
pub mod visibility;

pub use cli::{Cli, Command};
pub use config::Config;
pub use engine::DispatchEngine;
pub use error::{PublishError, RegistryError, ScanError, UnpublishError};
pub use fingerprint::Fingerprint;
pub use frontmatter::Frontmatter;
pub use note::{Note, NoteView};
pub use registry::{PublishRecord, PublishRegistry};
pub use status::PublishStatus;
pub use visibility::Visibility;
