//! Command-line interface definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// vault-dispatch - publish vault notes to the public site
///
/// ```bash
/// vault-dispatch list                    # Scan and show publish state
/// vault-dispatch list --json             # Same, for scripting
/// vault-dispatch lint blog/post.md       # Warnings for one note
/// vault-dispatch publish blog/post.md    # First publish (gated)
/// vault-dispatch publish blog/post.md --republish
/// vault-dispatch unpublish my-post
/// vault-dispatch registry                # What is live
/// vault-dispatch status                  # Site repo health
/// ```
///
/// The vault root and site repo come from the config file
/// (~/.config/vault-dispatch/config.json), overridable with
/// `VAULT_DISPATCH_VAULT` / `VAULT_DISPATCH_SITE` or `--vault`.
#[derive(Parser, Debug)]
#[command(name = "vault-dispatch")]
#[command(version = "0.1.0")]
#[command(about = "Publish-state engine for curating vault notes onto a public site")]
pub struct Cli {
    /// Config file path (default: ~/.config/vault-dispatch/config.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Vault root override
    #[arg(long, value_name = "PATH", global = true)]
    pub vault: Option<PathBuf>,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the vault and show every candidate's publish state
    List {
        /// Show at most this many notes, most recently modified first
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the safety warnings for one note
    Lint {
        /// Note path (absolute, or relative to the vault root)
        path: PathBuf,
    },

    /// Publish a note to the site
    Publish {
        /// Note path (absolute, or relative to the vault root)
        path: PathBuf,

        /// Publish slug (default: filename stem, slugified)
        #[arg(short, long)]
        slug: Option<String>,

        /// Republish: bypass the safety gate for an already-published note
        #[arg(short, long)]
        republish: bool,
    },

    /// Remove a note from the site
    Unpublish {
        /// Publish slug
        slug: String,
    },

    /// Show the publish registry (what is live)
    Registry,

    /// Show site repo health (branch, dirty files, conflicts)
    Status,
}
