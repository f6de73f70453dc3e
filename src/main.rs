use clap::Parser;
use tracing_subscriber::EnvFilter;
use vault_dispatch::{Cli, Command, Config, DispatchEngine};

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(vault) = cli.vault {
        config.vault_path = vault;
    }
    let engine = DispatchEngine::new(config).map_err(std::io::Error::other)?;

    match cli.command {
        Command::List { limit } => cmd::list::run(&engine, limit, cli.json),
        Command::Lint { path } => cmd::lint::run(&engine, &path, cli.json),
        Command::Publish { path, slug, republish } => {
            cmd::publish::run(&engine, &path, slug.as_deref(), republish, cli.json)
        }
        Command::Unpublish { slug } => cmd::unpublish::run(&engine, &slug, cli.json),
        Command::Registry => cmd::registry::run(&engine, cli.json),
        Command::Status => cmd::status::run(&engine, cli.json),
    }
}

mod cmd {
    pub mod lint;
    pub mod list;
    pub mod publish;
    pub mod registry;
    pub mod status;
    pub mod unpublish;

    use std::path::{Path, PathBuf};
    use vault_dispatch::DispatchEngine;

    /// Note paths may be absolute or relative to the vault root.
    pub fn resolve_note_path(engine: &DispatchEngine, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            engine.config().vault_path.join(path)
        }
    }
}
