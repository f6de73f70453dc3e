//! Configuration
//!
//! Vault and site locations plus the folder eligibility rules. Loaded
//! from an optional JSON file with env-var overrides on top, so both
//! the CLI and tests can point at throwaway directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;

/// Environment override for the vault root
pub const ENV_VAULT: &str = "VAULT_DISPATCH_VAULT";
/// Environment override for the site repo
pub const ENV_SITE_REPO: &str = "VAULT_DISPATCH_SITE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Private vault root
    pub vault_path: PathBuf,
    /// Checkout of the public site; published artifacts are copied here
    pub site_repo: PathBuf,
    /// Public base URL published notes resolve under
    pub base_url: String,
    /// The only folders eligible for publishing. Exactly two.
    pub publishable_dirs: [String; 2],
    /// Folders skipped entirely, at any depth
    pub excluded_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Config {
            vault_path: home.join("vault"),
            site_repo: home.join("code/website"),
            base_url: C::DEFAULT_BASE_URL.to_string(),
            publishable_dirs: C::PUBLISHABLE_DIRS.map(String::from),
            excluded_dirs: C::DEFAULT_EXCLUDED_DIRS.map(String::from).to_vec(),
        }
    }
}

impl Config {
    /// Load from a JSON file when given (or when the default config
    /// file exists), then apply env overrides.
    pub fn load(path: Option<&Path>) -> io::Result<Config> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_file() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Config::default(),
            },
        };

        if let Ok(vault) = std::env::var(ENV_VAULT) {
            config.vault_path = PathBuf::from(vault);
        }
        if let Ok(repo) = std::env::var(ENV_SITE_REPO) {
            config.site_repo = PathBuf::from(repo);
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> io::Result<Config> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Where the publish registry lives.
    pub fn registry_path(&self) -> PathBuf {
        self.site_repo.join(C::REGISTRY_FILENAME)
    }

    /// All folder names the scanner must skip.
    pub fn all_excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded_dirs
            .iter()
            .map(String::as_str)
            .chain(C::ALWAYS_EXCLUDED_DIRS)
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vault-dispatch").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_has_two_publishable_dirs() {
        let config = Config::default();
        assert_eq!(config.publishable_dirs.len(), 2);
        assert_eq!(config.publishable_dirs[0], "blog");
        assert_eq!(config.publishable_dirs[1], "drafts");
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.base_url = "https://notes.example.org".into();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.base_url, "https://notes.example.org");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"base_url": "https://x.org"}"#).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.base_url, "https://x.org");
        assert_eq!(loaded.publishable_dirs[0], "blog");
    }

    #[test]
    fn test_always_excluded_present() {
        let config = Config::default();
        let excluded: Vec<&str> = config.all_excluded().collect();
        assert!(excluded.contains(&"_stale"));
        assert!(excluded.contains(&"_archive"));
        assert!(excluded.contains(&"private"));
    }
}
