//! Cached access to the user's SSH config

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::parser::{parse_config, HostEntry};
use crate::cache::{Clock, SystemClock, TimedCache};
use crate::config;

/// Host aliases from an SSH config file, reparsed at most once per cache window
pub struct HostConfigCatalog {
    config_path: PathBuf,
    cache: TimedCache<HostEntry>,
}

impl HostConfigCatalog {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self::with_clock(config_path, Arc::new(SystemClock))
    }

    pub fn with_clock(config_path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config_path: config_path.into(),
            cache: TimedCache::new(clock),
        }
    }

    /// Catalog over ~/.ssh/config
    pub fn from_default_location() -> Result<Self> {
        let config_path =
            config::ssh_config_path().context("Failed to determine SSH config path")?;
        Ok(Self::new(config_path))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Host entries in file order
    ///
    /// Never fails: a missing or unreadable file yields an empty list.
    pub fn parse(&self) -> Arc<[HostEntry]> {
        self.cache.get_or_refresh(|| match read_config(&self.config_path) {
            Ok(Some(content)) => {
                let entries = parse_config(&content);
                tracing::info!(
                    "Loaded {} hosts from {}",
                    entries.len(),
                    self.config_path.display()
                );
                entries
            }
            Ok(None) => {
                tracing::debug!("SSH config not found at {}", self.config_path.display());
                Vec::new()
            }
            Err(err) => {
                tracing::warn!("{:#}", err);
                Vec::new()
            }
        })
    }

    /// Force the next [`parse`](Self::parse) to reread the file
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }
}

/// Read the config file, `None` if it does not exist
///
/// Invalid UTF-8 is replaced rather than rejected.
fn read_config(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read SSH config: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_clock::ManualClock;
    use crate::cache::CACHE_TTL;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = HostConfigCatalog::new(dir.path().join("config"));
        assert!(catalog.parse().is_empty());
    }

    #[test]
    fn test_parse_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        fs::write(
            &path,
            "Host build\n  HostName 10.0.0.5\n  User ci\nHost home\n  HostName 192.168.1.2\n",
        )
        .unwrap();

        let catalog = HostConfigCatalog::new(&path);
        let hosts = catalog.parse();
        let labels: Vec<String> = hosts.iter().map(|h| h.display_label()).collect();
        assert_eq!(labels, vec!["ci@10.0.0.5", "192.168.1.2"]);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, b"Host caf\xe9\n  HostName 10.0.0.1\n").unwrap();

        let hosts = HostConfigCatalog::new(&path).parse();
        assert_eq!(hosts.len(), 1);
        assert!(hosts[0].alias.starts_with("caf"));
        assert_eq!(hosts[0].host_name.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_unreadable_config_is_empty() {
        // A directory in place of the file fails to read
        let dir = TempDir::new().unwrap();
        let catalog = HostConfigCatalog::new(dir.path());
        assert!(catalog.parse().is_empty());
    }

    #[test]
    fn test_cache_ttl() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "Host a\n").unwrap();

        let clock = Arc::new(ManualClock::new());
        let catalog = HostConfigCatalog::with_clock(&path, clock.clone());
        assert_eq!(catalog.parse().len(), 1);

        fs::write(&path, "Host a\nHost b\n").unwrap();
        clock.advance(CACHE_TTL - Duration::from_secs(1));
        assert_eq!(catalog.parse().len(), 1);

        clock.advance(Duration::from_secs(1));
        assert_eq!(catalog.parse().len(), 2);

        fs::write(&path, "Host a\nHost b\nHost c\n").unwrap();
        catalog.invalidate_cache();
        assert_eq!(catalog.parse().len(), 3);
    }
}
