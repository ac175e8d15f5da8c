//! Shell configuration.

use std::path::{Path, PathBuf};

use portal_types::Result;
use serde::Deserialize;

/// Configuration for a portal shell, read from `portal.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Shown in the shell banner.
    pub site_title: String,
    /// Directory holding the JSON resources.
    pub data_dir: PathBuf,
    /// Directory for persistent client storage (the session file).
    pub storage_dir: PathBuf,
    /// Clock widget period in milliseconds.
    pub clock_period_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            site_title: "Gohartaj School Portal".to_string(),
            data_dir: PathBuf::from("data"),
            storage_dir: PathBuf::from(".portal"),
            clock_period_ms: 1000,
        }
    }
}

impl PortalConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Parse the config file if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = PortalConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.clock_period_ms, 1000);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.toml");
        std::fs::write(&path, "site_title = \"Test Portal\"\n").unwrap();

        let config = PortalConfig::load(&path).unwrap();
        assert_eq!(config.site_title, "Test Portal");
        assert_eq!(config.clock_period_ms, 1000);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = PortalConfig::load_or_default(Path::new("/nonexistent/portal.toml")).unwrap();
        assert_eq!(config.site_title, "Gohartaj School Portal");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.toml");
        std::fs::write(&path, "site_title = [[[").unwrap();
        assert!(PortalConfig::load(&path).is_err());
    }
}
