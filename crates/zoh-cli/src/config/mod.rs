//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zoh_client::Region;

use crate::output::OutputFormat;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV: &str = "ZOH_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// OAuth access token.
    pub access_token: Option<String>,

    /// Zoho data center.
    pub region: Option<Region>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Entries per request for `--all` listings.
    pub page_size: Option<usize>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("space", "semmy", "zoh")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`; a missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "access_token" | "token" => self.access_token = Some(value.to_string()),
            "region" => self.region = Some(value.parse()?),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "page_size" => {
                let size: usize = value.parse()?;
                anyhow::ensure!(size > 0, "page_size must be at least 1");
                self.page_size = Some(size);
            }
            _ => anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 access_token   - OAuth access token\n  \
                 region         - Data center (us/eu/in/au/jp/ca/cn/sa)\n  \
                 output_format  - Default output format (pretty/json/csv/yaml)\n  \
                 page_size      - Entries per request when listing with --all",
                key
            ),
        }
        Ok(())
    }
}

/// Show the first and last few characters of a secret.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("region", "eu").unwrap();
        config.set("output", "json").unwrap();
        config.set("page_size", "200").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.region, Some(Region::Eu));
        assert_eq!(loaded.output_format, Some(OutputFormat::Json));
        assert_eq!(loaded.page_size, Some(200));
        assert_eq!(loaded.access_token, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("region", "mars").is_err());
        assert!(config.set("page_size", "0").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "region = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("1000.abcdef123456"), "1000.a...3456");
        assert_eq!(mask("short"), "****");
    }
}
