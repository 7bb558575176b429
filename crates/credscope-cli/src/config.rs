//! CLI configuration file support
//!
//! Loads configuration from ~/.config/credscope/config.toml

use credscope_core::{DEFAULT_PAGE_SIZE, pager};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend base URL
    pub server_url: Option<String>,
    /// Default table page size
    pub page_size: Option<u32>,
}

impl CliConfig {
    /// Load configuration from the default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path; any failure falls back
    /// to defaults
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("credscope").join("config.toml"))
    }

    /// Effective server URL after applying the CLI override
    pub fn server_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .or(self.server_url.as_deref())
            .unwrap_or(DEFAULT_SERVER_URL)
            .to_string()
    }

    /// Effective page size; configured sizes outside the allowed set
    /// fall back to the default
    pub fn page_size(&self) -> u32 {
        match self.page_size {
            Some(size) if pager::is_allowed_size(size) => size,
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = CliConfig::load_from_path(Some(PathBuf::from("/nonexistent/config.toml")));
        assert_eq!(config.server_url(None), DEFAULT_SERVER_URL);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_toml_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();
        let config = CliConfig::load_from_path(Some(file.path().to_path_buf()));
        assert_eq!(config.server_url(None), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_cli_flag_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url = \"http://config:9000\"").unwrap();
        writeln!(file, "page_size = 50").unwrap();
        let config = CliConfig::load_from_path(Some(file.path().to_path_buf()));

        assert_eq!(config.server_url(None), "http://config:9000");
        assert_eq!(config.server_url(Some("http://flag:1234")), "http://flag:1234");
        assert_eq!(config.page_size(), 50);
    }

    #[test]
    fn test_disallowed_configured_page_size_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 37").unwrap();
        let config = CliConfig::load_from_path(Some(file.path().to_path_buf()));
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }
}
