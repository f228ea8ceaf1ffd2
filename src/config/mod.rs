use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::fetch::DEFAULT_USER_AGENT;
use crate::pipeline::{DEFAULT_LANGUAGE, DEFAULT_PAGE_URL_BASE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scraping settings
    pub scraper: ScraperConfig,

    /// HTTP endpoint settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Watch page address prefix; the video ID is appended to it
    pub page_url_base: String,

    /// Caption language used when none is requested
    pub default_language: String,

    /// Proxy for page fetches
    pub proxy: Option<String>,

    /// User agent sent with every request
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP endpoint listens on
    pub bind_address: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            page_url_base: DEFAULT_PAGE_URL_BASE.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Read and validate a YAML config file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("yt-subtitle-scraper").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.scraper.page_url_base)
            .with_context(|| format!("Invalid page URL base: {}", self.scraper.page_url_base))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("Page URL base must use HTTP or HTTPS protocol");
        }

        if self.scraper.default_language.trim().is_empty() {
            anyhow::bail!("Default language must not be empty");
        }

        if let Some(proxy) = &self.scraper.proxy {
            crate::utils::validate_proxy_url(proxy)?;
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Page URL base: {}", self.scraper.page_url_base);
        println!("  Default language: {}", self.scraper.default_language);
        println!("  Proxy: {}", self.scraper.proxy.as_deref().unwrap_or("none"));
        println!("  User agent: {}", self.scraper.user_agent);
        println!("  Bind address: {}", self.server.bind_address);
    }
}
