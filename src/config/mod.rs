use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub submit: SubmitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the summarizer service.
    pub base_url: String,
    /// Request deadline in seconds. Unset means no deadline: the request
    /// blocks until the transport itself gives up.
    pub timeout_seconds: Option<u64>,
    /// Send the interstitial-bypass header expected by ngrok-style tunnels.
    pub skip_browser_warning: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Email address sent with every upload. Blank falls back to the
    /// service-side placeholder at submit time.
    pub email: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: None,
            skip_browser_warning: false,
        }
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, "http://127.0.0.1:8000");
        assert!(config.service.timeout_seconds.is_none());
        assert!(!config.service.skip_browser_warning);
        assert!(config.submit.email.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.service.base_url = "https://summarizer.example.com".to_string();
        config.service.timeout_seconds = Some(300);
        config.submit.email = "team@example.com".to_string();

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();

        assert_eq!(parsed.service.base_url, "https://summarizer.example.com");
        assert_eq!(parsed.service.timeout_seconds, Some(300));
        assert_eq!(parsed.submit.email, "team@example.com");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("[service]\nbase_url = \"http://10.0.0.2:9000\"\n").unwrap();
        assert_eq!(parsed.service.base_url, "http://10.0.0.2:9000");
        assert!(parsed.service.timeout_seconds.is_none());
        assert!(parsed.submit.email.is_empty());
    }
}
