use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aggregator::Limit;

/// Main configuration structure
///
/// Loaded from the config file; the CLI overrides individual fields from
/// flags and environment variables. Priority: CLI > Env > File > Defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is no file
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// XDG config dir on Unix-like systems, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?;
        Ok(dir.join("folio").join("config.toml"))
    }

    pub fn validate(&self) -> crate::Result<()> {
        let gh = &self.github;

        if gh.accounts.is_empty() {
            return Err(crate::Error::ConfigError(
                "github.accounts must list at least one account".into(),
            ));
        }
        if gh.accounts.iter().any(|a| a.trim().is_empty()) {
            return Err(crate::Error::ConfigError(
                "github.accounts contains a blank name".into(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&gh.page_size) {
            return Err(crate::Error::ConfigError(format!(
                "github.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if gh.timeout_secs == 0 {
            return Err(crate::Error::ConfigError(
                "github.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// GitHub caps `per_page` at 100
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubConfig {
    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,

    /// Accounts whose public repositories are aggregated
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,

    /// Repositories requested per account
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Projects kept after ranking: a number or "unbounded"
    #[serde(default = "default_top_n")]
    pub top_n: Limit,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_github_url() -> String {
    folio_api::github::GITHUB_API_BASE.to_string()
}

fn default_accounts() -> Vec<String> {
    crate::seed::profile().accounts
}

fn default_page_size() -> u32 {
    10
}

fn default_top_n() -> Limit {
    Limit::Top(9)
}

fn default_timeout() -> u64 {
    folio_api::github::DEFAULT_TIMEOUT_SECS
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_url(),
            accounts: default_accounts(),
            page_size: default_page_size(),
            top_n: default_top_n(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    #[serde(default = "default_gemini_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Gemini API key; GEMINI_API_KEY takes precedence when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_gemini_url() -> String {
    folio_api::gemini::GEMINI_API_BASE.to_string()
}

fn default_model() -> String {
    folio_api::gemini::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: default_gemini_url(),
            model: default_model(),
            temperature: default_temperature(),
            api_key: None,
        }
    }
}

impl ChatConfig {
    /// The configured key if it looks usable (more than 10 chars once trimmed)
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| key.len() > 10)
    }
}
