use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_DEBUG_PATH, DEFAULT_REPORT_PATH, DEFAULT_TARGET_URL, DEFAULT_TIMEOUT_SECONDS,
    FIRECRAWL_API_BASE, FIRECRAWL_API_KEY_ENV,
};
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub target_url: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            api_base: FIRECRAWL_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report_path: PathBuf,
    pub debug_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            debug_path: PathBuf::from(DEFAULT_DEBUG_PATH),
        }
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults; a present but
    /// malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Reads the Firecrawl credential from the environment (after `.env`, if any).
pub fn api_key_from_env() -> Result<String> {
    let _ = dotenv::dotenv();
    match std::env::var(FIRECRAWL_API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        Ok(_) => Err(ScraperError::Config(format!("{} is empty", FIRECRAWL_API_KEY_ENV))),
        Err(e) => Err(ScraperError::Config(format!("{}: {}", FIRECRAWL_API_KEY_ENV, e))),
    }
}
