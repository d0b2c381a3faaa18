//! Configuration management for the resume critiquer

use crate::error::{CritiqueError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest accepted gap between analyses (one year)
const MAX_MIN_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gate: GateConfig,
    pub provider: ProviderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum number of seconds between two accepted analyses
    pub min_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub default_mode: FeedbackMode,
    pub gemini_model: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API credential
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackMode {
    Demo,
    Gemini,
}

impl std::fmt::Display for FeedbackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackMode::Demo => write!(f, "Demo Mode"),
            FeedbackMode::Gemini => write!(f, "Google Gemini (AI)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gate: GateConfig {
                min_interval_secs: 10,
            },
            provider: ProviderConfig {
                default_mode: FeedbackMode::Demo,
                gemini_model: "gemini-1.5-flash".to_string(),
                api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                timeout_secs: 60,
                api_key_env: "GOOGLE_API_KEY".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first use
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CritiqueError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CritiqueError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-critiquer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.gate.min_interval_secs > MAX_MIN_INTERVAL_SECS {
            return Err(CritiqueError::Configuration(format!(
                "gate.min_interval_secs must be at most {}",
                MAX_MIN_INTERVAL_SECS
            )));
        }
        if self.provider.timeout_secs == 0 {
            return Err(CritiqueError::Configuration(
                "provider.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(CritiqueError::Configuration(
                "provider.api_key_env must name an environment variable".to_string(),
            ));
        }
        Ok(())
    }

    pub fn min_interval(&self) -> chrono::Duration {
        // load_from rejects larger values; fields set in code are clamped
        chrono::Duration::seconds(self.gate.min_interval_secs.min(MAX_MIN_INTERVAL_SECS) as i64)
    }

    /// Reads the provider credential from the environment. Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.provider.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
