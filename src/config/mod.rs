use serde::Deserialize;
use std::{
    env, fs,
    path::PathBuf,
};

use crate::errors::ConfigError;

const DEFAULT_DIR_NAME: &str = ".paperwork";
const HOME_ENV: &str = "PAPERWORK_HOME";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_TEXT_LIMIT: usize = 5000;

/// Settings for the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub max_tokens: u32,
    pub api_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub request_timeout_secs: u64,
    /// Characters of extracted text sent for classification.
    pub text_limit: usize,
    pub organization: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            max_tokens: 300,
            api_url: DEFAULT_API_URL.into(),
            api_key_env: DEFAULT_API_KEY_ENV.into(),
            request_timeout_secs: 120,
            text_limit: DEFAULT_TEXT_LIMIT,
            organization: None,
        }
    }
}

/// Returns the application data directory, defaulting to `~/.paperwork`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Reads [`Config`] from a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `config.json` in the application data directory.
    pub fn new() -> Self {
        Self::at(app_data_dir().join(CONFIG_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
