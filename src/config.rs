//! Runtime configuration from the environment (and `.env` via dotenvy).

use crate::consts::{Language, UnknownCode};
use crate::logic::RegionFilter;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_LANG: &str = "FLASHBRIEFS_LANG";
pub const ENV_REGION: &str = "FLASHBRIEFS_REGION";
pub const ENV_OUTPUT: &str = "FLASHBRIEFS_OUTPUT";
pub const ENV_LOG: &str = "FLASHBRIEFS_LOG";
pub const ENV_AUTOLOAD: &str = "FLASHBRIEFS_AUTOLOAD";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    InvalidCode { var: &'static str, source: UnknownCode },
    #[error("{var}: '{value}' is not one of {expected}")]
    InvalidValue { var: &'static str, value: String, expected: &'static str },
}

/// How the view is printed after each action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub language: Language,
    pub region: RegionFilter,
    pub output: OutputFormat,
    pub log_filter: String,
    pub autoload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::Fr,
            region: RegionFilter::Both,
            output: OutputFormat::Text,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            autoload: false,
        }
    }
}

impl Config {
    /// Read from the process environment. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(value) = get(ENV_LANG) {
            config.language = value
                .parse()
                .map_err(|source| ConfigError::InvalidCode { var: ENV_LANG, source })?;
        }
        if let Some(value) = get(ENV_REGION) {
            config.region = value
                .parse()
                .map_err(|source| ConfigError::InvalidCode { var: ENV_REGION, source })?;
        }
        if let Some(value) = get(ENV_OUTPUT) {
            config.output = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_OUTPUT,
                value: value.clone(),
                expected: "text, json",
            })?;
        }
        if let Some(value) = get(ENV_LOG) {
            config.log_filter = value.trim().to_string();
        }
        if let Some(value) = get(ENV_AUTOLOAD) {
            config.autoload = parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                var: ENV_AUTOLOAD,
                value: value.clone(),
                expected: "1, true, yes, 0, false, no",
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
