//! Settings read from the environment.
//!
//! Binaries load `.env` with `dotenvy` first and then call [Settings::from_env]. Empty variables count as unset.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::utils::llm::ModelParams;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: u16 = 1024;
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";
pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:8501";

pub const MODEL_VAR: &str = "GROMPT_DEFAULT_MODEL";
pub const TEMPERATURE_VAR: &str = "GROMPT_DEFAULT_TEMPERATURE";
pub const MAX_TOKENS_VAR: &str = "GROMPT_DEFAULT_MAX_TOKENS";
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
pub const WEB_ADDR_VAR: &str = "GROMPT_WEB_ADDR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_model: String,
    pub default_temperature: f32,
    pub default_max_tokens: u16,
    pub api_key: Option<String>,
    pub base_url: String,
    pub web_addr: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let default_temperature = parse_or(get(TEMPERATURE_VAR), TEMPERATURE_VAR, DEFAULT_TEMPERATURE)?;
        let default_max_tokens = parse_or(get(MAX_TOKENS_VAR), MAX_TOKENS_VAR, DEFAULT_MAX_TOKENS)?;
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string());
        if let Err(e) = Url::parse(&base_url) {
            return Err(ConfigError::Invalid {
                key: BASE_URL_VAR,
                value: base_url,
                reason: e.to_string(),
            });
        }

        Ok(Self {
            default_model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            default_temperature,
            default_max_tokens,
            api_key: get(API_KEY_VAR),
            base_url,
            web_addr: get(WEB_ADDR_VAR).unwrap_or_else(|| DEFAULT_WEB_ADDR.to_string()),
        })
    }

    #[inline]
    pub fn model_params(&self) -> ModelParams {
        ModelParams::from_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            default_temperature: DEFAULT_TEMPERATURE,
            default_max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            web_addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
    where T: FromStr, T::Err: std::fmt::Display {
    match value {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
