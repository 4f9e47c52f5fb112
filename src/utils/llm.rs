//! LLM endpoints.
//!
//! [ChatCompletion] is the only thing the optimizer needs from a model: one message in, one reply out.

use async_trait::async_trait;

use crate::config::Settings;
use crate::optimizer::errors::OptimizeError;

pub mod groq;

/// Model names offered by the form front end.
pub const MODEL_PRESETS: [&str; 4] = [
    "llama-3.3-70b-versatile",
    "llama3-groq-8b-8192-tool-use-preview",
    "llama3-70b-8192",
    "llama3-8b-8192",
];

/// Sampling parameters of a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u16,
}

impl ModelParams {
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u16) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    /// The defaults configured through `GROMPT_DEFAULT_*`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.default_model.as_str(), settings.default_temperature, settings.default_max_tokens)
    }
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send `message` as the sole user message and return the reply text of the first choice, untrimmed.
    async fn complete(&self, message: String, params: &ModelParams) -> Result<String, OptimizeError>;
}
