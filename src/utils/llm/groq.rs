use async_openai::config::OpenAIConfig;
use async_openai::types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::config::Settings;
use crate::optimizer::errors::OptimizeError;
use crate::utils::llm::{ChatCompletion, ModelParams};

/// Groq serves an OpenAI-compatible API under this path of its base URL.
pub const OPENAI_COMPAT_PATH: &str = "openai/v1";

/// Chat-completion client for Groq.
#[derive(Clone)]
#[readonly::make]
pub struct GroqClient {
    /// The OpenAI-compatible API base, e.g. `https://api.groq.com/openai/v1`. read-only.
    #[readonly]
    pub api_base: String,
    client: Client<OpenAIConfig>,
}

impl GroqClient {
    /// Create a client for the Groq deployment at `base_url`.
    ///
    /// Fails without touching the network when `api_key` is blank or `base_url` is not a URL.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, OptimizeError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OptimizeError::MissingApiKey);
        }
        let base_url = Url::parse(base_url)?;
        let api_base = format!("{}/{}", base_url.as_str().trim_end_matches('/'), OPENAI_COMPAT_PATH);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.clone());
        Ok(Self {
            api_base,
            client: Client::with_config(config),
        })
    }

    /// Create a client from the settings. An explicit `api_key` wins over `GROQ_API_KEY`.
    pub fn from_settings(settings: &Settings, api_key: Option<&str>) -> Result<Self, OptimizeError> {
        let api_key = api_key
            .or(settings.api_key.as_deref())
            .ok_or(OptimizeError::MissingApiKey)?;
        Self::new(api_key, &settings.base_url)
    }
}

#[async_trait]
impl ChatCompletion for GroqClient {
    async fn complete(&self, message: String, params: &ModelParams) -> Result<String, OptimizeError> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(message)
            .build()?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(params.model.as_str())
            .messages(vec![ChatCompletionRequestMessage::User(user_message)])
            .temperature(params.temperature)
            .max_tokens(params.max_tokens)
            .build()?;
        debug!("POST {}/chat/completions model={}", self.api_base, params.model);
        let response = self.client.chat().create(request).await?;
        if let Some(usage) = &response.usage {
            debug!("usage: prompt={} completion={} total={}", usage.prompt_tokens, usage.completion_tokens, usage.total_tokens);
        }
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(OptimizeError::EmptyReply)
    }
}

#[cfg(test)]
mod test_groq {
    use super::GroqClient;
    use crate::config::Settings;
    use crate::optimizer::errors::OptimizeError;

    #[test]
    fn test_api_base() {
        let client = GroqClient::new("key", "https://api.groq.com").unwrap();
        assert_eq!("https://api.groq.com/openai/v1", client.api_base);

        let client = GroqClient::new("key", "http://127.0.0.1:8080/").unwrap();
        assert_eq!("http://127.0.0.1:8080/openai/v1", client.api_base);
    }

    #[test]
    fn test_blank_key() {
        assert!(matches!(GroqClient::new("  ", "https://api.groq.com"), Err(OptimizeError::MissingApiKey)));
    }

    #[test]
    fn test_bad_base_url() {
        assert!(matches!(GroqClient::new("key", "not a url"), Err(OptimizeError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_from_settings_key_precedence() {
        let settings = Settings::from_lookup(|key| match key {
            "GROQ_API_KEY" => Some("env-key".to_string()),
            _ => None,
        }).unwrap();
        assert!(GroqClient::from_settings(&settings, None).is_ok());
        assert!(GroqClient::from_settings(&settings, Some("form-key")).is_ok());

        let settings = Settings::from_lookup(|_| None).unwrap();
        assert!(matches!(GroqClient::from_settings(&settings, None), Err(OptimizeError::MissingApiKey)));
    }
}
