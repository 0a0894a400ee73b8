//! LLM provider factory.
//!
//! Builds the configured [`LlmClient`] implementation, resolving endpoint,
//! credentials and HTTP timeout.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use latam_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Everything needed to build a provider client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub provider: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            endpoint: None,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            provider: config.provider.clone(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Create an LLM client for the configured provider.
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - The provider needs an API key and none was given
/// - The HTTP client cannot be built
pub fn create_client(options: &ClientOptions) -> AppResult<Arc<dyn LlmClient>> {
    let provider = ProviderType::parse(&options.provider)
        .ok_or_else(|| AppError::Llm(format!("Unknown provider: {}", options.provider)))?;

    let api_key = options
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());

    if provider.requires_api_key() && api_key.is_none() {
        return Err(AppError::Llm(format!(
            "{} provider requires API key",
            provider.as_str()
        )));
    }

    tracing::debug!(provider = provider.as_str(), "Creating LLM client");

    match provider {
        ProviderType::Ollama => {
            let base_url = options
                .endpoint
                .as_deref()
                .unwrap_or(OllamaClient::DEFAULT_BASE_URL);
            let client = OllamaClient::with_options(base_url, options.timeout)?;
            Ok(Arc::new(client))
        }
        ProviderType::OpenAI => {
            let base_url = options
                .endpoint
                .as_deref()
                .unwrap_or(OpenAiClient::DEFAULT_BASE_URL);
            let client =
                OpenAiClient::with_options(api_key.unwrap_or_default(), base_url, options.timeout)?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client(&ClientOptions::new("ollama")).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let mut options = ClientOptions::new("ollama");
        options.endpoint = Some("http://localhost:8080".to_string());
        assert!(create_client(&options).is_ok());
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client(&ClientOptions::new("openai")) {
            Err(err) => assert!(err.to_string().contains("requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }

        let mut options = ClientOptions::new("openai");
        options.api_key = Some("   ".to_string());
        assert!(create_client(&options).is_err());
    }

    #[test]
    fn test_openai_with_key() {
        let mut options = ClientOptions::new("openai");
        options.api_key = Some("sk-test".to_string());
        let client = create_client(&options).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_unknown_provider() {
        match create_client(&ClientOptions::new("unknown")) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }

    #[test]
    fn test_options_from_config() {
        let mut config = AppConfig::default();
        config.timeout_secs = 12;
        config.api_key = Some("sk-test".to_string());

        let options = ClientOptions::from_config(&config);
        assert_eq!(options.provider, "openai");
        assert_eq!(options.timeout, Duration::from_secs(12));
        assert_eq!(options.api_key.as_deref(), Some("sk-test"));
    }
}
