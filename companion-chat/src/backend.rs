//! Builds the completion client from configuration.

use companion_core::config::{LlmConfig, ProviderKind};
use companion_llm::{CompletionSettings, LlmClient, LlmProvider};
use tracing::info;

/// Build the client for `config`.
///
/// OpenAI without a key, `provider = "none"` and `offline` all give a client
/// that is never available, so every reply is canned.
#[must_use]
pub fn client_from_config(config: &LlmConfig, api_key: Option<&str>, offline: bool) -> LlmClient {
    let settings = CompletionSettings {
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        timeout_ms: config.timeout_ms,
    };
    let base_url = config.resolved_base_url();

    let provider = match (offline, config.provider) {
        (true, _) | (_, ProviderKind::None) => LlmProvider::None,
        (false, ProviderKind::OpenAi) => match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => LlmProvider::OpenAiCompatible {
                base_url,
                api_key: key.to_string(),
            },
            None => LlmProvider::None,
        },
        (false, ProviderKind::Ollama) => LlmProvider::Ollama { base_url },
    };

    info!(provider = provider.name(), model = %settings.model, "completion backend selected");
    LlmClient::new(provider, settings, config.max_retries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_llm::ChatBackend;

    #[test]
    fn missing_key_means_canned_only() {
        let config = LlmConfig::default();
        assert!(!client_from_config(&config, None, false).is_available());
        assert!(!client_from_config(&config, Some("  "), false).is_available());
        assert!(client_from_config(&config, Some("sk-x"), false).is_available());
    }

    #[test]
    fn offline_overrides_everything() {
        let config = LlmConfig {
            provider: ProviderKind::Ollama,
            ..LlmConfig::default()
        };
        assert!(client_from_config(&config, None, false).is_available());
        assert!(!client_from_config(&config, Some("sk-x"), true).is_available());
    }

    #[test]
    fn ollama_uses_local_default_url() {
        let config = LlmConfig {
            provider: ProviderKind::Ollama,
            ..LlmConfig::default()
        };
        let client = client_from_config(&config, None, false);
        assert!(matches!(
            client.provider(),
            LlmProvider::Ollama { base_url } if base_url == "http://localhost:11434"
        ));
    }
}
