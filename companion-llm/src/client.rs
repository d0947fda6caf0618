//! LLM Client — unified interface for OpenAI-compatible and Ollama backends.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{LlmError, truncate};
use crate::types::{ChatMessage, CompletionSettings, LlmResponse};

/// Something that can turn a conversation into the companion's next line.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ask for the next assistant message.
    ///
    /// # Errors
    /// Any failure (transport, status, body) is returned; the caller falls back
    /// to canned replies.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<LlmResponse, LlmError>;

    /// Whether calling [`ChatBackend::complete`] is worth trying at all.
    fn is_available(&self) -> bool;
}

/// Provider backend for chat completion.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// OpenAI-compatible API.
    OpenAiCompatible {
        /// Service root, without the `/v1/...` path.
        base_url: String,
        /// Bearer key.
        api_key: String,
    },
    /// Ollama running locally.
    Ollama {
        /// Service root, without the `/api/...` path.
        base_url: String,
    },
    /// No backend — every call fails, triggering canned replies.
    None,
}

impl LlmProvider {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAiCompatible { .. } => "openai",
            LlmProvider::Ollama { .. } => "ollama",
            LlmProvider::None => "none",
        }
    }
}

/// The main LLM client that routes requests to the configured backend.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    settings: CompletionSettings,
    max_retries: u32,
}

impl LlmClient {
    /// Create a new client.
    #[must_use]
    pub fn new(provider: LlmProvider, settings: CompletionSettings, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            settings,
            max_retries,
        }
    }

    /// Create a client with no backend (all calls fail → canned replies).
    #[must_use]
    pub fn none() -> Self {
        Self::new(LlmProvider::None, CompletionSettings::default(), 0)
    }

    /// The configured provider.
    #[must_use]
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Model parameters.
    #[must_use]
    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Request the next assistant message for `messages`.
    ///
    /// # Errors
    /// Returns `Err` if no provider is configured, or if every attempt fails.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<LlmResponse, LlmError> {
        match &self.provider {
            LlmProvider::None => Err(LlmError::Unavailable("No LLM provider configured".into())),
            LlmProvider::OpenAiCompatible { base_url, api_key } => {
                if api_key.trim().is_empty() {
                    return Err(LlmError::ConfigError("OpenAI API key is empty".into()));
                }
                let url = format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));
                let body = json!({
                    "model": self.settings.model,
                    "messages": messages,
                    "max_tokens": self.settings.max_tokens,
                    "temperature": self.settings.temperature,
                });
                self.post_with_retries(&url, Some(api_key), &body, extract_openai)
                    .await
            }
            LlmProvider::Ollama { base_url } => {
                let url = format!("{}/api/chat", base_url.trim_end_matches('/'));
                let body = json!({
                    "model": self.settings.model,
                    "messages": messages,
                    "stream": false,
                    "options": {
                        "temperature": self.settings.temperature,
                        "num_predict": self.settings.max_tokens,
                    }
                });
                self.post_with_retries(&url, None, &body, extract_ollama)
                    .await
            }
        }
    }

    async fn post_with_retries(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
        extract: fn(&Value) -> Option<(&str, u64)>,
    ) -> Result<LlmResponse, LlmError> {
        let provider = self.provider.name();
        let max_attempts = self.max_retries + 1;
        let mut attempts = 0;
        let mut last_error = LlmError::Unavailable("no attempt made".into());

        while attempts < max_attempts {
            attempts += 1;
            if attempts > 1 {
                debug!(provider, "Retrying LLM call (attempt {}/{})", attempts, max_attempts);
            }

            let start = Instant::now();
            let mut request = self
                .http
                .post(url)
                .json(body)
                .timeout(Duration::from_millis(self.settings.timeout_ms));
            if let Some(key) = bearer {
                request = request.bearer_auth(key);
            }
            let result = request.send().await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            last_error = match result {
                Ok(resp) if resp.status().is_success() => match resp.json::<Value>().await {
                    Ok(json) => {
                        let Some((text, tokens)) =
                            extract(&json).filter(|(t, _)| !t.trim().is_empty())
                        else {
                            return Err(LlmError::MalformedResponse(truncate(
                                &json.to_string(),
                                200,
                            )));
                        };
                        debug!(provider, latency_ms, tokens, "LLM reply received");
                        return Ok(LlmResponse {
                            text: text.trim().to_string(),
                            tokens_generated: u32::try_from(tokens).unwrap_or(u32::MAX),
                            latency_ms,
                            model: self.settings.model.clone(),
                        });
                    }
                    Err(e) => {
                        warn!(provider, "LLM response body was not JSON: {e}");
                        LlmError::from_transport(&e, self.settings.timeout_ms)
                    }
                },
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    warn!(provider, %status, "LLM service returned an error");
                    LlmError::from_status(status.as_u16(), &body)
                }
                Err(e) => {
                    warn!(provider, "LLM request failed: {e}");
                    LlmError::from_transport(&e, self.settings.timeout_ms)
                }
            };

            if !last_error.is_retryable() {
                break;
            }
        }

        if attempts == 1 {
            return Err(last_error);
        }
        Err(LlmError::RetriesExhausted {
            attempts,
            last_error: last_error.to_string(),
        })
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<LlmResponse, LlmError> {
        self.chat(messages).await
    }

    fn is_available(&self) -> bool {
        !matches!(self.provider, LlmProvider::None)
    }
}

fn extract_openai(json: &Value) -> Option<(&str, u64)> {
    let text = json["choices"][0]["message"]["content"].as_str()?;
    let tokens = json["usage"]["completion_tokens"].as_u64().unwrap_or(0);
    Some((text, tokens))
}

fn extract_ollama(json: &Value) -> Option<(&str, u64)> {
    let text = json["message"]["content"].as_str()?;
    let tokens = json["eval_count"].as_u64().unwrap_or(0);
    Some((text, tokens))
}
