//! LLM client — the single point of entry for all completion calls.
//!
//! ARCHITECTURAL RULE: no other module may call the provider API directly.
//! All LLM interactions go through `FallbackInvoker`.
//!
//! The invoker tries an ordered chain of model identifiers; the first model
//! that returns a completion wins, per-model failures are swallowed, and
//! total exhaustion degrades to a fixed placeholder reply. It never errors:
//! the orchestrator must always have something to persist and return.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Ordered model fallback chain. Intentionally hardcoded to prevent drift;
/// attempts are strictly sequential, never raced.
pub const MODEL_CHAIN: &[&str] = &["claude-sonnet-4-5", "claude-opus-4-1"];

/// Token budget for one advisory reply.
const MAX_TOKENS: u32 = 800;

/// Returned when every model in the chain has failed.
pub const FALLBACK_REPLY: &str = "I'm having trouble thinking right now.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One role-tagged turn of the completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// A fully assembled completion request: one system instruction plus the
/// ordered turn list. The model is chosen by the invoker, not the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub turns: Vec<ChatTurn>,
}

/// A text-completion service for a single model. Implemented over the real
/// Anthropic API in production and by mocks in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, model: &str, request: &CompletionRequest) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic Messages API backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

pub struct AnthropicBackend {
    client: Client,
    api_key: String,
}

impl AnthropicBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(&self, model: &str, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            system: &request.system,
            messages: &request.turns,
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response.json().await?;
        parsed
            .content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.clone())
            .ok_or(LlmError::EmptyContent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback invoker
// ────────────────────────────────────────────────────────────────────────────

/// Ordered fallback over a list of model identifiers.
#[derive(Clone)]
pub struct FallbackInvoker {
    backend: Arc<dyn CompletionBackend>,
    models: Vec<String>,
}

impl FallbackInvoker {
    pub fn new(backend: Arc<dyn CompletionBackend>, models: Vec<String>) -> Self {
        Self { backend, models }
    }

    /// The production invoker: the Anthropic backend with the default chain.
    pub fn anthropic(api_key: String) -> Self {
        Self::new(
            Arc::new(AnthropicBackend::new(api_key)),
            MODEL_CHAIN.iter().map(|m| m.to_string()).collect(),
        )
    }

    /// Tries each model in order and returns the first completion. Failures
    /// are logged and swallowed; if every model fails, returns the fixed
    /// degraded placeholder instead of an error.
    pub async fn invoke(&self, request: &CompletionRequest) -> String {
        for model in &self.models {
            match self.backend.complete(model, request).await {
                Ok(text) => {
                    debug!(model = %model, "completion succeeded");
                    return text;
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "completion failed, trying next model");
                }
            }
        }
        warn!("all models in the fallback chain failed, returning degraded reply");
        FALLBACK_REPLY.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records which models were attempted, in order.
    struct ScriptedBackend {
        /// Models that should succeed; everything else fails.
        succeeds: Vec<String>,
        attempts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(succeeds: &[&str]) -> Self {
            Self {
                succeeds: succeeds.iter().map(|s| s.to_string()).collect(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            model: &str,
            _request: &CompletionRequest,
        ) -> Result<String, LlmError> {
            self.attempts.lock().unwrap().push(model.to_string());
            if self.succeeds.iter().any(|m| m == model) {
                Ok(format!("reply from {model}"))
            } else {
                Err(LlmError::Api {
                    status: 500,
                    message: "overloaded".to_string(),
                })
            }
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "system".to_string(),
            turns: vec![ChatTurn {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
        }
    }

    fn invoker(backend: Arc<ScriptedBackend>, models: &[&str]) -> FallbackInvoker {
        FallbackInvoker::new(backend, models.iter().map(|m| m.to_string()).collect())
    }

    #[tokio::test]
    async fn test_first_model_success_short_circuits() {
        let backend = Arc::new(ScriptedBackend::new(&["m1", "m2"]));
        let reply = invoker(backend.clone(), &["m1", "m2"]).invoke(&request()).await;

        assert_eq!(reply, "reply from m1");
        assert_eq!(backend.attempts(), vec!["m1"]);
    }

    #[tokio::test]
    async fn test_failure_falls_through_to_next_model() {
        let backend = Arc::new(ScriptedBackend::new(&["m2"]));
        let reply = invoker(backend.clone(), &["m1", "m2"]).invoke(&request()).await;

        assert_eq!(reply, "reply from m2");
        assert_eq!(backend.attempts(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_total_exhaustion_returns_placeholder_not_error() {
        let backend = Arc::new(ScriptedBackend::new(&[]));
        let reply = invoker(backend.clone(), &["m1", "m2"]).invoke(&request()).await;

        assert_eq!(reply, FALLBACK_REPLY);
        assert_eq!(backend.attempts(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_empty_chain_returns_placeholder() {
        let backend = Arc::new(ScriptedBackend::new(&["m1"]));
        let reply = invoker(backend, &[]).invoke(&request()).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }
}
