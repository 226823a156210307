use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use staffdesk_core::config::LlmConfig;
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Transport(String),
    #[error("model endpoint returned {0}")]
    Status(u16),
    #[error("failed to decode model response: {0}")]
    Decode(String),
}

/// A single-shot text completion. Implementations may block for as long as
/// inference takes; callers add their own deadline if they need one.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Talks to an Ollama server through its non-streaming generate endpoint.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|error| LlmError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            endpoint: generate_endpoint(&config.base_url),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn generate_endpoint(base_url: &str) -> String {
    format!("{}/api/generate", base_url.trim().trim_end_matches('/'))
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest { model: &self.model, prompt, stream: false };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        debug!(
            event_name = "agent.llm.request",
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let response =
            request.send().await.map_err(|error| LlmError::Transport(error.to_string()))?;

        if !response.status().is_success() {
            return Err(LlmError::Status(response.status().as_u16()));
        }

        let payload: GenerateResponse =
            response.json().await.map_err(|error| LlmError::Decode(error.to_string()))?;
        Ok(payload.response)
    }
}

/// Returns the same canned reply for every prompt and remembers what it was
/// asked. Test double for pipeline and command tests.
pub struct StaticLlmClient {
    reply: Result<String, LlmError>,
    prompts: Mutex<Vec<String>>,
}

impl StaticLlmClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self { reply: Ok(text.into()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing(error: LlmError) -> Self {
        Self { reply: Err(error), prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|prompts| prompts.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for StaticLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone()
    }
}
