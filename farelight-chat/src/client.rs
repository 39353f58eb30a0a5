use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::ChatError;

/// Connection settings for the OpenAI-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "qwen2.5:latest".to_string(),
            api_key: None,
            request_timeout_ms: 60_000,
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// HTTP client for a chat-completions endpoint with tool support.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    cfg: LlmClientConfig,
}

impl LlmClient {
    pub fn new(cfg: LlmClientConfig) -> Result<Self, ChatError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| ChatError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &LlmClientConfig {
        &self.cfg
    }

    /// POST the conversation plus tool definitions; return the raw response.
    ///
    /// Errors are typed: transport and non-2xx statuses surface as
    /// `ChatError`, never panics. Tool-call interpretation is the
    /// orchestrator's concern.
    pub async fn chat(&self, messages: &[Value], tools: &[Value]) -> Result<Value, ChatError> {
        let url = format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'));
        debug!(target = "llm_client", %url, messages = messages.len(), "POST chat completion");

        let mut body = json!({
            "model": self.cfg.model,
            "messages": messages,
            "max_tokens": self.cfg.max_output_tokens,
            "temperature": self.cfg.temperature,
        });
        if !tools.is_empty() {
            body["tools"] = Value::Array(tools.to_vec());
            body["tool_choice"] = json!("auto");
        }

        let mut req = self.http.post(&url).header("content-type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("Chat completion request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            error!(target = "llm_client", %status, body = %text, "Chat completion error");
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ChatError::Transport(format!("Failed to parse chat completion JSON: {e}")))
    }
}
