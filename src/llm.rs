//! Outbound chat-completions client.
//!
//! One call shape: system + user message in, raw completion text out. The text is
//! untrusted; extraction and validation happen in the generator. Calls are
//! instrumented and log model names, latencies and response sizes (not contents).
//!
//! NOTE: We never log the API key.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::BackendConfig;
use crate::error::GenerationError;
use crate::util::trunc_for_log;

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
  pub model: String,
  pub system: String,
  pub user: String,
  pub temperature: f32,
  pub max_tokens: u32,
}

/// "Submit a chat-style prompt, receive a text completion."
#[async_trait]
pub trait CompletionBackend: Send + Sync {
  async fn complete(&self, req: &CompletionRequest) -> Result<String, GenerationError>;
}

/// OpenAI-compatible `/chat/completions` client (Cerebras by default).
#[derive(Clone)]
pub struct ChatCompletionsClient {
  client: reqwest::Client,
  api_key: String,
  base_url: String,
}

impl ChatCompletionsClient {
  pub fn new(cfg: &BackendConfig) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;
    Ok(Self { client, api_key: cfg.api_key.clone(), base_url: cfg.base_url.clone() })
  }
}

#[async_trait]
impl CompletionBackend for ChatCompletionsClient {
  #[instrument(level = "info", skip(self, req), fields(model = %req.model, prompt_len = req.user.len()))]
  async fn complete(&self, req: &CompletionRequest) -> Result<String, GenerationError> {
    let url = format!("{}/chat/completions", self.base_url);
    let body = ChatCompletionRequest {
      model: req.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: req.system.clone() },
        ChatMessageReq { role: "user".into(), content: req.user.clone() },
      ],
      temperature: req.temperature,
      max_tokens: Some(req.max_tokens),
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "studyforge-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&body).send().await
      .map_err(|e| GenerationError::BackendUnavailable(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_provider_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      return Err(GenerationError::BackendUnavailable(format!("HTTP {}: {}", status, msg)));
    }

    let body: ChatCompletionResponse = res
      .json()
      .await
      .map_err(|e| GenerationError::BackendUnavailable(format!("unreadable response body: {e}")))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "Completion usage");
    }

    let text = body.choices.into_iter().next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| GenerationError::MalformedContent("completion has no message content".into()))?;

    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Completion received");
    debug!(preview = %trunc_for_log(&text, 160), "Completion preview");
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI-style error body.
fn extract_provider_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
