//! Content generation: prompt → backend → extract → validate, or fallback.
//!
//! The caller always gets a validated object. Backend errors, timeouts,
//! unparseable text and shape violations are all folded into one recovery path
//! that logs the failure and serves the deterministic template instead. Only
//! bad input (empty topic, count outside 1..=20) is reported, and it is reported
//! before the backend is contacted.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::config::{BackendConfig, Prompts};
use crate::domain::{
  ContentDomain, ContentOrigin, Difficulty, NewsDashboard, Question, Quiz, TopicExplainer,
};
use crate::error::{GenerationError, InputError};
use crate::extract::{extract_json, Brackets};
use crate::fallback::{fallback_news, fallback_questions, fallback_topic};
use crate::llm::{ChatCompletionsClient, CompletionBackend, CompletionRequest};
use crate::util::fill_template;
use crate::validate::{validate_news, validate_quiz, validate_topic};

pub const DEFAULT_QUESTION_COUNT: i64 = 5;
pub const MAX_QUESTION_COUNT: i64 = 20;

/// Content plus the path that produced it.
#[derive(Clone, Debug)]
pub struct Generated<T> {
  pub content: T,
  pub origin: ContentOrigin,
}

struct Backend {
  client: Arc<dyn CompletionBackend>,
  cfg: BackendConfig,
}

pub struct Generator {
  backend: Option<Backend>,
  prompts: Prompts,
}

impl Generator {
  /// A generator with no backend: every request is served from the fallback templates.
  pub fn offline(prompts: Prompts) -> Self {
    Self { backend: None, prompts }
  }

  pub fn with_backend(prompts: Prompts, client: Arc<dyn CompletionBackend>, cfg: BackendConfig) -> Self {
    Self { backend: Some(Backend { client, cfg }), prompts }
  }

  /// Wire up the HTTP chat-completions client when a config is present.
  pub fn from_config(cfg: Option<BackendConfig>, prompts: Prompts) -> Self {
    let Some(cfg) = cfg else {
      info!(target: "studyforge", "Completion backend disabled (no LLM_API_KEY). Serving fallback content.");
      return Self::offline(prompts);
    };
    match ChatCompletionsClient::new(&cfg) {
      Ok(client) => {
        info!(target: "studyforge", base_url = %cfg.base_url, model = %cfg.model, timeout = ?cfg.timeout, "Completion backend enabled.");
        Self::with_backend(prompts, Arc::new(client), cfg)
      }
      Err(e) => {
        error!(target: "studyforge", error = %e, "Failed to build HTTP client; serving fallback content.");
        Self::offline(prompts)
      }
    }
  }

  pub fn is_online(&self) -> bool {
    self.backend.is_some()
  }

  #[instrument(level = "info", target = "generation", skip(self, topic), fields(topic_len = topic.len()))]
  pub async fn generate_quiz(
    &self,
    topic: &str,
    difficulty: Option<Difficulty>,
    count: Option<i64>,
  ) -> Result<Generated<Quiz>, InputError> {
    let topic = require_topic(topic)?;
    let count = require_count(count.unwrap_or(DEFAULT_QUESTION_COUNT))?;
    let difficulty = difficulty.unwrap_or_default();

    let count_s = count.to_string();
    let vars = [("topic", topic), ("difficulty", difficulty.as_str()), ("count", count_s.as_str())];
    let system = fill_template(&self.prompts.quiz_system, &vars);
    let user = fill_template(&self.prompts.quiz_user_template, &vars);

    let result = self
      .attempt(ContentDomain::Quiz, &system, &user, Brackets::Array, |text| validate_quiz(text, count))
      .await;
    let questions: Generated<Vec<Question>> = settle(ContentDomain::Quiz, result, || {
      fallback_questions(topic, difficulty, count)
    });

    let quiz = Quiz {
      id: Uuid::new_v4().to_string(),
      topic: topic.to_string(),
      difficulty,
      questions: questions.content,
      created_at: Utc::now(),
    };
    info!(target: "generation", quiz_id = %quiz.id, questions = quiz.questions.len(), origin = questions.origin.as_str(), "Quiz ready");
    Ok(Generated { content: quiz, origin: questions.origin })
  }

  #[instrument(level = "info", target = "generation", skip(self, topic), fields(topic_len = topic.len()))]
  pub async fn generate_news(&self, topic: &str) -> Result<Generated<NewsDashboard>, InputError> {
    let topic = require_topic(topic)?;
    let vars = [("topic", topic)];
    let system = fill_template(&self.prompts.news_system, &vars);
    let user = fill_template(&self.prompts.news_user_template, &vars);

    let result = self
      .attempt(ContentDomain::News, &system, &user, Brackets::Object, validate_news)
      .await;
    Ok(settle(ContentDomain::News, result, || fallback_news(topic)))
  }

  #[instrument(level = "info", target = "generation", skip(self, topic), fields(topic_len = topic.len()))]
  pub async fn generate_topic(&self, topic: &str) -> Result<Generated<TopicExplainer>, InputError> {
    let topic = require_topic(topic)?;
    let vars = [("topic", topic)];
    let system = fill_template(&self.prompts.topic_system, &vars);
    let user = fill_template(&self.prompts.topic_user_template, &vars);

    let result = self
      .attempt(ContentDomain::Topic, &system, &user, Brackets::Object, validate_topic)
      .await;
    Ok(settle(ContentDomain::Topic, result, || fallback_topic(topic)))
  }

  /// One backend round trip. Never retried.
  async fn attempt<T>(
    &self,
    domain: ContentDomain,
    system: &str,
    user: &str,
    brackets: Brackets,
    validate: impl FnOnce(&str) -> Result<T, GenerationError>,
  ) -> Result<T, GenerationError> {
    let backend = self
      .backend
      .as_ref()
      .ok_or_else(|| GenerationError::BackendUnavailable("backend not configured".into()))?;

    let req = CompletionRequest {
      model: backend.cfg.model.clone(),
      system: system.to_string(),
      user: user.to_string(),
      temperature: backend.cfg.temperature,
      max_tokens: backend.cfg.max_tokens,
    };

    let start = std::time::Instant::now();
    let raw = tokio::time::timeout(backend.cfg.timeout, backend.client.complete(&req))
      .await
      .map_err(|_| {
        GenerationError::BackendUnavailable(format!("no response within {:?}", backend.cfg.timeout))
      })??;
    info!(target: "generation", %domain, elapsed = ?start.elapsed(), raw_len = raw.len(), "Backend responded");

    validate(extract_json(&raw, brackets))
  }
}

fn settle<T>(
  domain: ContentDomain,
  result: Result<T, GenerationError>,
  fallback: impl FnOnce() -> T,
) -> Generated<T> {
  match result {
    Ok(content) => Generated { content, origin: ContentOrigin::Generated },
    Err(e) => {
      error!(target: "generation", %domain, kind = e.kind(), error = %e, "Generation failed; serving fallback");
      Generated { content: fallback(), origin: ContentOrigin::Fallback }
    }
  }
}

fn require_topic(topic: &str) -> Result<&str, InputError> {
  let topic = topic.trim();
  if topic.is_empty() {
    Err(InputError::EmptyTopic)
  } else {
    Ok(topic)
  }
}

fn require_count(count: i64) -> Result<usize, InputError> {
  if count <= 0 {
    return Err(InputError::NonPositiveCount(count));
  }
  if count > MAX_QUESTION_COUNT {
    return Err(InputError::CountTooLarge { got: count, max: MAX_QUESTION_COUNT });
  }
  usize::try_from(count).map_err(|_| InputError::CountTooLarge { got: count, max: MAX_QUESTION_COUNT })
}
