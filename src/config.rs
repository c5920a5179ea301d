//! Configuration: completion backend settings (env) and prompt overrides (TOML).
//!
//! The backend settings are read once at startup into an explicit `BackendConfig`
//! that is handed to the generator; nothing downstream reads the environment.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";
pub const DEFAULT_MODEL: &str = "llama3.1-8b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Settings for the chat-completions backend.
#[derive(Clone, Debug)]
pub struct BackendConfig {
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  pub max_tokens: u32,
  pub timeout: Duration,
}

impl BackendConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: DEFAULT_BASE_URL.into(),
      model: DEFAULT_MODEL.into(),
      temperature: 0.7,
      max_tokens: 2000,
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
  }

  /// Build from LLM_API_KEY (or CEREBRAS_API_KEY); None when no key is set.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("LLM_API_KEY")
      .or_else(|_| std::env::var("CEREBRAS_API_KEY"))
      .ok()
      .filter(|k| !k.trim().is_empty())?;

    let mut cfg = Self::new(api_key);
    if let Ok(url) = std::env::var("LLM_BASE_URL") {
      cfg.base_url = url.trim_end_matches('/').to_string();
    }
    if let Ok(model) = std::env::var("LLM_MODEL") {
      cfg.model = model;
    }
    if let Some(secs) = std::env::var("LLM_TIMEOUT_SECS").ok().and_then(|s| s.parse::<u64>().ok()) {
      cfg.timeout = Duration::from_secs(secs);
    }
    Some(cfg)
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts sent to the backend, one system + user template per domain.
/// Placeholders: `{topic}`, `{difficulty}`, `{count}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub quiz_system: String,
  pub quiz_user_template: String,
  pub news_system: String,
  pub news_user_template: String,
  pub topic_system: String,
  pub topic_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      quiz_system: "You are a helpful quiz generator assistant. You always respond with valid JSON and follow the exact format requested. Respond with ONLY the JSON array. Do not include any other text, explanations, or markdown formatting.".into(),
      quiz_user_template: r#"Generate {count} multiple-choice questions about {topic} at {difficulty} difficulty level. Each question should have 4 options (A, B, C, D) with one correct answer. Format the response as a JSON array with each question object having the following properties:
- questionText: The question text
- options: An array of 4 options labeled A, B, C, D
- correctAnswer: The correct option letter (A, B, C, or D)
- explanation: A detailed explanation of why the answer is correct

Example format:
[
  {
    "questionText": "What is the capital of France?",
    "options": ["A) London", "B) Berlin", "C) Paris", "D) Rome"],
    "correctAnswer": "C",
    "explanation": "Paris is the capital of France. It is located in the north-central part of the country."
  }
]

Important: Respond with ONLY the JSON array of exactly {count} questions. Do not include any other text, explanations, or markdown formatting."#.into(),
      news_system: "You are a helpful news dashboard creator. You collect and analyze news from various sources and present them in a well-structured JSON format. Respond with ONLY the JSON object, no other text. Make sure to include at least 3 categories with 2-4 articles each. Ensure all articles have real-looking headlines, dates, and sources.".into(),
      news_user_template: r#"Collect the latest news articles about {topic} and create a well-structured news dashboard. Include headlines, brief summaries, publication dates, and categorize the news by importance or sub-topics. Format the response as a JSON object with the following structure:

{
  "topic": "{topic}",
  "summary": "Brief overall summary of news about {topic}",
  "categories": [
    {
      "name": "Category name (e.g., Top Stories, Technology, Politics)",
      "articles": [
        {
          "headline": "Article headline",
          "summary": "Brief summary of the article (2-3 sentences)",
          "date": "Publication date in DD/MM/YYYY format",
          "source": "News source name"
        }
      ]
    }
  ]
}

Important: Respond with ONLY the JSON object. Do not include any other text, explanations, or markdown formatting. Make sure to include at least 3 categories with 2-4 articles each."#.into(),
      topic_system: "You are a helpful educational assistant. You provide detailed explanations to help students learn about subjects. Your responses should be educational, well-structured, and easy to understand. Respond with ONLY the JSON object, no other text. Include at least 3 key concepts and 2 additional information sections.".into(),
      topic_user_template: r#"Provide a detailed explanation of {topic} that would help a student learn about this subject. Include key concepts, definitions, examples, and any other relevant educational information. Format the response as a JSON object with the following structure:

{
  "topic": "{topic}",
  "overview": "Brief overview of the topic",
  "keyConcepts": [
    {
      "concept": "Name of key concept",
      "definition": "Clear definition of the concept",
      "example": "Practical example to illustrate the concept"
    }
  ],
  "additionalInfo": [
    {
      "section": "Section name (e.g., History, Applications, etc.)",
      "content": "Detailed information about this section"
    }
  ]
}

Important: Respond with ONLY the JSON object. Do not include any other text, explanations, or markdown formatting. Include at least 3 key concepts and 2 additional information sections."#.into(),
    }
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "studyforge", %path, "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "studyforge", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "studyforge", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_default_prompts() {
    let cfg: AgentConfig = toml::from_str(
      r#"
        [prompts]
        quiz_system = "Only JSON, please."
      "#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.quiz_system, "Only JSON, please.");
    assert_eq!(cfg.prompts.news_system, Prompts::default().news_system);
  }

  #[test]
  fn default_prompts_carry_placeholders() {
    let p = Prompts::default();
    for tpl in [&p.quiz_user_template, &p.news_user_template, &p.topic_user_template] {
      assert!(tpl.contains("{topic}"));
    }
    assert!(p.quiz_user_template.contains("{count}"));
    assert!(p.quiz_user_template.contains("{difficulty}"));
  }
}
