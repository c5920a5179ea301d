//! Parsing isolated JSON text into typed, checked domain objects.
//!
//! Two stages: syntax (`MalformedContent`) then shape and cardinality
//! (`SchemaMismatch`). Quiz answer keys are resolved into `CorrectAnswer` here,
//! so grading never has to re-inspect the raw string.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CorrectAnswer, NewsDashboard, Question, TopicExplainer};
use crate::error::GenerationError;

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const MIN_NEWS_CATEGORIES: usize = 3;
pub const MIN_ARTICLES_PER_CATEGORY: usize = 2;
pub const MAX_ARTICLES_PER_CATEGORY: usize = 4;
pub const MIN_KEY_CONCEPTS: usize = 3;
pub const MIN_INFO_SECTIONS: usize = 2;

/// Question as the model writes it, before the answer key is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
  #[serde(alias = "text")]
  question_text: String,
  options: Vec<String>,
  correct_answer: String,
  explanation: String,
}

fn parse(text: &str) -> Result<Value, GenerationError> {
  serde_json::from_str(text).map_err(|e| GenerationError::MalformedContent(e.to_string()))
}

fn shaped<T: DeserializeOwned>(value: Value) -> Result<T, GenerationError> {
  serde_json::from_value(value).map_err(|e| GenerationError::SchemaMismatch(e.to_string()))
}

fn mismatch(msg: impl Into<String>) -> GenerationError {
  GenerationError::SchemaMismatch(msg.into())
}

fn require_text(value: &str, what: &str) -> Result<(), GenerationError> {
  if value.trim().is_empty() {
    Err(mismatch(format!("{what} is empty")))
  } else {
    Ok(())
  }
}

/// Validate a quiz-question array holding exactly `expected_count` questions.
pub fn validate_quiz(text: &str, expected_count: usize) -> Result<Vec<Question>, GenerationError> {
  let raw: Vec<RawQuestion> = shaped(parse(text)?)?;
  if raw.len() != expected_count {
    return Err(mismatch(format!(
      "expected {expected_count} questions, got {}",
      raw.len()
    )));
  }

  raw
    .into_iter()
    .enumerate()
    .map(|(i, q)| resolve_question(i, q))
    .collect()
}

fn resolve_question(index: usize, q: RawQuestion) -> Result<Question, GenerationError> {
  let n = index + 1;
  require_text(&q.question_text, &format!("question {n} text"))?;
  require_text(&q.explanation, &format!("question {n} explanation"))?;

  if q.options.len() != OPTIONS_PER_QUESTION {
    return Err(mismatch(format!(
      "question {n} has {} options, expected {OPTIONS_PER_QUESTION}",
      q.options.len()
    )));
  }
  for opt in &q.options {
    require_text(opt, &format!("question {n} option"))?;
  }
  let distinct: HashSet<&str> = q.options.iter().map(String::as_str).collect();
  if distinct.len() != q.options.len() {
    return Err(mismatch(format!("question {n} has duplicate options")));
  }

  let correct_answer = CorrectAnswer::from(q.correct_answer);
  if let CorrectAnswer::FullText(text) = &correct_answer {
    if !q.options.contains(text) {
      return Err(mismatch(format!(
        "question {n} correctAnswer is neither a letter A-D nor one of the options"
      )));
    }
  }

  Ok(Question {
    id: format!("q{n}"),
    text: q.question_text,
    options: q.options,
    correct_answer,
    explanation: q.explanation,
  })
}

pub fn validate_news(text: &str) -> Result<NewsDashboard, GenerationError> {
  let news: NewsDashboard = shaped(parse(text)?)?;
  require_text(&news.topic, "topic")?;
  require_text(&news.summary, "summary")?;

  if news.categories.len() < MIN_NEWS_CATEGORIES {
    return Err(mismatch(format!(
      "expected at least {MIN_NEWS_CATEGORIES} categories, got {}",
      news.categories.len()
    )));
  }
  for cat in &news.categories {
    require_text(&cat.name, "category name")?;
    let n = cat.articles.len();
    if !(MIN_ARTICLES_PER_CATEGORY..=MAX_ARTICLES_PER_CATEGORY).contains(&n) {
      return Err(mismatch(format!(
        "category '{}' has {n} articles, expected {MIN_ARTICLES_PER_CATEGORY}-{MAX_ARTICLES_PER_CATEGORY}",
        cat.name
      )));
    }
    for a in &cat.articles {
      require_text(&a.headline, "article headline")?;
      require_text(&a.summary, "article summary")?;
      require_text(&a.date, "article date")?;
      require_text(&a.source, "article source")?;
    }
  }
  Ok(news)
}

pub fn validate_topic(text: &str) -> Result<TopicExplainer, GenerationError> {
  let topic: TopicExplainer = shaped(parse(text)?)?;
  require_text(&topic.topic, "topic")?;
  require_text(&topic.overview, "overview")?;

  if topic.key_concepts.len() < MIN_KEY_CONCEPTS {
    return Err(mismatch(format!(
      "expected at least {MIN_KEY_CONCEPTS} key concepts, got {}",
      topic.key_concepts.len()
    )));
  }
  if topic.additional_info.len() < MIN_INFO_SECTIONS {
    return Err(mismatch(format!(
      "expected at least {MIN_INFO_SECTIONS} additional info sections, got {}",
      topic.additional_info.len()
    )));
  }
  for k in &topic.key_concepts {
    require_text(&k.concept, "concept")?;
    require_text(&k.definition, "concept definition")?;
    require_text(&k.example, "concept example")?;
  }
  for s in &topic.additional_info {
    require_text(&s.section, "section name")?;
    require_text(&s.content, "section content")?;
  }
  Ok(topic)
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use serde_json::json;

  pub(crate) fn quiz_json(n: usize, correct: &str) -> String {
    let qs: Vec<Value> = (1..=n)
      .map(|i| {
        json!({
          "questionText": format!("Question {i}?"),
          "options": ["A) alpha", "B) beta", "C) gamma", "D) delta"],
          "correctAnswer": correct,
          "explanation": "Because."
        })
      })
      .collect();
    Value::Array(qs).to_string()
  }

  pub(crate) fn news_json(categories: usize, articles: usize) -> String {
    let cats: Vec<Value> = (0..categories)
      .map(|c| {
        let arts: Vec<Value> = (0..articles)
          .map(|a| {
            json!({
              "headline": format!("Headline {c}-{a}"),
              "summary": "Something happened.",
              "date": "05/10/2025",
              "source": "Daily Planet"
            })
          })
          .collect();
        json!({ "name": format!("Category {c}"), "articles": arts })
      })
      .collect();
    json!({ "topic": "Space", "summary": "Lots going on.", "categories": cats }).to_string()
  }

  pub(crate) fn topic_json(concepts: usize, sections: usize) -> String {
    let ks: Vec<Value> = (0..concepts)
      .map(|i| json!({ "concept": format!("C{i}"), "definition": "def", "example": "ex" }))
      .collect();
    let ss: Vec<Value> = (0..sections)
      .map(|i| json!({ "section": format!("S{i}"), "content": "content" }))
      .collect();
    json!({ "topic": "Rust", "overview": "A language.", "keyConcepts": ks, "additionalInfo": ss })
      .to_string()
  }

  #[test]
  fn letter_code_quiz_is_resolved() {
    let qs = validate_quiz(&quiz_json(3, "C"), 3).unwrap();
    assert_eq!(qs.len(), 3);
    assert_eq!(qs[0].id, "q1");
    assert_eq!(qs[2].id, "q3");
    assert_eq!(qs[1].correct_answer, CorrectAnswer::LetterCode('C'));
  }

  #[test]
  fn full_text_answer_must_be_an_option() {
    let qs = validate_quiz(&quiz_json(1, "B) beta"), 1).unwrap();
    assert_eq!(qs[0].correct_answer, CorrectAnswer::FullText("B) beta".into()));

    let err = validate_quiz(&quiz_json(1, "beta"), 1).unwrap_err();
    assert!(matches!(err, GenerationError::SchemaMismatch(_)));
  }

  #[test]
  fn syntax_errors_are_malformed_content() {
    let err = validate_quiz("[{\"questionText\": ", 1).unwrap_err();
    assert!(matches!(err, GenerationError::MalformedContent(_)));
    let err = validate_news("Sorry, I cannot help with that.").unwrap_err();
    assert!(matches!(err, GenerationError::MalformedContent(_)));
  }

  #[test]
  fn wrong_question_count_is_a_mismatch() {
    let err = validate_quiz(&quiz_json(4, "A"), 5).unwrap_err();
    assert!(matches!(err, GenerationError::SchemaMismatch(_)));
  }

  #[test]
  fn question_shape_violations_are_mismatches() {
    let cases = [
      json!([{ "questionText": "Q", "options": ["a", "b", "c"], "correctAnswer": "A", "explanation": "e" }]),
      json!([{ "questionText": "Q", "options": ["a", "a", "c", "d"], "correctAnswer": "A", "explanation": "e" }]),
      json!([{ "questionText": "", "options": ["a", "b", "c", "d"], "correctAnswer": "A", "explanation": "e" }]),
      json!([{ "questionText": "Q", "options": ["a", "b", "c", "d"], "correctAnswer": "A", "explanation": "  " }]),
      json!([{ "questionText": "Q", "options": ["a", "b", "c", "d"], "explanation": "e" }]),
      json!({ "questionText": "Q" }),
    ];
    for case in cases {
      let err = validate_quiz(&case.to_string(), 1).unwrap_err();
      assert!(matches!(err, GenerationError::SchemaMismatch(_)), "case {case} gave {err:?}");
    }
  }

  #[test]
  fn plain_text_field_alias_is_accepted() {
    let text = json!([{ "text": "Q", "options": ["a", "b", "c", "d"], "correctAnswer": "d", "explanation": "e" }]);
    let qs = validate_quiz(&text.to_string(), 1).unwrap();
    assert_eq!(qs[0].text, "Q");
    assert_eq!(qs[0].correct_answer, CorrectAnswer::FullText("d".into()));
  }

  #[test]
  fn news_cardinality() {
    assert!(validate_news(&news_json(3, 2)).is_ok());
    assert!(validate_news(&news_json(5, 4)).is_ok());
    assert!(matches!(validate_news(&news_json(2, 3)), Err(GenerationError::SchemaMismatch(_))));
    assert!(matches!(validate_news(&news_json(3, 1)), Err(GenerationError::SchemaMismatch(_))));
    assert!(matches!(validate_news(&news_json(3, 5)), Err(GenerationError::SchemaMismatch(_))));
  }

  #[test]
  fn topic_cardinality() {
    let t = validate_topic(&topic_json(3, 2)).unwrap();
    assert_eq!(t.key_concepts.len(), 3);
    assert!(matches!(validate_topic(&topic_json(2, 2)), Err(GenerationError::SchemaMismatch(_))));
    assert!(matches!(validate_topic(&topic_json(3, 1)), Err(GenerationError::SchemaMismatch(_))));
  }
}
