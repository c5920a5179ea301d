//! Domain models: quizzes and their polymorphic answer key, grading attempts,
//! news dashboards and topic explainers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which kind of content a generation request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentDomain {
  Quiz,
  News,
  Topic,
}

impl fmt::Display for ContentDomain {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ContentDomain::Quiz => "quiz",
      ContentDomain::News => "news",
      ContentDomain::Topic => "topic",
    };
    f.write_str(s)
  }
}

/// Where did a piece of generated content come from?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrigin {
  Generated, // extracted + validated model output
  Fallback,  // deterministic template
}

impl ContentOrigin {
  pub fn as_str(&self) -> &'static str {
    match self {
      ContentOrigin::Generated => "generated",
      ContentOrigin::Fallback => "fallback",
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The answer key of a question.
///
/// Model-generated quizzes name the correct option by letter (`"C"`), while the
/// fallback template stores the option text itself. The encoding is resolved
/// once, when the question is built, and serialized back as the plain string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CorrectAnswer {
  LetterCode(char),
  FullText(String),
}

impl CorrectAnswer {
  /// Zero-based option offset for a letter code.
  pub fn letter_offset(&self) -> Option<usize> {
    match self {
      CorrectAnswer::LetterCode(c) if c.is_ascii_uppercase() => Some((*c as u8 - b'A') as usize),
      _ => None,
    }
  }
}

impl From<String> for CorrectAnswer {
  fn from(s: String) -> Self {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
      (Some(c @ 'A'..='D'), None) => CorrectAnswer::LetterCode(c),
      _ => CorrectAnswer::FullText(s),
    }
  }
}

impl From<CorrectAnswer> for String {
  fn from(a: CorrectAnswer) -> Self {
    match a {
      CorrectAnswer::LetterCode(c) => c.to_string(),
      CorrectAnswer::FullText(s) => s,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: String,
  #[serde(rename = "questionText", alias = "text")]
  pub text: String,
  pub options: Vec<String>,
  pub correct_answer: CorrectAnswer,
  pub explanation: String,
}

/// A persisted quiz. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
  pub id: String,
  pub topic: String,
  pub difficulty: Difficulty,
  pub questions: Vec<Question>,
  pub created_at: DateTime<Utc>,
}

/// Grading outcome of a single question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
  pub question_id: String,
  pub selected_option: Option<String>,
  pub is_correct: bool,
}

/// One graded submission of a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
  pub quiz_id: String,
  pub score: usize,
  pub total_questions: usize,
  #[serde(rename = "answers")]
  pub per_question: Vec<AnswerRecord>,
}

/// An attempt as kept in a learner's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
  #[serde(flatten)]
  pub attempt: Attempt,
  pub completed_at: DateTime<Utc>,
}

/// A learner and their append-only attempt history.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Learner {
  pub id: String,
  pub name: String,
  pub attempts: Vec<AttemptRecord>,
  pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDashboard {
  pub topic: String,
  pub summary: String,
  pub categories: Vec<NewsCategory>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCategory {
  pub name: String,
  pub articles: Vec<NewsArticle>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
  pub headline: String,
  pub summary: String,
  pub date: String, // DD/MM/YYYY as produced by the model
  pub source: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicExplainer {
  pub topic: String,
  pub overview: String,
  pub key_concepts: Vec<KeyConcept>,
  pub additional_info: Vec<InfoSection>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConcept {
  pub concept: String,
  pub definition: String,
  pub example: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoSection {
  pub section: String,
  pub content: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_letter_a_to_d_becomes_letter_code() {
    assert_eq!(CorrectAnswer::from("B".to_string()), CorrectAnswer::LetterCode('B'));
    assert_eq!(CorrectAnswer::from("D".to_string()), CorrectAnswer::LetterCode('D'));
  }

  #[test]
  fn anything_else_is_full_text() {
    for s in ["E", "b", "AB", "", "Paris", " A"] {
      assert_eq!(CorrectAnswer::from(s.to_string()), CorrectAnswer::FullText(s.to_string()));
    }
  }

  #[test]
  fn question_serializes_answer_key_as_plain_string() {
    let q = Question {
      id: "q1".into(),
      text: "Capital of France?".into(),
      options: vec!["London".into(), "Berlin".into(), "Paris".into(), "Rome".into()],
      correct_answer: CorrectAnswer::LetterCode('C'),
      explanation: "Paris.".into(),
    };
    let v = serde_json::to_value(&q).unwrap();
    assert_eq!(v["correctAnswer"], "C");
    assert_eq!(v["questionText"], "Capital of France?");

    let back: Question = serde_json::from_value(v).unwrap();
    assert_eq!(back, q);
  }
}
