//! Deterministic placeholder content, served whenever generation fails.
//!
//! Everything here is a pure function of its inputs: no randomness, no clock,
//! no I/O. Fallback quizzes store the *text* of the first option as the answer
//! key, unlike model output which uses letter codes.

use crate::domain::{
  CorrectAnswer, Difficulty, InfoSection, KeyConcept, NewsArticle, NewsCategory, NewsDashboard,
  Question, TopicExplainer,
};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn fallback_questions(topic: &str, _difficulty: Difficulty, count: usize) -> Vec<Question> {
  (1..=count)
    .map(|i| {
      let options: Vec<String> = OPTION_LABELS
        .iter()
        .map(|l| format!("Option {l} for {topic} question {i}"))
        .collect();
      Question {
        id: format!("q{i}"),
        text: format!("What is question {i} about {topic}?"),
        correct_answer: CorrectAnswer::FullText(options[0].clone()),
        options,
        explanation: format!(
          "This is the explanation for why Option A is correct for question {i} about {topic}."
        ),
      }
    })
    .collect()
}

pub fn fallback_news(topic: &str) -> NewsDashboard {
  let article = |headline: String, summary: String, date: &str, source: &str| NewsArticle {
    headline,
    summary,
    date: date.into(),
    source: source.into(),
  };

  NewsDashboard {
    topic: topic.into(),
    summary: format!(
      "This is a placeholder news summary for {topic}. Live coverage is unavailable right now, \
       so a fixed overview of the category is shown instead."
    ),
    categories: vec![
      NewsCategory {
        name: "Top Stories".into(),
        articles: vec![
          article(
            format!("Important developments in {topic}"),
            format!("Recent developments have shaped the landscape of {topic}. Experts are analyzing the impact of these changes on the industry."),
            "03/10/2025",
            "News Network",
          ),
          article(
            format!("New trends emerging in {topic}"),
            format!("Several new trends are emerging in the {topic} field, indicating a shift in how professionals approach this domain."),
            "02/10/2025",
            "Global Times",
          ),
        ],
      },
      NewsCategory {
        name: "Research & Innovation".into(),
        articles: vec![
          article(
            format!("Breakthrough research in {topic} published"),
            format!("Scientists have published new research findings that could revolutionize our understanding of {topic} and its applications."),
            "01/10/2025",
            "Science Daily",
          ),
          article(
            format!("Innovation hub for {topic} opens in major city"),
            format!("A new innovation center focused on {topic} has opened, bringing together experts from around the world to collaborate on future developments."),
            "30/09/2025",
            "Tech Journal",
          ),
        ],
      },
    ],
  }
}

pub fn fallback_topic(topic: &str) -> TopicExplainer {
  TopicExplainer {
    topic: topic.into(),
    overview: format!(
      "This is placeholder information about {topic}. A full explanation could not be \
       generated right now; the outline below covers the basics."
    ),
    key_concepts: ["first", "second"]
      .iter()
      .enumerate()
      .map(|(i, nth)| KeyConcept {
        concept: format!("Fundamental concept {} in {topic}", i + 1),
        definition: format!("This is the definition of the {nth} key concept in {topic}."),
        example: "Here's an example to illustrate this concept.".into(),
      })
      .collect(),
    additional_info: vec![
      InfoSection {
        section: "Historical Background".into(),
        content: format!("Information about the history and development of {topic}."),
      },
      InfoSection {
        section: "Current Applications".into(),
        content: format!("How {topic} is being used today in various fields."),
      },
    ],
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quiz_fallback_is_deterministic() {
    let a = serde_json::to_vec(&fallback_questions("Rust", Difficulty::Hard, 7)).unwrap();
    let b = serde_json::to_vec(&fallback_questions("Rust", Difficulty::Hard, 7)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn news_and_topic_fallbacks_are_deterministic() {
    assert_eq!(
      serde_json::to_vec(&fallback_news("AI")).unwrap(),
      serde_json::to_vec(&fallback_news("AI")).unwrap()
    );
    assert_eq!(
      serde_json::to_vec(&fallback_topic("AI")).unwrap(),
      serde_json::to_vec(&fallback_topic("AI")).unwrap()
    );
  }

  #[test]
  fn quiz_fallback_uses_first_option_text_as_key() {
    let qs = fallback_questions("History", Difficulty::Easy, 5);
    assert_eq!(qs.len(), 5);
    for q in &qs {
      assert_eq!(q.options.len(), 4);
      assert_eq!(q.correct_answer, CorrectAnswer::FullText(q.options[0].clone()));
    }
    assert_eq!(qs[1].options[0], "Option A for History question 2");
  }

  #[test]
  fn quiz_fallback_passes_quiz_validation() {
    let qs = fallback_questions("Chemistry", Difficulty::Medium, 3);
    let text = serde_json::to_string(&qs).unwrap();
    let validated = crate::validate::validate_quiz(&text, 3).unwrap();
    assert_eq!(validated, qs);
  }

  #[test]
  fn zero_count_yields_empty_quiz() {
    assert!(fallback_questions("x", Difficulty::Easy, 0).is_empty());
  }

  #[test]
  fn news_and_topic_fallbacks_reference_topic() {
    let news = fallback_news("Mars");
    assert_eq!(news.categories.len(), 2);
    assert!(news.categories.iter().all(|c| c.articles.len() == 2));
    assert!(news.categories[0].articles[0].headline.contains("Mars"));

    let t = fallback_topic("Mars");
    assert_eq!(t.key_concepts.len(), 2);
    assert_eq!(t.additional_info.len(), 2);
    assert_eq!(t.key_concepts[1].concept, "Fundamental concept 2 in Mars");
  }
}
