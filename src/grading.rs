//! Quiz grading.
//!
//! Pure and total: malformed keys, out-of-range letters and missing answers all
//! grade as incorrect, never as an error. Comparison is exact (no trimming, no
//! case folding).

use tracing::{debug, instrument};

use crate::domain::{AnswerRecord, Attempt, CorrectAnswer, Question, Quiz};

/// Is `submitted` the correct answer to `q`?
pub fn is_correct(q: &Question, submitted: Option<&str>) -> bool {
  let Some(submitted) = submitted else {
    return false;
  };
  match &q.correct_answer {
    CorrectAnswer::LetterCode(_) => q
      .correct_answer
      .letter_offset()
      .and_then(|i| q.options.get(i))
      .is_some_and(|opt| opt == submitted),
    CorrectAnswer::FullText(text) => text == submitted,
  }
}

/// Grade `answers` (index-aligned with `quiz.questions`) against the quiz.
/// Missing trailing answers count as unanswered; extra answers are ignored.
#[instrument(level = "debug", target = "grading", skip_all, fields(quiz_id = %quiz.id, questions = quiz.questions.len(), answers = answers.len()))]
pub fn grade(quiz: &Quiz, answers: &[Option<String>]) -> Attempt {
  let per_question: Vec<AnswerRecord> = quiz
    .questions
    .iter()
    .enumerate()
    .map(|(i, q)| {
      let selected = answers.get(i).cloned().flatten();
      AnswerRecord {
        question_id: q.id.clone(),
        is_correct: is_correct(q, selected.as_deref()),
        selected_option: selected,
      }
    })
    .collect();

  let score = per_question.iter().filter(|r| r.is_correct).count();
  debug!(target: "grading", score, total = per_question.len(), "Quiz graded");

  Attempt {
    quiz_id: quiz.id.clone(),
    score,
    total_questions: quiz.questions.len(),
    per_question,
  }
}
