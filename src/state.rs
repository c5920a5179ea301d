//! Application state: the generator plus in-memory quiz and learner stores.
//!
//! Quizzes are written once and only read afterwards. Learner histories are
//! append-only. Each request works on its own data; the stores are the only
//! shared state.

use std::{collections::HashMap, sync::Arc};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{load_agent_config_from_env, BackendConfig};
use crate::domain::{Attempt, AttemptRecord, Difficulty, Learner, Quiz};
use crate::error::{ApiError, InputError};
use crate::generator::{Generated, Generator};
use crate::grading::grade;

#[derive(Clone)]
pub struct AppState {
    pub quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
    pub learners: Arc<RwLock<HashMap<String, Learner>>>,
    pub generator: Arc<Generator>,
}

impl AppState {
    /// Build state from env: load prompt overrides and the backend config.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_agent_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();
        let generator = Generator::from_config(BackendConfig::from_env(), prompts);
        Self::with_generator(generator)
    }

    pub fn with_generator(generator: Generator) -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            learners: Arc::new(RwLock::new(HashMap::new())),
            generator: Arc::new(generator),
        }
    }

    /// Generate a quiz and persist it.
    #[instrument(level = "info", skip(self, topic), fields(topic_len = topic.len()))]
    pub async fn create_quiz(
        &self,
        topic: &str,
        difficulty: Option<Difficulty>,
        count: Option<i64>,
    ) -> Result<Generated<Quiz>, InputError> {
        let generated = self.generator.generate_quiz(topic, difficulty, count).await?;
        let quiz = generated.content.clone();
        info!(target: "studyforge", quiz_id = %quiz.id, origin = generated.origin.as_str(), "Quiz stored");
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
        Ok(generated)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_quiz(&self, id: &str) -> Option<Quiz> {
        self.quizzes.read().await.get(id).cloned()
    }

    /// Grade a submission and, when a learner id is given, append it to that
    /// learner's history (creating the learner on first use).
    #[instrument(level = "info", skip(self, answers), fields(answers = answers.len()))]
    pub async fn submit_quiz(
        &self,
        quiz_id: &str,
        learner_id: Option<&str>,
        answers: &[Option<String>],
    ) -> Result<Attempt, ApiError> {
        let quiz = self
            .get_quiz(quiz_id)
            .await
            .ok_or_else(|| ApiError::QuizNotFound(quiz_id.to_string()))?;

        let attempt = grade(&quiz, answers);
        info!(target: "grading", %quiz_id, score = attempt.score, total = attempt.total_questions, "Quiz submission graded");

        if let Some(learner_id) = learner_id {
            let now = Utc::now();
            let mut learners = self.learners.write().await;
            let learner = learners.entry(learner_id.to_string()).or_insert_with(|| {
                info!(target: "studyforge", %learner_id, "Creating learner record");
                Learner {
                    id: learner_id.to_string(),
                    name: "Anonymous User".into(),
                    attempts: Vec::new(),
                    created_at: now,
                }
            });
            learner.attempts.push(AttemptRecord { attempt: attempt.clone(), completed_at: now });
        }

        Ok(attempt)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn learner_attempts(&self, learner_id: &str) -> Option<Vec<AttemptRecord>> {
        self.learners
            .read()
            .await
            .get(learner_id)
            .map(|l| l.attempts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;

    fn offline_state() -> AppState {
        AppState::with_generator(Generator::offline(Prompts::default()))
    }

    #[tokio::test]
    async fn created_quiz_is_retrievable_unchanged() {
        let state = offline_state();
        let generated = state.create_quiz("Physics", Some(Difficulty::Hard), Some(2)).await.unwrap();
        let stored = state.get_quiz(&generated.content.id).await.unwrap();
        assert_eq!(stored, generated.content);
    }

    #[tokio::test]
    async fn submission_appends_to_learner_history() {
        let state = offline_state();
        let quiz = state.create_quiz("Physics", None, Some(2)).await.unwrap().content;
        let right: Vec<Option<String>> = quiz.questions.iter().map(|q| Some(q.options[0].clone())).collect();

        let first = state.submit_quiz(&quiz.id, Some("learner-1"), &right).await.unwrap();
        assert_eq!(first.score, 2);
        let second = state.submit_quiz(&quiz.id, Some("learner-1"), &[None, None]).await.unwrap();
        assert_eq!(second.score, 0);

        let history = state.learner_attempts("learner-1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].attempt, first);
        assert_eq!(history[1].attempt, second);
    }

    #[tokio::test]
    async fn anonymous_submission_is_not_recorded() {
        let state = offline_state();
        let quiz = state.create_quiz("Physics", None, Some(1)).await.unwrap().content;
        state.submit_quiz(&quiz.id, None, &[]).await.unwrap();
        assert!(state.learners.read().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_quiz_is_not_found() {
        let state = offline_state();
        let err = state.submit_quiz("missing", None, &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::QuizNotFound(id) if id == "missing"));
    }
}
