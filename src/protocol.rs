//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AnswerRecord, AttemptRecord, ContentOrigin, Difficulty, NewsDashboard, Quiz, TopicExplainer,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizIn {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub num_questions: Option<i64>,
}
#[derive(Serialize)]
pub struct GenerateQuizOut {
    pub message: String,
    pub quiz: Quiz,
    pub origin: ContentOrigin,
}

/// Answers are index-aligned with the quiz questions; `null` means unanswered.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizIn {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub answers: Vec<Option<String>>,
}
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizOut {
    pub score: usize,
    pub total_questions: usize,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TopicIn {
    #[serde(default)]
    pub topic: String,
}

#[derive(Serialize)]
pub struct NewsOut {
    pub message: String,
    pub summary: NewsDashboard,
    pub origin: ContentOrigin,
}

#[derive(Serialize)]
pub struct TopicSearchOut {
    pub message: String,
    pub results: TopicExplainer,
    pub origin: ContentOrigin,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptsOut {
    pub learner_id: String,
    pub attempts: Vec<AttemptRecord>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub backend: bool,
}
