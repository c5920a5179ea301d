//! HTTP endpoint handlers. These are thin wrappers that forward to state/generator.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;
use axum::{extract::{FromRequest, Path, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::protocol::*;
use crate::state::AppState;

/// `Json` extractor whose rejections answer with the same `{ "message" }` body as every other error.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, backend: state.generator.is_online() })
}

#[instrument(level = "info", skip(state, body), fields(topic_len = body.topic.len(), difficulty = ?body.difficulty, num_questions = ?body.num_questions))]
pub async fn http_generate_quiz(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<GenerateQuizIn>,
) -> Result<impl IntoResponse, ApiError> {
  let generated = state.create_quiz(&body.topic, body.difficulty, body.num_questions).await?;
  info!(target: "studyforge", quiz_id = %generated.content.id, origin = generated.origin.as_str(), "HTTP quiz generated");
  Ok((
    StatusCode::CREATED,
    Json(GenerateQuizOut {
      message: "Quiz generated successfully".into(),
      quiz: generated.content,
      origin: generated.origin,
    }),
  ))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let quiz = state.get_quiz(&id).await.ok_or(ApiError::QuizNotFound(id))?;
  Ok(Json(quiz))
}

#[instrument(level = "info", skip(state, body), fields(user_id = ?body.user_id, answers = body.answers.len()))]
pub async fn http_submit_quiz(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  ApiJson(body): ApiJson<SubmitQuizIn>,
) -> Result<impl IntoResponse, ApiError> {
  let attempt = state.submit_quiz(&id, body.user_id.as_deref(), &body.answers).await?;
  Ok(Json(SubmitQuizOut {
    score: attempt.score,
    total_questions: attempt.total_questions,
    answers: attempt.per_question,
  }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_learner_attempts(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let attempts = state
    .learner_attempts(&id)
    .await
    .ok_or_else(|| ApiError::LearnerNotFound(id.clone()))?;
  Ok(Json(AttemptsOut { learner_id: id, attempts }))
}

#[instrument(level = "info", skip(state, body), fields(topic_len = body.topic.len()))]
pub async fn http_news_summary(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<TopicIn>,
) -> Result<impl IntoResponse, ApiError> {
  let generated = state.generator.generate_news(&body.topic).await?;
  info!(target: "studyforge", origin = generated.origin.as_str(), categories = generated.content.categories.len(), "HTTP news summary served");
  Ok(Json(NewsOut {
    message: "News summary generated successfully".into(),
    summary: generated.content,
    origin: generated.origin,
  }))
}

#[instrument(level = "info", skip(state, body), fields(topic_len = body.topic.len()))]
pub async fn http_search_topic(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<TopicIn>,
) -> Result<impl IntoResponse, ApiError> {
  let generated = state.generator.generate_topic(&body.topic).await?;
  info!(target: "studyforge", origin = generated.origin.as_str(), "HTTP topic explainer served");
  Ok(Json(TopicSearchOut {
    message: "Topic information retrieved successfully".into(),
    results: generated.content,
    origin: generated.origin,
  }))
}
