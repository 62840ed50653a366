//! HTTP endpoint handlers. Thin wrappers over `logic`; failures map to JSON
//! error bodies through `ApiError`.

use std::sync::Arc;
use axum::{extract::{Query, State}, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(topic = ?body.topic))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> Json<SessionOut> {
  let out = logic::open_session(&state, body.topic, body.seed).await;
  info!(target: "practice", session = %out.session_id, "HTTP session opened");
  Json(out)
}

#[instrument(level = "info", skip(state), fields(session = %q.session_id))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Result<Json<ClosedOut>, ApiError> {
  Ok(Json(logic::close_session(&state, &q.session_id).await?))
}

#[instrument(level = "info", skip(state), fields(session = %q.session_id, kind = ?q.kind))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProblemQuery>,
) -> Result<Json<ProblemEnvelope>, ApiError> {
  let out = logic::next_problem(&state, &q.session_id, q.kind).await?;
  info!(target: "practice", id = %out.problem.id, kind = ?out.problem.kind, "HTTP problem served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let out = logic::evaluate_answer(&state, &body.session_id, &body.answer, body.angle.as_deref()).await?;
  info!(target: "practice", verdict = ?out.verdict, score = out.score.score, "HTTP answer evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(session = %q.session_id))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Result<Json<HintOut>, ApiError> {
  Ok(Json(logic::get_hint_text(&state, &q.session_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> Result<Json<QuizOut>, ApiError> {
  Ok(Json(logic::start_quiz(&state, &body.session_id, body.len).await?))
}

#[instrument(level = "info", skip(state), fields(session = %q.session_id))]
pub async fn http_get_score(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> Result<Json<ScoreOut>, ApiError> {
  let score = state.score(&q.session_id).await?;
  Ok(Json(ScoreOut { score }))
}

#[instrument(level = "info", skip(state, body), fields(session = %body.session_id))]
pub async fn http_post_score_reset(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ScoreIn>,
) -> Result<Json<ScoreOut>, ApiError> {
  Ok(Json(logic::reset_score(&state, &body.session_id).await?))
}

#[instrument(level = "info", fields(diagram = ?q.diagram, a = %q.a, b = %q.b))]
pub async fn http_get_relationship(Query(q): Query<RelationshipQuery>) -> Result<Json<RelationshipOut>, ApiError> {
  Ok(Json(logic::relationship(q.diagram, &q.a, &q.b)?))
}

#[instrument(level = "info", skip(body), fields(value_len = body.value.len(), to = ?body.to))]
pub async fn http_post_convert(Json(body): Json<ConvertIn>) -> Result<Json<ConvertOut>, ApiError> {
  Ok(Json(logic::convert(&body.value, body.to)?))
}
