//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Each function takes the shared state plus request fields and returns the
//! response DTO, so both transports stay thin and answer identically.

use tracing::{debug, info, instrument};

use crate::checker::Answer;
use crate::error::ApiError;
use crate::notation::{group_thousands, pretty_scientific, to_scientific, to_standard};
use crate::protocol::*;
use crate::relationships::{lookup, Diagram};
use crate::state::AppState;
use crate::domain::{ProblemKind, Topic};

#[instrument(level = "info", skip(state))]
pub async fn open_session(state: &AppState, topic: Topic, seed: Option<u64>) -> SessionOut {
  let (session_id, score) = state.create_session(topic, seed).await;
  SessionOut { session_id, topic, kinds: topic.kinds().to_vec(), score }
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn next_problem(state: &AppState, session_id: &str, kind: Option<ProblemKind>) -> Result<ProblemEnvelope, ApiError> {
  let served = state.next_problem(session_id, kind).await?;
  debug!(target: "practice", id = %served.problem.id, fingerprint = %served.problem.fingerprint, "Problem out");
  Ok(served.into())
}

#[instrument(level = "info", skip(state, answer, angle), fields(%session_id, answer_len = answer.len()))]
pub async fn evaluate_answer(
  state: &AppState,
  session_id: &str,
  answer: &str,
  angle: Option<&str>,
) -> Result<AnswerOut, ApiError> {
  let (result, card) = state.submit_answer(session_id, Answer { value: answer, angle }).await?;
  Ok(AnswerOut::new(result, card))
}

pub async fn get_hint_text(state: &AppState, session_id: &str) -> Result<HintOut, ApiError> {
  let text = state.hint(session_id).await?;
  Ok(HintOut { text })
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn start_quiz(state: &AppState, session_id: &str, len: Option<usize>) -> Result<QuizOut, ApiError> {
  let queued = state.start_quiz(session_id, len).await?;
  let score = state.score(session_id).await?;
  Ok(QuizOut { queued, score })
}

pub async fn close_session(state: &AppState, session_id: &str) -> Result<ClosedOut, ApiError> {
  state.close_session(session_id).await?;
  Ok(ClosedOut { session_id: session_id.to_string(), closed: true })
}

pub async fn reset_score(state: &AppState, session_id: &str) -> Result<ScoreOut, ApiError> {
  let score = state.reset_score(session_id).await?;
  info!(target: "practice", %session_id, "Score reset");
  Ok(ScoreOut { score })
}

/// Angle-pair lookup for the interactive diagrams. Order of `a`/`b` is irrelevant.
pub fn relationship(diagram: Diagram, a: &str, b: &str) -> Result<RelationshipOut, ApiError> {
  let rel = lookup(diagram, a, b)?;
  debug!(target: "practice", ?diagram, %a, %b, name = rel.name, "Relationship lookup");
  Ok(rel.into())
}

pub fn convert(value: &str, to: ConvertTarget) -> Result<ConvertOut, ApiError> {
  let out = match to {
    ConvertTarget::Scientific => {
      let result = to_scientific(value)?;
      ConvertOut { pretty: pretty_scientific(&result), result }
    }
    ConvertTarget::Standard => {
      let result = to_standard(value)?;
      ConvertOut { pretty: group_thousands(&result), result }
    }
  };
  Ok(out)
}
