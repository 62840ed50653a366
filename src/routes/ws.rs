//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to `logic`; every request gets exactly one JSON reply.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApiError;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "mathtutor_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "mathtutor_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "mathtutor_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "mathtutor_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "mathtutor_backend", "WebSocket disconnected");
}

fn reply<T>(res: Result<T, ApiError>, wrap: impl FnOnce(T) -> ServerWsMessage) -> ServerWsMessage {
  match res {
    Ok(v) => wrap(v),
    Err(e) => {
      warn!(target: "practice", error = %e, "WS request rejected");
      ServerWsMessage::Error { message: e.to_string() }
    }
  }
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewSession { topic, seed } => {
      ServerWsMessage::Session(logic::open_session(state, topic, seed).await)
    }

    ClientWsMessage::NextProblem { session_id, kind } => {
      reply(logic::next_problem(state, &session_id, kind).await, ServerWsMessage::Problem)
    }

    ClientWsMessage::SubmitAnswer { session_id, answer, angle } => reply(
      logic::evaluate_answer(state, &session_id, &answer, angle.as_deref()).await,
      ServerWsMessage::AnswerResult,
    ),

    ClientWsMessage::Hint { session_id } => reply(logic::get_hint_text(state, &session_id).await, ServerWsMessage::Hint),

    ClientWsMessage::StartQuiz { session_id, len } => {
      reply(logic::start_quiz(state, &session_id, len).await, ServerWsMessage::QuizStarted)
    }

    ClientWsMessage::ResetScore { session_id } => reply(logic::reset_score(state, &session_id).await, ServerWsMessage::Score),

    ClientWsMessage::CloseSession { session_id } => {
      reply(logic::close_session(state, &session_id).await, ServerWsMessage::SessionClosed)
    }

    ClientWsMessage::Relationship { diagram, a, b } => {
      reply(logic::relationship(diagram, &a, &b), ServerWsMessage::Relationship)
    }

    ClientWsMessage::Convert { value, to } => reply(logic::convert(&value, to), ServerWsMessage::Converted),
  }
}
