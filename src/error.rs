//! Error types for the notation converters, the angle tables and the API surface.
//!
//! Wrong or unparseable *answers* are not errors: they come back as a
//! `Verdict` from the checker. These types cover malformed requests only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{ProblemKind, Topic};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty number")]
    Empty,
    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),
    #[error("more than one decimal point")]
    MisplacedPoint,
    #[error("missing power of ten (expected a form like 2.5x10^5)")]
    MissingExponent,
    #[error("invalid exponent '{0}'")]
    InvalidExponent(String),
    #[error("zero has no scientific form")]
    Zero,
    #[error("exponent {0} is outside the supported range")]
    ExponentOutOfRange(i32),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AngleError {
    #[error("transversal angles are numbered 1-8, got {0}")]
    OutOfRange(u8),
    #[error("unknown angle label '{0}'")]
    UnknownLabel(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown session: {0}")]
    UnknownSession(String),
    #[error("problem kind {kind:?} does not belong to topic {topic:?}")]
    KindMismatch { kind: ProblemKind, topic: Topic },
    #[error("no active problem; request one first")]
    NoActiveProblem,
    #[error("this problem is already finished; request the next one")]
    AlreadyFinished,
    #[error("a quiz can have at most {max} problems, asked for {requested}")]
    QuizTooLong { requested: usize, max: usize },
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Angle(#[from] AngleError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownSession(_) => StatusCode::NOT_FOUND,
            ApiError::NoActiveProblem | ApiError::AlreadyFinished => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
