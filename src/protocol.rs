//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Problems go out as `ProblemOut`: the ground truth and the worked
//! explanation stay on the server until an answer is checked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::checker::{CheckResult, Verdict};
use crate::domain::{ParamValue, Problem, ProblemKind, Topic};
use crate::relationships::{Classification, Diagram, Relationship};
use crate::score::ScoreCard;
use crate::state::Served;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewSession {
        topic: Topic,
        #[serde(default)]
        seed: Option<u64>,
    },
    NextProblem {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(default)]
        kind: Option<ProblemKind>,
    },
    SubmitAnswer {
        #[serde(rename = "sessionId")]
        session_id: String,
        answer: String,
        #[serde(default)]
        angle: Option<String>,
    },
    Hint {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    StartQuiz {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(default)]
        len: Option<usize>,
    },
    ResetScore {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    CloseSession {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Relationship {
        diagram: Diagram,
        a: String,
        b: String,
    },
    Convert {
        value: String,
        to: ConvertTarget,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session(SessionOut),
    Problem(ProblemEnvelope),
    AnswerResult(AnswerOut),
    Hint(HintOut),
    QuizStarted(QuizOut),
    Score(ScoreOut),
    SessionClosed(ClosedOut),
    Relationship(RelationshipOut),
    Converted(ConvertOut),
    Error { message: String },
}

/// DTO used by both WS and HTTP for problem delivery.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub id: String,
    pub topic: Topic,
    pub kind: ProblemKind,
    pub prompt: String,
    pub parameters: BTreeMap<String, ParamValue>,
    /// Empty for free-entry answers.
    pub options: Vec<String>,
    /// Input boxes to render: `["answer"]`, or `["x", "angle"]` for algebra.
    pub fields: &'static [&'static str],
    /// Unit label for numeric answers, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

pub fn to_out(p: &Problem) -> ProblemOut {
    let unit = match &p.expected {
        crate::domain::Expected::Number { unit, .. } => unit.clone(),
        _ => None,
    };
    ProblemOut {
        id: p.id.clone(),
        topic: p.topic,
        kind: p.kind,
        prompt: p.prompt.clone(),
        parameters: p.parameters.clone(),
        options: p.expected.options(),
        fields: p.expected.fields(),
        unit,
    }
}

#[derive(Debug, Serialize)]
pub struct ProblemEnvelope {
    pub problem: ProblemOut,
    #[serde(rename = "quizRemaining", skip_serializing_if = "Option::is_none")]
    pub quiz_remaining: Option<usize>,
}

impl From<Served> for ProblemEnvelope {
    fn from(s: Served) -> Self {
        Self { problem: to_out(&s.problem), quiz_remaining: s.quiz_remaining }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct SessionIn {
    pub topic: Topic,
    #[serde(default)]
    pub seed: Option<u64>,
}
#[derive(Debug, Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub topic: Topic,
    pub kinds: Vec<ProblemKind>,
    pub score: ScoreCard,
}

#[derive(Debug, Deserialize)]
pub struct ProblemQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub kind: Option<ProblemKind>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub answer: String,
    /// Second field of two-part algebra answers.
    #[serde(default)]
    pub angle: Option<String>,
}
#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub verdict: Verdict,
    pub message: String,
    pub expected: String,
    pub explanation: String,
    pub score: ScoreCard,
}

impl AnswerOut {
    pub fn new(result: CheckResult, score: ScoreCard) -> Self {
        Self {
            correct: result.correct,
            verdict: result.verdict,
            message: result.message,
            expected: result.expected,
            explanation: result.explanation,
            score,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
#[derive(Debug, Serialize)]
pub struct HintOut {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub len: Option<usize>,
}
#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub queued: usize,
    pub score: ScoreCard,
}

#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
#[derive(Debug, Serialize)]
pub struct ScoreOut {
    pub score: ScoreCard,
}

#[derive(Debug, Serialize)]
pub struct ClosedOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub closed: bool,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipQuery {
    pub diagram: Diagram,
    pub a: String,
    pub b: String,
}
#[derive(Debug, Serialize)]
pub struct RelationshipOut {
    pub name: &'static str,
    pub classification: Classification,
    pub description: &'static str,
}

impl From<Relationship> for RelationshipOut {
    fn from(r: Relationship) -> Self {
        Self { name: r.name, classification: r.classification, description: r.description }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvertTarget {
    Scientific,
    Standard,
}

#[derive(Debug, Deserialize)]
pub struct ConvertIn {
    pub value: String,
    pub to: ConvertTarget,
}
#[derive(Debug, Serialize)]
pub struct ConvertOut {
    /// Canonical form, e.g. `2.5x10^5` or `250000`.
    pub result: String,
    /// Display form, e.g. `2.5 × 10^5` or `250,000`.
    pub pretty: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
