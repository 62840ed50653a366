//! Application state: practice sessions and the loaded tutor config.
//!
//! Each session owns:
//!   - its own seeded rng (a client-supplied seed replays the same problems)
//!   - the problem currently on screen, if any
//!   - a queue of pending quiz problems
//!   - the score card and a short window of recent scenario fingerprints
//!
//! Sessions live in memory only; nothing is persisted. Idle sessions expire
//! after `session_idle_secs`, and the least recently used one is evicted once
//! `max_sessions` are live.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::checker::{check, Answer, CheckResult, Grading, InvalidInputPolicy, Verdict};
use crate::config::{load_tutor_config_from_env, TutorConfig};
use crate::domain::{Problem, ProblemKind, Topic};
use crate::error::ApiError;
use crate::generators;
use crate::score::ScoreCard;

/// The problem on screen and whether it still accepts answers.
#[derive(Clone, Debug)]
pub struct ActiveProblem {
    pub problem: Problem,
    pub finished: bool,
    pub from_quiz: bool,
}

pub struct Session {
    pub id: String,
    pub topic: Topic,
    rng: StdRng,
    pub current: Option<ActiveProblem>,
    pub quiz: VecDeque<Problem>,
    pub card: ScoreCard,
    pub history: VecDeque<String>,
    pub last_seen: Instant,
}

impl Session {
    fn new(topic: Topic, seed: Option<u64>) -> Self {
        let rng = seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy);
        Self {
            id: Uuid::new_v4().to_string(),
            topic,
            rng,
            current: None,
            quiz: VecDeque::new(),
            card: ScoreCard::default(),
            history: VecDeque::new(),
            last_seen: Instant::now(),
        }
    }

    fn expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }

    fn remember(&mut self, fingerprint: &str, window: usize) {
        if window == 0 {
            return;
        }
        self.history.push_back(fingerprint.to_string());
        while self.history.len() > window {
            self.history.pop_front();
        }
    }
}

/// A problem handed to the client, with the number of quiz problems still
/// queued behind it (`None` outside a quiz).
#[derive(Clone, Debug)]
pub struct Served {
    pub problem: Problem,
    pub quiz_remaining: Option<usize>,
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub config: Arc<TutorConfig>,
}

type Sessions = HashMap<String, Session>;

impl AppState {
    /// Build state from env: load the TOML config or fall back to defaults.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = match load_tutor_config_from_env() {
            Some(cfg) => cfg,
            None => {
                info!(target: "mathtutor_backend", "Using built-in tutor config defaults.");
                TutorConfig::default()
            }
        };
        Self::with_config(config)
    }

    pub fn with_config(config: TutorConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
        }
    }

    fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.config.session_idle_secs)
    }

    /// Live session for a mutation. Refreshes its idle clock; an expired one
    /// is dropped and reported as unknown.
    fn live<'a>(&self, sessions: &'a mut Sessions, id: &str) -> Result<&'a mut Session, ApiError> {
        let expired = sessions.get(id).map(|s| s.expired(self.idle_ttl()));
        match expired {
            None => Err(ApiError::UnknownSession(id.to_string())),
            Some(true) => {
                sessions.remove(id);
                info!(target: "practice", session = %id, "Session expired");
                Err(ApiError::UnknownSession(id.to_string()))
            }
            Some(false) => {
                let session = sessions.get_mut(id).ok_or_else(|| ApiError::UnknownSession(id.to_string()))?;
                session.last_seen = Instant::now();
                Ok(session)
            }
        }
    }

    fn drop_idle(&self, sessions: &mut Sessions) -> usize {
        let ttl = self.idle_ttl();
        let before = sessions.len();
        sessions.retain(|_, s| !s.expired(ttl));
        before - sessions.len()
    }

    #[instrument(level = "info", skip(self))]
    pub async fn create_session(&self, topic: Topic, seed: Option<u64>) -> (String, ScoreCard) {
        let session = Session::new(topic, seed);
        let id = session.id.clone();
        let card = session.card;

        let mut sessions = self.sessions.write().await;
        self.drop_idle(&mut sessions);
        let cap = self.config.max_sessions.max(1);
        while sessions.len() >= cap {
            let Some(oldest) = sessions.values().min_by_key(|s| s.last_seen).map(|s| s.id.clone()) else {
                break;
            };
            sessions.remove(&oldest);
            warn!(target: "practice", session = %oldest, cap, "Session cap reached; evicted least recently used");
        }
        sessions.insert(id.clone(), session);
        info!(target: "practice", session = %id, ?topic, seeded = seed.is_some(), "Session created");
        (id, card)
    }

    /// Drop every idle session. Returns how many went.
    pub async fn sweep_idle(&self) -> usize {
        let dropped = self.drop_idle(&mut *self.sessions.write().await);
        if dropped > 0 {
            info!(target: "practice", dropped, "Idle sessions swept");
        }
        dropped
    }

    #[instrument(level = "info", skip(self), fields(session = %id))]
    pub async fn close_session(&self, id: &str) -> Result<(), ApiError> {
        match self.sessions.write().await.remove(id) {
            Some(_) => {
                info!(target: "practice", "Session closed");
                Ok(())
            }
            None => Err(ApiError::UnknownSession(id.to_string())),
        }
    }

    /// Serve the next problem. A running quiz takes precedence over `kind`.
    #[instrument(level = "info", skip(self), fields(session = %id))]
    pub async fn next_problem(&self, id: &str, kind: Option<ProblemKind>) -> Result<Served, ApiError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live(&mut sessions, id)?;

        if let Some(problem) = session.quiz.pop_front() {
            let remaining = session.quiz.len();
            session.current = Some(ActiveProblem { problem: problem.clone(), finished: false, from_quiz: true });
            info!(target: "practice", kind = ?problem.kind, remaining, "Quiz problem served");
            return Ok(Served { problem, quiz_remaining: Some(remaining) });
        }

        if let Some(kind) = kind {
            if kind.topic() != session.topic {
                return Err(ApiError::KindMismatch { kind, topic: session.topic });
            }
        }

        let history: Vec<String> = session.history.iter().cloned().collect();
        let tol = &self.config.tolerances;
        let problem = match kind {
            Some(kind) => generators::generate(kind, &mut session.rng, tol, &history),
            None => generators::generate_for_topic(session.topic, &mut session.rng, tol, &history),
        };
        session.remember(&problem.fingerprint, self.config.history_window);
        session.current = Some(ActiveProblem { problem: problem.clone(), finished: false, from_quiz: false });
        info!(target: "practice", kind = ?problem.kind, problem = %problem.id, "Practice problem served");
        Ok(Served { problem, quiz_remaining: None })
    }

    /// Check an answer against the problem on screen and update the card.
    ///
    /// A problem closes after its first scored attempt. An invalid entry under
    /// the retry policy, or a solved x with a wrong angle, leaves it open.
    #[instrument(level = "info", skip(self, answer), fields(session = %id, answer_len = answer.value.len()))]
    pub async fn submit_answer(&self, id: &str, answer: Answer<'_>) -> Result<(CheckResult, ScoreCard), ApiError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live(&mut sessions, id)?;
        let active = session.current.as_mut().ok_or(ApiError::NoActiveProblem)?;
        if active.finished {
            return Err(ApiError::AlreadyFinished);
        }

        let scoring = &self.config.scoring;
        let grading = Grading {
            increment: if active.from_quiz { scoring.quiz_increment } else { scoring.practice_increment },
            policy: self.config.invalid_input,
            messages: &self.config.messages,
        };
        let (result, card) = check(&active.problem, answer, session.card, &grading);
        active.finished = match result.verdict {
            Verdict::Correct | Verdict::Incorrect => true,
            Verdict::Partial => false,
            Verdict::Invalid => grading.policy == InvalidInputPolicy::Incorrect,
        };
        session.card = card;

        if result.verdict == Verdict::Invalid {
            warn!(target: "practice", kind = ?active.problem.kind, answer = %crate::util::trunc_for_log(answer.value, 64), "Unparseable answer");
        }
        info!(
            target: "practice",
            kind = ?active.problem.kind,
            verdict = ?result.verdict,
            score = card.score,
            streak = card.streak,
            "Answer checked"
        );
        Ok((result, card))
    }

    /// Queue a fresh quiz and reset the card. Returns the number queued.
    /// Lengths above `max_quiz_length` are refused.
    #[instrument(level = "info", skip(self), fields(session = %id))]
    pub async fn start_quiz(&self, id: &str, len: Option<usize>) -> Result<usize, ApiError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live(&mut sessions, id)?;
        let len = len.unwrap_or(self.config.quiz_length).max(1);
        let max = self.config.max_quiz_length;
        if len > max {
            return Err(ApiError::QuizTooLong { requested: len, max });
        }
        let problems = generators::quiz(session.topic, &mut session.rng, len, &self.config.tolerances);
        session.quiz = problems.into();
        session.current = None;
        session.card = ScoreCard::reset();
        info!(target: "practice", topic = ?session.topic, len, "Quiz started");
        Ok(len)
    }

    #[instrument(level = "debug", skip(self), fields(session = %id))]
    pub async fn hint(&self, id: &str) -> Result<String, ApiError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id).ok_or_else(|| ApiError::UnknownSession(id.to_string()))?;
        let active = session.current.as_ref().ok_or(ApiError::NoActiveProblem)?;
        Ok(active.problem.hint.clone())
    }

    #[instrument(level = "debug", skip(self), fields(session = %id))]
    pub async fn score(&self, id: &str) -> Result<ScoreCard, ApiError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id).ok_or_else(|| ApiError::UnknownSession(id.to_string()))?;
        Ok(session.card)
    }

    #[instrument(level = "info", skip(self), fields(session = %id))]
    pub async fn reset_score(&self, id: &str) -> Result<ScoreCard, ApiError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live(&mut sessions, id)?;
        session.card = ScoreCard::reset();
        Ok(session.card)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(TutorConfig::default())
    }
}
