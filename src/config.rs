//! Loading tutor configuration (tolerances, scoring, feedback messages) from TOML.
//!
//! See `TutorConfig` for the expected schema. Every field has a default, so an
//! empty file (or no file at all) yields the stock behavior.

use serde::Deserialize;
use tracing::{error, info};

use crate::checker::InvalidInputPolicy;
use crate::domain::ProblemKind;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
  pub tolerances: Tolerances,
  pub scoring: Scoring,
  pub messages: Messages,
  /// How many recent scenario fingerprints a session avoids repeating.
  pub history_window: usize,
  pub quiz_length: usize,
  /// Upper bound on a client-requested quiz length.
  pub max_quiz_length: usize,
  pub invalid_input: InvalidInputPolicy,
  /// Sessions untouched for this long are dropped.
  pub session_idle_secs: u64,
  /// Live sessions kept at most; the least recently used goes first.
  pub max_sessions: usize,
}

impl Default for TutorConfig {
  fn default() -> Self {
    Self {
      tolerances: Tolerances::default(),
      scoring: Scoring::default(),
      messages: Messages::default(),
      history_window: 3,
      quiz_length: 12,
      max_quiz_length: 50,
      invalid_input: InvalidInputPolicy::default(),
      session_idle_secs: 60 * 60,
      max_sessions: 10_000,
    }
  }
}

/// Acceptance epsilon per problem kind. Numeric answers are correct when
/// `|answer - expected| < tolerance`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Tolerances {
  pub missing_side: f64,
  pub distance: f64,
  pub real_world: f64,
  pub angle_solve: f64,
  pub triangle_solve: f64,
  /// The angle produced by a solved x.
  pub angle_measure: f64,
  pub surface_area: f64,
  pub root_estimate: f64,
}

impl Default for Tolerances {
  fn default() -> Self {
    Self {
      missing_side: 0.15,
      distance: 0.15,
      real_world: 0.5,
      angle_solve: 0.5,
      triangle_solve: 0.5,
      angle_measure: 1.0,
      surface_area: 0.5,
      // Half a tenth: only the correctly rounded tenth is accepted.
      root_estimate: 0.05,
    }
  }
}

impl Tolerances {
  /// Tolerance for a numeric kind; `None` for kinds checked by string or choice.
  pub fn for_kind(&self, kind: ProblemKind) -> Option<f64> {
    use ProblemKind::*;
    match kind {
      MissingHypotenuse | MissingLeg => Some(self.missing_side),
      Distance => Some(self.distance),
      RealWorld => Some(self.real_world),
      AnglePairSolve => Some(self.angle_solve),
      TriangleSolve => Some(self.triangle_solve),
      RectangularPrism | TriangularPrism | Cylinder => Some(self.surface_area),
      EstimateRoot => Some(self.root_estimate),
      Converse | AnglePairIdentify | TriangleTheoremIdentify | ToScientific | ToStandard
      | NotationWordProblem | Classify | Order | Concept => None,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scoring {
  pub practice_increment: u32,
  pub quiz_increment: u32,
}

impl Default for Scoring {
  fn default() -> Self {
    Self { practice_increment: 10, quiz_increment: 5 }
  }
}

/// Feedback templates. `{expected}` is replaced with the displayed answer.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
  pub correct: String,
  pub incorrect: String,
  pub invalid_number: String,
  pub empty: String,
  /// x was right but the angle was not; the problem stays open.
  pub partial: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      correct: "Correct! Great job.".into(),
      incorrect: "Not quite. The answer was {expected}.".into(),
      invalid_number: "Please enter a valid number.".into(),
      empty: "Please enter an answer first.".into(),
      partial: "x is correct, but the angle measure is wrong. Plug x back into the expression!".into(),
    }
  }
}

impl TutorConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str::<TutorConfig>(s)
  }
}

/// Attempt to load `TutorConfig` from TUTOR_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_tutor_config_from_env() -> Option<TutorConfig> {
  let path = std::env::var("TUTOR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match TutorConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "mathtutor_backend", %path, "Loaded tutor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "mathtutor_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "mathtutor_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
