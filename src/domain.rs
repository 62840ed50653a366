//! Domain models used by the backend: topics, problem kinds, expected answers, and the problem itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::fmt_num;

/// Which practice app a session belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
  Angles,
  Pythagoras,
  RealNumbers,
  SciNotation,
  SurfaceArea,
}

impl Topic {
  pub const ALL: [Topic; 5] = [Topic::Angles, Topic::Pythagoras, Topic::RealNumbers, Topic::SciNotation, Topic::SurfaceArea];

  pub fn kinds(self) -> &'static [ProblemKind] {
    use ProblemKind::*;
    match self {
      Topic::Angles => &[AnglePairIdentify, AnglePairSolve, TriangleTheoremIdentify, TriangleSolve],
      Topic::Pythagoras => &[MissingHypotenuse, MissingLeg, Converse, Distance, RealWorld],
      Topic::RealNumbers => &[Classify, EstimateRoot, Order, Concept],
      Topic::SciNotation => &[ToScientific, ToStandard, NotationWordProblem],
      Topic::SurfaceArea => &[RectangularPrism, TriangularPrism, Cylinder],
    }
  }
}

/// Selects the formula or relationship that governs a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
  // Pythagoras
  MissingHypotenuse,
  MissingLeg,
  Converse,
  Distance,
  RealWorld,
  // Angles & triangles
  AnglePairIdentify,
  AnglePairSolve,
  TriangleTheoremIdentify,
  TriangleSolve,
  // Scientific notation
  ToScientific,
  ToStandard,
  NotationWordProblem,
  // Surface area
  RectangularPrism,
  TriangularPrism,
  Cylinder,
  // Real numbers
  Classify,
  EstimateRoot,
  Order,
  Concept,
}

impl ProblemKind {
  pub fn topic(self) -> Topic {
    use ProblemKind::*;
    match self {
      MissingHypotenuse | MissingLeg | Converse | Distance | RealWorld => Topic::Pythagoras,
      AnglePairIdentify | AnglePairSolve | TriangleTheoremIdentify | TriangleSolve => Topic::Angles,
      ToScientific | ToStandard | NotationWordProblem => Topic::SciNotation,
      RectangularPrism | TriangularPrism | Cylinder => Topic::SurfaceArea,
      Classify | EstimateRoot | Order | Concept => Topic::RealNumbers,
    }
  }
}

/// A sampled input value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
  Int(i64),
  Real(f64),
  Text(String),
  List(Vec<i64>),
}

impl From<i64> for ParamValue { fn from(v: i64) -> Self { ParamValue::Int(v) } }
impl From<f64> for ParamValue { fn from(v: f64) -> Self { ParamValue::Real(v) } }
impl From<&str> for ParamValue { fn from(v: &str) -> Self { ParamValue::Text(v.to_string()) } }
impl From<String> for ParamValue { fn from(v: String) -> Self { ParamValue::Text(v) } }
impl From<Vec<i64>> for ParamValue { fn from(v: Vec<i64>) -> Self { ParamValue::List(v) } }

/// Ground truth for a problem, one variant per checking path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expected {
  /// Accepted when `|answer - value| < tolerance`.
  Number {
    value: f64,
    tolerance: f64,
    #[serde(default)] unit: Option<String>,
  },
  /// Yes/no questions.
  Boolean { value: bool },
  /// Notation strings, compared after normalization against each accepted form.
  Notation { canonical: String, accepted: Vec<String> },
  /// Categorical answers with explicit aliases.
  Choice { answer: String, accepted: Vec<String>, options: Vec<String> },
  /// Solve for x, then give the angle it produces. x is checked first; an
  /// angle matching any entry of `angles` completes the answer.
  Algebra { x: f64, tolerance: f64, angles: Vec<f64>, angle_tolerance: f64 },
  /// Items listed in order. `options` is the shuffled display order.
  Sequence { order: Vec<String>, options: Vec<String> },
}

impl Expected {
  /// Human-readable form of the answer for feedback messages.
  pub fn display(&self) -> String {
    match self {
      Expected::Number { value, unit: Some(u), .. } => format!("{} {}", fmt_num(*value), u),
      Expected::Number { value, .. } => fmt_num(*value),
      Expected::Boolean { value } => if *value { "Yes".into() } else { "No".into() },
      Expected::Notation { canonical, .. } => canonical.clone(),
      Expected::Choice { answer, .. } => answer.clone(),
      Expected::Algebra { x, angles, .. } => match angles.first() {
        Some(angle) => format!("x = {}, angle = {}°", fmt_num(*x), fmt_num(*angle)),
        None => format!("x = {}", fmt_num(*x)),
      },
      Expected::Sequence { order, .. } => order.join(", "),
    }
  }

  /// Options to offer for multiple-choice style screens.
  pub fn options(&self) -> Vec<String> {
    match self {
      Expected::Boolean { .. } => vec!["Yes".into(), "No".into()],
      Expected::Choice { options, .. } | Expected::Sequence { options, .. } => options.clone(),
      _ => Vec::new(),
    }
  }

  /// Input fields the client should render.
  pub fn fields(&self) -> &'static [&'static str] {
    match self {
      Expected::Algebra { .. } => &["x", "angle"],
      _ => &["answer"],
    }
  }
}

/// One generated problem. Immutable once built; held by the session until replaced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
  pub id: String,
  pub topic: Topic,
  pub kind: ProblemKind,
  pub parameters: BTreeMap<String, ParamValue>,
  pub prompt: String,
  #[serde(default)] pub hint: String,
  pub expected: Expected,
  pub explanation: String,
  /// Scenario category used to keep successive problems distinct.
  #[serde(default)] pub fingerprint: String,
}

impl Problem {
  pub fn new(kind: ProblemKind, prompt: impl Into<String>, expected: Expected, explanation: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      topic: kind.topic(),
      kind,
      parameters: BTreeMap::new(),
      prompt: prompt.into(),
      hint: String::new(),
      expected,
      explanation: explanation.into(),
      fingerprint: String::new(),
    }
  }

  pub fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
    self.parameters.insert(key.to_string(), value.into());
    self
  }

  pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hint = hint.into();
    self
  }

  pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
    self.fingerprint = fingerprint.into();
    self
  }

  pub fn int(&self, key: &str) -> Option<i64> {
    match self.parameters.get(key) {
      Some(ParamValue::Int(v)) => Some(*v),
      _ => None,
    }
  }

  /// Numeric parameter as f64 (integers widen).
  pub fn real(&self, key: &str) -> Option<f64> {
    match self.parameters.get(key) {
      Some(ParamValue::Int(v)) => Some(*v as f64),
      Some(ParamValue::Real(v)) => Some(*v),
      _ => None,
    }
  }

  pub fn text(&self, key: &str) -> Option<&str> {
    match self.parameters.get(key) {
      Some(ParamValue::Text(v)) => Some(v.as_str()),
      _ => None,
    }
  }

  pub fn list(&self, key: &str) -> Option<&[i64]> {
    match self.parameters.get(key) {
      Some(ParamValue::List(v)) => Some(v.as_slice()),
      _ => None,
    }
  }
}
