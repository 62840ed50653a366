//! Scientific-notation exercises.
//!
//! Answers are built by shifting the decimal point on digit strings, so the
//! expected forms are exact whatever the magnitude.

use rand::Rng;

use crate::domain::{Expected, Problem, ProblemKind};
use crate::error::NotationError;
use crate::notation::{group_thousands, parse_scientific, parse_standard, pretty_scientific, Decimal};
use crate::seeds::{Direction, NotationWordProblem, NOTATION_WORD_PROBLEMS};

fn shift_hint(exponent: i32, direction: Direction) -> String {
  let places = exponent.unsigned_abs();
  let unit = if places == 1 { "place" } else { "places" };
  // Going to scientific form moves the point against the sign of the exponent.
  let left = match direction {
    Direction::ToScientific => exponent > 0,
    Direction::ToStandard => exponent < 0,
  };
  match exponent {
    0 => "The decimal point does not move.".to_string(),
    _ if left => format!("Move the decimal left {places} {unit}."),
    _ => format!("Move the decimal right {places} {unit}."),
  }
}

fn notation(canonical: String) -> Expected {
  Expected::Notation { accepted: vec![canonical.clone()], canonical }
}

pub(crate) fn scientific_problem(d: &Decimal) -> Problem {
  let standard = d.standard();
  let canonical = d.scientific();
  let exp = d.exponent();
  Problem::new(
    ProblemKind::ToScientific,
    format!("Write {} in scientific notation.", group_thousands(&standard)),
    notation(canonical.clone()),
    format!(
      "Move the decimal point {} places to get {}, which is between 1 and 10. The exponent is {exp}, so the answer is {}.",
      exp.unsigned_abs(),
      d.mantissa(),
      pretty_scientific(&canonical)
    ),
  )
  .with_param("standard", standard)
  .with_hint(shift_hint(exp, Direction::ToScientific))
  .with_fingerprint(format!("to_scientific:{}", exp.signum()))
}

pub(crate) fn standard_problem(d: &Decimal) -> Problem {
  let standard = d.standard();
  let canonical = d.scientific();
  let exp = d.exponent();
  let side = if exp < 0 { "left" } else { "right" };
  Problem::new(
    ProblemKind::ToStandard,
    format!("Write {} in standard form.", pretty_scientific(&canonical)),
    notation(standard.clone()),
    format!(
      "An exponent of {exp} moves the decimal point of {} {} places to the {side}: {}.",
      d.mantissa(),
      exp.unsigned_abs(),
      group_thousands(&standard)
    ),
  )
  .with_param("scientific", canonical)
  .with_param("exponent", i64::from(exp))
  .with_hint(shift_hint(exp, Direction::ToStandard))
  .with_fingerprint(format!("to_standard:{}", exp.signum()))
}

/// `"58,927"` -> a to-scientific exercise.
pub fn to_scientific_problem(standard: &str) -> Result<Problem, NotationError> {
  Ok(scientific_problem(&parse_standard(standard)?))
}

/// `"4.5x10^5"` -> a to-standard exercise.
pub fn to_standard_problem(scientific: &str) -> Result<Problem, NotationError> {
  Ok(standard_problem(&parse_scientific(scientific)?))
}

/// Either textual form of the quantity is accepted.
pub fn word_problem(wp: &NotationWordProblem) -> Problem {
  let (question, target, canonical) = match wp.direction {
    Direction::ToScientific => (group_thousands(wp.standard), "scientific notation", wp.scientific),
    Direction::ToStandard => (pretty_scientific(wp.scientific), "standard form", wp.standard),
  };
  let explanation = format!(
    "{} written in scientific notation is {}; in standard form it is {}.",
    question,
    pretty_scientific(wp.scientific),
    group_thousands(wp.standard)
  );
  Problem::new(
    ProblemKind::NotationWordProblem,
    format!("{}: {} Write {question} in {target}.", wp.context, wp.scenario),
    Expected::Notation {
      canonical: canonical.to_string(),
      accepted: vec![wp.scientific.to_string(), wp.standard.to_string()],
    },
    explanation,
  )
  .with_param("context", wp.context)
  .with_param("question", question)
  .with_hint(wp.hint)
  .with_fingerprint(format!("word:{}", wp.id))
}

/// One to four significant digits, never ending in zero, with an exponent in
/// 3..=12 or -12..=-2.
pub(crate) fn sample_decimal<R: Rng>(rng: &mut R) -> Decimal {
  loop {
    let extra = rng.gen_range(0..=3);
    let mut digits = rng.gen_range(1..=9u8).to_string();
    for i in 0..extra {
      let lo = if i + 1 == extra { 1 } else { 0 };
      digits.push(char::from(b'0' + rng.gen_range(lo..=9u8)));
    }
    let exponent = if rng.gen_bool(0.5) { rng.gen_range(3..=12) } else { rng.gen_range(-12..=-2) };
    if let Ok(d) = Decimal::new(false, &digits, exponent) {
      return d;
    }
  }
}

pub fn sample_to_scientific<R: Rng>(rng: &mut R) -> Problem {
  scientific_problem(&sample_decimal(rng))
}

pub fn sample_to_standard<R: Rng>(rng: &mut R) -> Problem {
  standard_problem(&sample_decimal(rng))
}

pub fn sample_word_problem<R: Rng>(rng: &mut R) -> Problem {
  word_problem(&NOTATION_WORD_PROBLEMS[rng.gen_range(0..NOTATION_WORD_PROBLEMS.len())])
}
