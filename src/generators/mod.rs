//! Problem generators.
//!
//! Every generator draws from an explicit `Rng`, so a seeded source reproduces
//! the same problems (ids included). Samplers resample on degenerate draws and
//! never return a problem with a non-finite answer.

pub mod angles;
pub mod pythagoras;
pub mod real_numbers;
pub mod sci_notation;
pub mod surface_area;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Builder;

use crate::config::Tolerances;
use crate::domain::{Problem, ProblemKind, Topic};

/// Resample budget when the draw repeats a recent fingerprint.
const MAX_RESAMPLES: usize = 16;

fn draw<R: Rng>(kind: ProblemKind, rng: &mut R, tol: &Tolerances) -> Problem {
  use ProblemKind::*;
  match kind {
    MissingHypotenuse => pythagoras::sample_hypotenuse(rng, tol),
    MissingLeg => pythagoras::sample_missing_leg(rng, tol),
    Converse => pythagoras::sample_converse(rng),
    Distance => pythagoras::sample_distance(rng, tol),
    RealWorld => pythagoras::sample_real_world(rng, tol),
    AnglePairIdentify => angles::sample_identify_pair(rng),
    AnglePairSolve => angles::sample_solve_pair(rng, tol),
    TriangleTheoremIdentify => angles::sample_identify_theorem(rng),
    TriangleSolve => angles::sample_solve_triangle(rng, tol),
    ToScientific => sci_notation::sample_to_scientific(rng),
    ToStandard => sci_notation::sample_to_standard(rng),
    NotationWordProblem => sci_notation::sample_word_problem(rng),
    RectangularPrism | TriangularPrism | Cylinder => surface_area::sample(kind, rng, tol),
    Classify => real_numbers::sample_classify(rng),
    EstimateRoot => real_numbers::sample_estimate_root(rng, tol),
    Order => real_numbers::sample_order(rng),
    Concept => real_numbers::sample_concept(rng),
  }
}

/// Best effort: keeps drawing while the fingerprint is in `history`, up to
/// `MAX_RESAMPLES` extra draws, then returns the last one.
fn fresh<R: Rng>(rng: &mut R, history: &[String], mut draw: impl FnMut(&mut R) -> Problem) -> Problem {
  let mut problem = draw(rng);
  let mut tries = 0;
  while tries < MAX_RESAMPLES && history.contains(&problem.fingerprint) {
    problem = draw(rng);
    tries += 1;
  }
  if tries > 0 {
    debug!(target: "practice", fingerprint = %problem.fingerprint, tries, "Resampled to avoid a recent scenario");
  }
  problem
}

/// Ids come from the same source so a seed reproduces them.
fn stamp<R: Rng>(mut problem: Problem, rng: &mut R) -> Problem {
  problem.id = Builder::from_random_bytes(rng.gen()).into_uuid().to_string();
  problem
}

pub fn generate<R: Rng>(kind: ProblemKind, rng: &mut R, tol: &Tolerances, history: &[String]) -> Problem {
  let problem = fresh(rng, history, |rng| draw(kind, rng, tol));
  stamp(problem, rng)
}

/// Picks a kind from the topic uniformly, then generates it.
pub fn generate_for_topic<R: Rng>(topic: Topic, rng: &mut R, tol: &Tolerances, history: &[String]) -> Problem {
  let kinds = topic.kinds();
  let problem = fresh(rng, history, |rng| {
    let kind = kinds[rng.gen_range(0..kinds.len())];
    draw(kind, rng, tol)
  });
  stamp(problem, rng)
}

/// A mixed quiz: the topic's kinds in rotation, then shuffled. Each problem
/// avoids the fingerprints of the ones before it where it can.
pub fn quiz<R: Rng>(topic: Topic, rng: &mut R, len: usize, tol: &Tolerances) -> Vec<Problem> {
  let kinds = topic.kinds();
  let mut seen: Vec<String> = Vec::with_capacity(len);
  let mut problems: Vec<Problem> = Vec::with_capacity(len);
  for kind in kinds.iter().cycle().take(len) {
    let p = generate(*kind, rng, tol, &seen);
    seen.push(p.fingerprint.clone());
    problems.push(p);
  }
  problems.shuffle(rng);
  problems
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Expected;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn same_seed_same_problems() {
    let tol = Tolerances::default();
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    for topic in Topic::ALL {
      let pa = generate_for_topic(topic, &mut a, &tol, &[]);
      let pb = generate_for_topic(topic, &mut b, &tol, &[]);
      assert_eq!(pa.id, pb.id);
      assert_eq!(pa.prompt, pb.prompt);
      assert_eq!(pa.expected, pb.expected);
    }
  }

  #[test]
  fn every_kind_generates_a_finite_answer() {
    let tol = Tolerances::default();
    let mut rng = StdRng::seed_from_u64(7);
    for topic in Topic::ALL {
      for &kind in topic.kinds() {
        for _ in 0..50 {
          let p = generate(kind, &mut rng, &tol, &[]);
          assert_eq!(p.kind, kind);
          assert_eq!(p.topic, topic);
          assert!(!p.prompt.is_empty() && !p.explanation.is_empty() && !p.fingerprint.is_empty());
          match p.expected {
            Expected::Number { value, tolerance, .. } | Expected::Algebra { x: value, tolerance, .. } => {
              assert!(value.is_finite(), "{kind:?}: {}", p.prompt);
              assert_eq!(Some(tolerance), tol.for_kind(kind));
            }
            _ => assert_eq!(tol.for_kind(kind), None, "{kind:?}"),
          }
        }
      }
    }
  }

  #[test]
  fn history_excludes_recent_fingerprints() {
    let tol = Tolerances::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut last = generate(ProblemKind::RealWorld, &mut rng, &tol, &[]).fingerprint;
    for _ in 0..50 {
      let p = generate(ProblemKind::RealWorld, &mut rng, &tol, &[last.clone()]);
      assert_ne!(p.fingerprint, last);
      last = p.fingerprint;
    }
  }

  #[test]
  fn quiz_covers_every_kind() {
    let tol = Tolerances::default();
    let mut rng = StdRng::seed_from_u64(12);
    let problems = quiz(Topic::Pythagoras, &mut rng, 10, &tol);
    assert_eq!(problems.len(), 10);
    for kind in Topic::Pythagoras.kinds() {
      assert_eq!(problems.iter().filter(|p| p.kind == *kind).count(), 2, "{kind:?}");
    }
    let mut ids: Vec<_> = problems.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
  }
}
