//! Pythagorean theorem problems: missing sides, the converse, distance on a grid
//! and word problems.
//!
//! Each kind has a builder taking concrete parameters and a sampler that draws
//! them from the rng. Side answers are rounded to one decimal place.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Tolerances;
use crate::domain::{Expected, Problem, ProblemKind};
use crate::seeds::{RealWorldScenario, Unknown, REAL_WORLD_SCENARIOS, RIGHT_TRIPLES};
use crate::util::{fill_template, round_to};

/// Slack for the floating-point comparison in the converse test.
pub const RIGHT_EPSILON: f64 = 1e-6;

/// Sort the sides so the largest is the candidate hypotenuse, then test
/// `a² + b² = c²`.
pub fn is_right_triangle(sides: [f64; 3]) -> bool {
  let mut s = sides;
  s.sort_by(|a, b| a.total_cmp(b));
  (s[0] * s[0] + s[1] * s[1] - s[2] * s[2]).abs() < RIGHT_EPSILON
}

fn number(value: f64, tolerance: f64) -> Expected {
  Expected::Number { value, tolerance, unit: None }
}

pub fn hypotenuse(a: i64, b: i64, tolerance: f64) -> Problem {
  let sum = a * a + b * b;
  let c = round_to((sum as f64).sqrt(), 1);
  let explanation = format!(
    "Using a² + b² = c²: {a}² + {b}² = c². So {} + {} = {sum}. c = √{sum} ≈ {c:.1}.",
    a * a,
    b * b
  );
  Problem::new(
    ProblemKind::MissingHypotenuse,
    format!("A right triangle has legs a = {a} and b = {b}. Find the length of the hypotenuse c. Round to the nearest tenth if necessary."),
    number(c, tolerance),
    explanation,
  )
  .with_param("a", a)
  .with_param("b", b)
  .with_hint("Square both legs, add them, then take the square root.")
  .with_fingerprint(format!("hypotenuse:{}-{}", a.min(b), a.max(b)))
}

/// `c` must be longer than `a`.
pub fn missing_leg(a: i64, c: i64, tolerance: f64) -> Problem {
  let diff = c * c - a * a;
  let b = round_to((diff as f64).sqrt(), 1);
  let explanation = format!(
    "Using a² + b² = c²: {a}² + b² = {c}². So {} + b² = {}. b² = {diff}. b = √{diff} ≈ {b:.1}.",
    a * a,
    c * c
  );
  Problem::new(
    ProblemKind::MissingLeg,
    format!("A right triangle has a leg a = {a} and hypotenuse c = {c}. Find the length of the missing leg b. Round to the nearest tenth if necessary."),
    number(b, tolerance),
    explanation,
  )
  .with_param("a", a)
  .with_param("c", c)
  .with_hint("Subtract the square of the known leg from the square of the hypotenuse.")
  .with_fingerprint(format!("leg:{a}-{c}"))
}

/// Sides are shown in the given order; the check sorts them.
pub fn converse(sides: [i64; 3]) -> Problem {
  let right = is_right_triangle(sides.map(|s| s as f64));
  let mut sorted = sides;
  sorted.sort_unstable();
  let [a, b, c] = sorted;
  let (lhs, rhs) = (a * a + b * b, c * c);
  let explanation = if right {
    format!("{a}² + {b}² = {} + {} = {lhs}. {c}² = {rhs}. Since {lhs} = {rhs}, it is a right triangle.", a * a, b * b)
  } else {
    format!("{a}² + {b}² = {} + {} = {lhs}. {c}² = {rhs}. Since {lhs} ≠ {rhs}, it is not a right triangle.", a * a, b * b)
  };
  let [x, y, z] = sides;
  Problem::new(
    ProblemKind::Converse,
    format!("Does a triangle with side lengths {x}, {y}, and {z} form a right triangle? Answer yes or no."),
    Expected::Boolean { value: right },
    explanation,
  )
  .with_param("sides", sides.to_vec())
  .with_hint("Treat the longest side as c and check whether a² + b² equals c².")
  .with_fingerprint(format!("converse:{a}-{b}-{c}"))
}

pub fn distance(p1: (i64, i64), p2: (i64, i64), tolerance: f64) -> Problem {
  let (x1, y1) = p1;
  let (x2, y2) = p2;
  let leg_a = (x2 - x1).abs();
  let leg_b = (y2 - y1).abs();
  let sum = leg_a * leg_a + leg_b * leg_b;
  let d = round_to((sum as f64).sqrt(), 1);
  let explanation = format!(
    "1. Horizontal leg: |{x2} - {x1}| = {leg_a}. 2. Vertical leg: |{y2} - {y1}| = {leg_b}. \
     3. Use a² + b² = c²: {leg_a}² + {leg_b}² = {} + {} = {sum}. 4. Distance = √{sum} ≈ {d:.1}.",
    leg_a * leg_a,
    leg_b * leg_b
  );
  Problem::new(
    ProblemKind::Distance,
    format!("Find the distance between points ({x1}, {y1}) and ({x2}, {y2}) by constructing a right triangle. Round to the nearest tenth."),
    number(d, tolerance),
    explanation,
  )
  .with_param("x1", x1)
  .with_param("y1", y1)
  .with_param("x2", x2)
  .with_param("y2", y2)
  .with_hint("Draw the horizontal and vertical legs, then use the Pythagorean theorem.")
  .with_fingerprint(format!("distance:{}-{}", leg_a.min(leg_b), leg_a.max(leg_b)))
}

pub fn real_world(scenario: &RealWorldScenario, first: i64, second: i64, tolerance: f64) -> Problem {
  let (value, work) = match scenario.unknown {
    Unknown::Hypotenuse => {
      let sum = first * first + second * second;
      (
        (sum as f64).sqrt(),
        format!("{first}² + {second}² = {} + {} = {sum}. √{sum}", first * first, second * second),
      )
    }
    Unknown::Leg => {
      let diff = first * first - second * second;
      (
        (diff as f64).sqrt(),
        format!("{first}² - {second}² = {} - {} = {diff}. √{diff}", first * first, second * second),
      )
    }
  };
  let answer = round_to(value, 1);
  let prompt = fill_template(scenario.prompt, &[("first", &first.to_string()), ("second", &second.to_string())]);
  Problem::new(
    ProblemKind::RealWorld,
    format!("{}: {prompt} Round to the nearest tenth.", scenario.title),
    Expected::Number { value: answer, tolerance, unit: Some(scenario.unit.to_string()) },
    format!("{work} ≈ {answer:.1} {}.", scenario.unit),
  )
  .with_param("scenario", scenario.id)
  .with_param("first", first)
  .with_param("second", second)
  .with_hint(match scenario.unknown {
    Unknown::Hypotenuse => "The unknown is the hypotenuse: add the squares of the two legs.",
    Unknown::Leg => "The ladder is the hypotenuse: subtract the square of the known leg.",
  })
  .with_fingerprint(format!("real_world:{}", scenario.id))
}

pub fn sample_hypotenuse<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  hypotenuse(rng.gen_range(3..=14), rng.gen_range(3..=14), tol.missing_side)
}

pub fn sample_missing_leg<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  let c = rng.gen_range(10..=24);
  let a = rng.gen_range(3..=c - 3);
  missing_leg(a, c, tol.missing_side)
}

pub fn sample_converse<R: Rng>(rng: &mut R) -> Problem {
  let mut sides = if rng.gen_bool(0.5) {
    let triple = RIGHT_TRIPLES[rng.gen_range(0..RIGHT_TRIPLES.len())];
    let k = if triple[2] <= 13 { rng.gen_range(1..=3) } else { 1 };
    triple.map(|s| s * k)
  } else {
    non_right_sides(rng)
  };
  sides.shuffle(rng);
  converse(sides)
}

/// A valid triangle whose squares do not satisfy the identity.
fn non_right_sides<R: Rng>(rng: &mut R) -> [i64; 3] {
  loop {
    let a: i64 = rng.gen_range(5..=14);
    let b: i64 = rng.gen_range(5..=14);
    let mut c = a.max(b) + rng.gen_range(0..=9);
    if a * a + b * b == c * c {
      c += 1;
    }
    if a + b > c {
      return [a, b, c];
    }
  }
}

pub fn sample_distance<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  let x1: i64 = rng.gen_range(1..=7);
  let y1: i64 = rng.gen_range(1..=7);
  let mut x2: i64 = rng.gen_range(1..=7);
  let mut y2: i64 = rng.gen_range(1..=7);
  // Both legs at least 2 so the triangle is visible on the grid.
  while (x1 - x2).abs() < 2 {
    x2 = rng.gen_range(1..=7);
  }
  while (y1 - y2).abs() < 2 {
    y2 = rng.gen_range(1..=7);
  }
  distance((x1, y1), (x2, y2), tol.distance)
}

pub fn sample_real_world<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  let scenario = &REAL_WORLD_SCENARIOS[rng.gen_range(0..REAL_WORLD_SCENARIOS.len())];
  let first = rng.gen_range(scenario.first.0..=scenario.first.1);
  let second = rng.gen_range(scenario.second.0..=scenario.second.1);
  real_world(scenario, first, second, tol.real_world)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn value(p: &Problem) -> f64 {
    match p.expected {
      Expected::Number { value, .. } => value,
      _ => panic!("not numeric: {:?}", p.expected),
    }
  }

  #[test]
  fn legs_three_and_four_give_five() {
    let p = hypotenuse(3, 4, 0.15);
    assert_eq!(value(&p), 5.0);
    assert_eq!(p.explanation, "Using a² + b² = c²: 3² + 4² = c². So 9 + 16 = 25. c = √25 ≈ 5.0.");
    assert_eq!(p.int("a"), Some(3));
  }

  #[test]
  fn missing_leg_rounds_to_tenths() {
    let p = missing_leg(5, 13, 0.15);
    assert_eq!(value(&p), 12.0);
    let p = missing_leg(7, 20, 0.15);
    assert_eq!(value(&p), 18.7);
    assert!(p.explanation.contains("b² = 351"));
  }

  #[test]
  fn converse_examples() {
    assert_eq!(converse([3, 4, 5]).expected, Expected::Boolean { value: true });
    assert_eq!(converse([13, 5, 12]).expected, Expected::Boolean { value: true });
    assert_eq!(converse([5, 10, 12]).expected, Expected::Boolean { value: false });
    assert!(converse([5, 10, 12]).explanation.contains("125 ≠ 144"));
  }

  #[test]
  fn sampled_non_right_triangles_are_valid_and_not_right() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..500 {
      let [a, b, c] = non_right_sides(&mut rng);
      assert!(a + b > c);
      assert!(!is_right_triangle([a as f64, b as f64, c as f64]));
    }
  }

  #[test]
  fn distance_legs_are_at_least_two() {
    let tol = Tolerances::default();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
      let p = sample_distance(&mut rng, &tol);
      let dx = (p.int("x2").unwrap() - p.int("x1").unwrap()).abs();
      let dy = (p.int("y2").unwrap() - p.int("y1").unwrap()).abs();
      assert!(dx >= 2 && dy >= 2, "{dx} {dy}");
      for key in ["x1", "y1", "x2", "y2"] {
        assert!((1..=7).contains(&p.int(key).unwrap()), "{key} off the grid");
      }
    }
  }

  #[test]
  fn ladder_subtracts_squares() {
    let ladder = REAL_WORLD_SCENARIOS.iter().find(|s| s.id == "ladder").unwrap();
    let p = real_world(ladder, 10, 6, 0.5);
    assert_eq!(value(&p), 8.0);
    assert_eq!(p.expected.display(), "8 feet");
    assert_eq!(p.fingerprint, "real_world:ladder");
    assert!(p.prompt.contains("A 10ft ladder"));
  }
}
