//! Angle problems: naming transversal pairs, solving linear angle expressions,
//! triangle theorems.
//!
//! Pairs always come from `relationships::named_pairs`, so a generated
//! question can never disagree with the lookup table.

use rand::Rng;

use crate::config::Tolerances;
use crate::domain::{Expected, Problem, ProblemKind};
use crate::relationships::{named_pairs, Classification, Relationship, TransversalAngle};
use crate::util::fmt_num;

pub const LAYOUTS: [&str; 3] = ["horizontal", "vertical", "diagonal"];
pub const TRIANGLE_LAYOUTS: [&str; 3] = ["standard", "right", "obtuse"];

fn pair_hint(rel: &Relationship) -> &'static str {
  match rel.name {
    "Corresponding Angles" => "Think of sliding the intersection along the transversal. They match position.",
    "Alternate Interior Angles" => "They are 'Inside' the parallel lines, on opposite sides of the transversal (Z pattern).",
    "Alternate Exterior Angles" => "They are 'Outside' the parallel lines, on opposite sides of the transversal.",
    "Same-Side Interior Angles" => "They are 'Inside' the parallel lines, on the same side. They face each other.",
    "Vertical Angles" => "They share a vertex and are opposite each other.",
    "Linear Pair" => "They are neighbors on a straight line. Together they make a semi-circle.",
    _ => "Review the position of the angles relative to the parallel lines.",
  }
}

/// "Corresponding Angles" is also accepted as "Corresponding".
fn aliases(name: &str) -> Vec<String> {
  let mut out = vec![name.to_string()];
  if let Some(short) = name.strip_suffix(" Angles") {
    out.push(short.to_string());
  }
  out
}

pub fn identify_pair(rel: Relationship, pair: (TransversalAngle, TransversalAngle), layout: &str) -> Problem {
  let (a, b) = pair;
  let options: Vec<String> = named_pairs().map(|(r, _)| r.name.to_string()).collect();
  Problem::new(
    ProblemKind::AnglePairIdentify,
    format!("Angles {a} and {b} are highlighted where a transversal crosses two parallel lines. Name the relationship."),
    Expected::Choice { answer: rel.name.to_string(), accepted: aliases(rel.name), options },
    format!("Angles {a} and {b} are {}. {}", rel.name, rel.description),
  )
  .with_param("pair", vec![i64::from(a.get()), i64::from(b.get())])
  .with_param("layout", layout)
  .with_hint(pair_hint(&rel))
  .with_fingerprint(format!("pair:{}", rel.name))
}

/// `m·x ± b` with the sign folded into the operator.
pub fn linear_expr(m: i64, b: i64) -> String {
  match b {
    0 => format!("{m}x"),
    b if b > 0 => format!("{m}x + {b}"),
    b => format!("{m}x - {}", -b),
  }
}

/// Solve `m1·x + b1 (op) m2·x + b2` for x, then ask for the angle. Congruent
/// pairs are equal, supplementary pairs add to 180 and either of their angles
/// is accepted. `None` when the x terms cancel out.
pub fn solve_pair(
  rel: Relationship,
  pair: (TransversalAngle, TransversalAngle),
  (m1, b1): (i64, i64),
  (m2, b2): (i64, i64),
  tol: &Tolerances,
) -> Option<Problem> {
  let (a, b) = pair;
  let (e1, e2) = (linear_expr(m1, b1), linear_expr(m2, b2));
  let supplementary = rel.classification == Classification::Supplementary;
  let (coef, rhs) = if supplementary { (m1 + m2, 180 - b1 - b2) } else { (m1 - m2, b2 - b1) };
  if coef == 0 {
    return None;
  }
  let x = rhs as f64 / coef as f64;
  let (steps, equation) = if supplementary {
    (
      format!(
        "Since they are {}, they add up to 180°. ({e1}) + ({e2}) = 180. {coef}x + {} = 180. {coef}x = {rhs}. x = {}.",
        rel.name,
        b1 + b2,
        fmt_num(x)
      ),
      "Angle 1 + Angle 2 = 180",
    )
  } else {
    (
      format!("Since they are {}, they are equal. {e1} = {e2}. {coef}x = {rhs}. x = {}.", rel.name, fmt_num(x)),
      "Angle 1 = Angle 2",
    )
  };
  let angle1 = m1 as f64 * x + b1 as f64;
  let angle2 = m2 as f64 * x + b2 as f64;
  let explanation = format!(
    "{steps} Angle {a} = {}°, angle {b} = {}°.",
    fmt_num(angle1),
    fmt_num(angle2)
  );
  let (hint, ask, angles) = if supplementary {
    (
      format!("Since these are {}, they add up to 180°. Equation: {equation}", rel.name),
      "either angle measure",
      vec![angle1, angle2],
    )
  } else {
    (
      format!("Since these are {}, they are EQUAL. Equation: {equation}", rel.name),
      "the angle measure",
      vec![angle1],
    )
  };
  Some(
    Problem::new(
      ProblemKind::AnglePairSolve,
      format!("Angle {a} measures ({e1})° and angle {b} measures ({e2})°. The lines are parallel. Solve for x, then find {ask}."),
      Expected::Algebra { x, tolerance: tol.angle_solve, angles, angle_tolerance: tol.angle_measure },
      explanation,
    )
    .with_param("pair", vec![i64::from(a.get()), i64::from(b.get())])
    .with_param("relationship", rel.name)
    .with_param("expr1", e1)
    .with_param("expr2", e2)
    .with_hint(hint)
    .with_fingerprint(format!("pair_solve:{}", rel.name)),
  )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theorem {
  pub name: &'static str,
  pub angles: &'static [&'static str],
  pub description: &'static str,
  pub hint: &'static str,
}

pub const THEOREMS: [Theorem; 4] = [
  Theorem {
    name: "Triangle Sum Theorem",
    angles: &["A", "B", "C"],
    description: "The sum of the measures of the interior angles of a triangle is always 180°.",
    hint: "Look at all three angles inside the triangle. What do they add up to?",
  },
  Theorem {
    name: "Exterior Angle Theorem",
    angles: &["A", "B", "ExtC"],
    description: "The measure of an exterior angle is equal to the sum of the measures of its remote interior angles.",
    hint: "Relates the outside angle to the two angles farthest away inside.",
  },
  Theorem {
    name: "Linear Pair",
    angles: &["C", "ExtC"],
    description: "Two adjacent angles that form a straight line add up to 180°.",
    hint: "These two angles sit next to each other on a straight line.",
  },
  Theorem {
    name: "Base Angles Theorem",
    angles: &["B", "C"],
    description: "If two sides of a triangle are congruent, then the angles opposite those sides are congruent.",
    hint: "Look at the two bottom angles. In an isosceles triangle, they are equal.",
  },
];

/// Base angles only read correctly on the isosceles drawing, so that theorem
/// forces the standard layout.
pub fn identify_theorem(theorem: &Theorem, layout: &str) -> Problem {
  let layout = if theorem.name == "Base Angles Theorem" { TRIANGLE_LAYOUTS[0] } else { layout };
  let accepted = {
    let mut v = vec![theorem.name.to_string()];
    if let Some(short) = theorem.name.strip_suffix(" Theorem") {
      v.push(short.to_string());
    }
    v
  };
  let options = THEOREMS.iter().map(|t| t.name.to_string()).collect();
  Problem::new(
    ProblemKind::TriangleTheoremIdentify,
    format!("Angles {} are highlighted. Which theorem or concept relates them?", theorem.angles.join(", ")),
    Expected::Choice { answer: theorem.name.to_string(), accepted, options },
    format!("This represents the {}. {}", theorem.name, theorem.description),
  )
  .with_param("angles", theorem.angles.join(","))
  .with_param("layout", layout)
  .with_hint(theorem.hint)
  .with_fingerprint(format!("theorem:{}", theorem.name))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriangleSetup {
  /// `A = m·x + b`, `B` given, `C` given; the three sum to 180.
  Sum { m: i64, b: i64, angle_b: i64 },
  /// `A = m·x + b`, `B` given, exterior angle at C given.
  Exterior { m: i64, b: i64, angle_b: i64 },
  /// Base angle `B = m·x + b` equals base angle `C`.
  Isosceles { m: i64, b: i64 },
}

/// Builds a triangle problem around a known integer `x`. Returns `None`
/// when a derived angle is not positive or the angles cannot form a triangle.
pub fn solve_triangle(x: i64, setup: TriangleSetup, tol: &Tolerances) -> Option<Problem> {
  let (prompt, explanation, angle, name, hint) = match setup {
    TriangleSetup::Sum { m, b, angle_b } => {
      let angle_a = m * x + b;
      let angle_c = 180 - angle_a - angle_b;
      if angle_a <= 0 || angle_c <= 0 {
        return None;
      }
      let e = linear_expr(m, b);
      (
        format!("In triangle ABC, angle A = ({e})°, angle B = {angle_b}° and angle C = {angle_c}°. Solve for x, then find angle A."),
        format!(
          "A + B + C = 180. ({e}) + {angle_b} + {angle_c} = 180. {m}x + {} = 180. {m}x = {}. x = {x}. Angle A = {angle_a}°.",
          b + angle_b + angle_c,
          180 - b - angle_b - angle_c
        ),
        angle_a,
        "sum",
        "Add all three angles and set equal to 180.",
      )
    }
    TriangleSetup::Exterior { m, b, angle_b } => {
      let angle_a = m * x + b;
      let ext = angle_a + angle_b;
      if angle_a <= 0 || ext >= 180 {
        return None;
      }
      let e = linear_expr(m, b);
      (
        format!("In triangle ABC, angle A = ({e})° and angle B = {angle_b}°. The exterior angle at C measures {ext}°. Solve for x, then find angle A."),
        format!(
          "Exterior angle = A + B. {ext} = ({e}) + {angle_b}. {m}x = {ext} - {} = {}. x = {x}. Angle A = {angle_a}°.",
          b + angle_b,
          ext - b - angle_b
        ),
        angle_a,
        "exterior",
        "The Exterior angle equals the sum of the two remote interior angles.",
      )
    }
    TriangleSetup::Isosceles { m, b } => {
      let base = m * x + b;
      if base <= 0 || base >= 90 {
        return None;
      }
      let e = linear_expr(m, b);
      (
        format!("Triangle ABC is isosceles with base angles B = ({e})° and C = {base}°. Solve for x, then find angle B."),
        format!("Base angles are equal. {e} = {base}. {m}x = {}. x = {x}. Angle B = {base}°.", base - b),
        base,
        "isosceles",
        "The two base angles are equal. Set them equal to each other.",
      )
    }
  };
  Some(
    Problem::new(
      ProblemKind::TriangleSolve,
      prompt,
      Expected::Algebra {
        x: x as f64,
        tolerance: tol.triangle_solve,
        angles: vec![angle as f64],
        angle_tolerance: tol.angle_measure,
      },
      explanation,
    )
    .with_param("setup", name)
    .with_hint(hint)
    .with_fingerprint(format!("triangle:{name}")),
  )
}

fn pick_pair<R: Rng>(rng: &mut R) -> (Relationship, (TransversalAngle, TransversalAngle)) {
  let table: Vec<_> = named_pairs().collect();
  let (rel, pairs) = table[rng.gen_range(0..table.len())];
  (rel, pairs[rng.gen_range(0..pairs.len())])
}

pub fn sample_identify_pair<R: Rng>(rng: &mut R) -> Problem {
  let (rel, pair) = pick_pair(rng);
  identify_pair(rel, pair, LAYOUTS[rng.gen_range(0..LAYOUTS.len())])
}

pub fn sample_solve_pair<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  loop {
    let (rel, pair) = pick_pair(rng);
    let x: i64 = rng.gen_range(5..=19);
    let angle1: i64 = rng.gen_range(50..=129);
    let m1: i64 = rng.gen_range(2..=6);
    let m2: i64 = rng.gen_range(2..=6);
    let (first, second) = match rel.classification {
      Classification::Supplementary => ((m1, angle1 - m1 * x), (m2, 180 - angle1 - m2 * x)),
      _ => ((m1, angle1 - m1 * x), (m2, angle1 - m2 * x)),
    };
    if let Some(p) = solve_pair(rel, pair, first, second, tol) {
      return p.with_param("layout", LAYOUTS[rng.gen_range(0..LAYOUTS.len())]);
    }
  }
}

pub fn sample_identify_theorem<R: Rng>(rng: &mut R) -> Problem {
  let theorem = &THEOREMS[rng.gen_range(0..THEOREMS.len())];
  identify_theorem(theorem, TRIANGLE_LAYOUTS[rng.gen_range(0..TRIANGLE_LAYOUTS.len())])
}

pub fn sample_solve_triangle<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  loop {
    let x = rng.gen_range(5..=14);
    let setup = match rng.gen_range(0..3) {
      0 => TriangleSetup::Sum { m: rng.gen_range(2..=5), b: rng.gen_range(0..=19), angle_b: rng.gen_range(30..=99) },
      1 => TriangleSetup::Exterior { m: rng.gen_range(2..=4), b: rng.gen_range(0..=9), angle_b: rng.gen_range(30..=79) },
      _ => TriangleSetup::Isosceles { m: rng.gen_range(2..=4), b: rng.gen_range(0..=19) },
    };
    if let Some(p) = solve_triangle(x, setup, tol) {
      return p;
    }
  }
}
