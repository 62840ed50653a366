//! Surface area of right prisms and cylinders, total or lateral.
//!
//! Cylinders use π ≈ 3.14 to match classroom arithmetic. Answers are rounded
//! to two decimal places.

use rand::Rng;

use crate::config::Tolerances;
use crate::domain::{Expected, Problem, ProblemKind};
use crate::util::{fmt_num, round_to};

pub const PI_APPROX: f64 = 3.14;
const UNIT: &str = "sq units";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
  /// Every face, bases included.
  Total,
  /// Side faces only.
  Lateral,
}

impl Measure {
  fn label(self) -> &'static str {
    match self {
      Measure::Total => "total surface area",
      Measure::Lateral => "lateral area",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solid {
  RectangularPrism { l: i64, w: i64, h: i64 },
  /// Isosceles triangular base with base `b` and height `h`, prism length `length`.
  TriangularPrism { b: i64, h: i64, length: i64 },
  Cylinder { r: i64, h: i64 },
}

impl Solid {
  pub fn kind(&self) -> ProblemKind {
    match self {
      Solid::RectangularPrism { .. } => ProblemKind::RectangularPrism,
      Solid::TriangularPrism { .. } => ProblemKind::TriangularPrism,
      Solid::Cylinder { .. } => ProblemKind::Cylinder,
    }
  }

  pub fn lateral_area(&self) -> f64 {
    match *self {
      Solid::RectangularPrism { l, w, h } => (2 * h * (l + w)) as f64,
      Solid::TriangularPrism { b, length, .. } => (b as f64 + 2.0 * self.slant()) * length as f64,
      Solid::Cylinder { r, h } => 2.0 * PI_APPROX * (r * h) as f64,
    }
  }

  pub fn base_area(&self) -> f64 {
    match *self {
      Solid::RectangularPrism { l, w, .. } => (l * w) as f64,
      Solid::TriangularPrism { b, h, .. } => 0.5 * (b * h) as f64,
      Solid::Cylinder { r, .. } => PI_APPROX * (r * r) as f64,
    }
  }

  pub fn total_area(&self) -> f64 {
    2.0 * self.base_area() + self.lateral_area()
  }

  /// Equal sides of the triangular base; zero for other solids.
  fn slant(&self) -> f64 {
    match *self {
      Solid::TriangularPrism { b, h, .. } => ((b as f64 / 2.0).powi(2) + (h * h) as f64).sqrt(),
      _ => 0.0,
    }
  }

  fn describe(&self) -> String {
    match *self {
      Solid::RectangularPrism { l, w, h } => format!("a rectangular prism with length {l}, width {w} and height {h}"),
      Solid::TriangularPrism { b, h, length } => format!(
        "a triangular prism whose isosceles base has base {b} and height {h}, with prism length {length}"
      ),
      Solid::Cylinder { r, h } => format!("a cylinder with radius {r} and height {h} (use π ≈ 3.14)"),
    }
  }

  fn work(&self, measure: Measure, answer: f64) -> String {
    let a = fmt_num(answer);
    match (*self, measure) {
      (Solid::RectangularPrism { l, w, h }, Measure::Total) => {
        format!("S = 2(lw + lh + wh) = 2({} + {} + {}) = {a}.", l * w, l * h, w * h)
      }
      (Solid::RectangularPrism { l, w, h }, Measure::Lateral) => {
        format!("L = 2h(l + w) = 2 × {h} × ({l} + {w}) = {a}.")
      }
      (Solid::TriangularPrism { b, h, length }, measure) => {
        let s = fmt_num(round_to(self.slant(), 2));
        let perimeter = fmt_num(round_to(b as f64 + 2.0 * self.slant(), 2));
        let lateral = format!("side s = √(({b}/2)² + {h}²) ≈ {s}. Perimeter P = {b} + 2 × {s} ≈ {perimeter}. L = P × {length}");
        match measure {
          Measure::Lateral => format!("The base has {lateral} ≈ {a}."),
          Measure::Total => format!("The base has area ½ × {b} × {h} = {}; {lateral}. S = 2B + L ≈ {a}.", fmt_num(self.base_area())),
        }
      }
      (Solid::Cylinder { r, h }, Measure::Total) => {
        format!("S = 2πr² + 2πrh = 2(3.14)({r}²) + 2(3.14)({r})({h}) = {a}.")
      }
      (Solid::Cylinder { r, h }, Measure::Lateral) => format!("L = 2πrh = 2 × 3.14 × {r} × {h} = {a}."),
    }
  }
}

pub fn surface_area(solid: Solid, measure: Measure, tolerance: f64) -> Problem {
  let raw = match measure {
    Measure::Total => solid.total_area(),
    Measure::Lateral => solid.lateral_area(),
  };
  let answer = round_to(raw, 2);
  let mut p = Problem::new(
    solid.kind(),
    format!("Find the {} of {}. Round to the nearest hundredth.", measure.label(), solid.describe()),
    Expected::Number { value: answer, tolerance, unit: Some(UNIT.to_string()) },
    solid.work(measure, answer),
  )
  .with_param("measure", match measure {
    Measure::Total => "total",
    Measure::Lateral => "lateral",
  })
  .with_hint(match measure {
    Measure::Total => "Add the area of both bases to the lateral area.",
    Measure::Lateral => "Multiply the perimeter of the base by the height of the solid.",
  });
  let dims: Vec<(&str, i64)> = match solid {
    Solid::RectangularPrism { l, w, h } => vec![("l", l), ("w", w), ("h", h)],
    Solid::TriangularPrism { b, h, length } => vec![("b", b), ("h", h), ("length", length)],
    Solid::Cylinder { r, h } => vec![("r", r), ("h", h)],
  };
  let mut tag = format!("{:?}", solid.kind());
  for (k, v) in dims {
    p = p.with_param(k, v);
    tag.push_str(&format!(":{v}"));
  }
  p.with_fingerprint(tag)
}

fn sample_measure<R: Rng>(rng: &mut R) -> Measure {
  if rng.gen_bool(0.5) {
    Measure::Total
  } else {
    Measure::Lateral
  }
}

pub fn sample<R: Rng>(kind: ProblemKind, rng: &mut R, tol: &Tolerances) -> Problem {
  let solid = match kind {
    ProblemKind::TriangularPrism => Solid::TriangularPrism {
      b: rng.gen_range(4..=13),
      h: rng.gen_range(3..=7),
      length: rng.gen_range(5..=14),
    },
    ProblemKind::Cylinder => Solid::Cylinder { r: rng.gen_range(2..=6), h: rng.gen_range(5..=14) },
    _ => Solid::RectangularPrism { l: rng.gen_range(2..=11), w: rng.gen_range(2..=11), h: rng.gen_range(2..=11) },
  };
  let measure = sample_measure(rng);
  surface_area(solid, measure, tol.surface_area)
}
