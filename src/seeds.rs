//! Built-in content: Pythagorean triples, word-problem scenarios and the
//! scientific-notation word-problem bank.

/// Primitive right triangles offered by the converse generator.
pub const RIGHT_TRIPLES: [[i64; 3]; 6] = [[3, 4, 5], [5, 12, 13], [8, 15, 17], [7, 24, 25], [9, 40, 41], [20, 21, 29]];

/// Which side of the right triangle a word problem asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unknown {
  Hypotenuse,
  Leg,
}

/// A Pythagorean word problem. `first` and `second` are sampled from their
/// inclusive ranges; for `Unknown::Leg` the first value is the hypotenuse.
#[derive(Clone, Copy, Debug)]
pub struct RealWorldScenario {
  pub id: &'static str,
  pub title: &'static str,
  /// Template with `{first}` and `{second}` placeholders.
  pub prompt: &'static str,
  pub first: (i64, i64),
  pub second: (i64, i64),
  pub unknown: Unknown,
  pub unit: &'static str,
}

pub const REAL_WORLD_SCENARIOS: [RealWorldScenario; 4] = [
  RealWorldScenario {
    id: "tv",
    title: "TV Screen Diagonal",
    prompt: "A TV screen is {first} inches wide and {second} inches tall. What is the length of the diagonal?",
    first: (32, 41),
    second: (18, 23),
    unknown: Unknown::Hypotenuse,
    unit: "inches",
  },
  RealWorldScenario {
    id: "ladder",
    title: "The Painter's Problem",
    prompt: "A {first}ft ladder is leaning against a wall. The base is {second}ft from the wall. How high up the wall does it reach?",
    first: (10, 14),
    second: (6, 6),
    unknown: Unknown::Leg,
    unit: "feet",
  },
  RealWorldScenario {
    id: "park",
    title: "Shortcut in the Park",
    prompt: "You walk {first}m East and then {second}m North. What is the direct distance back to your starting point?",
    first: (40, 59),
    second: (30, 39),
    unknown: Unknown::Hypotenuse,
    unit: "meters",
  },
  RealWorldScenario {
    id: "tree",
    title: "The Broken Tree",
    prompt: "A tree was struck by lightning and snapped. The top part is still attached and touches the ground {second}ft from the base. If the remaining trunk is {first}ft tall, how long is the snapped part?",
    first: (5, 7),
    second: (12, 12),
    unknown: Unknown::Hypotenuse,
    unit: "feet",
  },
];

/// Direction of a notation exercise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
  ToScientific,
  ToStandard,
}

#[derive(Clone, Copy, Debug)]
pub struct NotationWordProblem {
  pub id: &'static str,
  pub context: &'static str,
  pub scenario: &'static str,
  pub direction: Direction,
  /// Plain digits, no separators.
  pub standard: &'static str,
  /// Canonical `a x10^n` form.
  pub scientific: &'static str,
  pub hint: &'static str,
}

pub const NOTATION_WORD_PROBLEMS: [NotationWordProblem; 5] = [
  NotationWordProblem {
    id: "mars",
    context: "Astronomy",
    scenario: "The average distance from Earth to Mars is approximately 225,000,000 kilometers.",
    direction: Direction::ToScientific,
    standard: "225000000",
    scientific: "2.25x10^8",
    hint: "Count how many places you move the decimal point left to get 2.25.",
  },
  NotationWordProblem {
    id: "bacteria",
    context: "Microbiology",
    scenario: "A specific type of bacteria has a mass of about 9.5 × 10^-13 grams.",
    direction: Direction::ToStandard,
    standard: "0.00000000000095",
    scientific: "9.5x10^-13",
    hint: "A negative exponent means the standard number will be very small. Move the decimal 13 places left.",
  },
  NotationWordProblem {
    id: "computer",
    context: "Technology",
    scenario: "A modern high-speed computer can perform 4,200,000,000,000 calculations per second.",
    direction: Direction::ToScientific,
    standard: "4200000000000",
    scientific: "4.2x10^12",
    hint: "Twelve zeros follow the decimal move.",
  },
  NotationWordProblem {
    id: "earth",
    context: "Geography",
    scenario: "The total surface area of the Earth is approximately 5.1 × 10^8 square kilometers.",
    direction: Direction::ToStandard,
    standard: "510000000",
    scientific: "5.1x10^8",
    hint: "Move the decimal point 8 places to the right.",
  },
  NotationWordProblem {
    id: "red_light",
    context: "Physics",
    scenario: "The wavelength of red light is about 0.0000007 meters.",
    direction: Direction::ToScientific,
    standard: "0.0000007",
    scientific: "7x10^-7",
    hint: "Move the decimal point to the right until you have 7. Count the jumps.",
  },
];

/// True/false questions about how the number sets nest.
#[derive(Clone, Copy, Debug)]
pub struct ConceptQuestion {
  pub id: &'static str,
  pub question: &'static str,
  pub answer: bool,
  pub explanation: &'static str,
}

pub const CONCEPT_QUESTIONS: [ConceptQuestion; 6] = [
  ConceptQuestion {
    id: "whole_real",
    question: "Is a whole number a real number?",
    answer: true,
    explanation: "Yes! Whole numbers are a subset of integers, which are rational, and all rational numbers are real.",
  },
  ConceptQuestion {
    id: "irrational_real",
    question: "Are all irrational numbers real?",
    answer: true,
    explanation: "Yes! The set of real numbers is made up of both rational and irrational numbers.",
  },
  ConceptQuestion {
    id: "integers_whole",
    question: "Are all integers whole numbers?",
    answer: false,
    explanation: "No. Integers include negative numbers (like -5), but whole numbers start at 0.",
  },
  ConceptQuestion {
    id: "real_rational",
    question: "Are all real numbers rational?",
    answer: false,
    explanation: "No. Real numbers also include irrational numbers like π and √2.",
  },
  ConceptQuestion {
    id: "zero_natural",
    question: "Is zero a natural number?",
    answer: false,
    explanation: "No. Natural numbers (counting numbers) start at 1. Whole numbers start at 0.",
  },
  ConceptQuestion {
    id: "rational_integer",
    question: "Is every rational number an integer?",
    answer: false,
    explanation: "No. Fractions like 1/2 are rational but are not integers.",
  },
];

#[cfg(test)]
mod tests {
  use super::*;
  use crate::notation::{to_scientific, to_standard};

  #[test]
  fn triples_are_right() {
    for [a, b, c] in RIGHT_TRIPLES {
      assert_eq!(a * a + b * b, c * c);
    }
  }

  #[test]
  fn word_problem_forms_agree() {
    for wp in NOTATION_WORD_PROBLEMS {
      assert_eq!(to_scientific(wp.standard).unwrap(), wp.scientific, "{}", wp.id);
      assert_eq!(to_standard(wp.scientific).unwrap(), wp.standard, "{}", wp.id);
    }
  }

  #[test]
  fn leg_scenarios_keep_the_hypotenuse_longest() {
    for s in REAL_WORLD_SCENARIOS.iter().filter(|s| s.unknown == Unknown::Leg) {
      assert!(s.first.0 > s.second.1, "{}", s.id);
    }
  }

  #[test]
  fn concept_ids_are_unique() {
    let mut ids: Vec<_> = CONCEPT_QUESTIONS.iter().map(|q| q.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), CONCEPT_QUESTIONS.len());
    assert!(CONCEPT_QUESTIONS.iter().any(|q| q.answer) && CONCEPT_QUESTIONS.iter().any(|q| !q.answer));
  }
}
