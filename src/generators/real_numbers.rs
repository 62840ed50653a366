//! Real numbers: classification, square-root estimation, ordering and
//! set-membership questions.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Tolerances;
use crate::domain::{Expected, Problem, ProblemKind};
use crate::seeds::{ConceptQuestion, CONCEPT_QUESTIONS};
use crate::util::{perfect_sqrt, round_to};

/// Most specific set a real number belongs to, narrowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberSet {
  Natural,
  Whole,
  Integer,
  Rational,
  Irrational,
}

impl NumberSet {
  pub const ALL: [NumberSet; 5] =
    [NumberSet::Natural, NumberSet::Whole, NumberSet::Integer, NumberSet::Rational, NumberSet::Irrational];

  pub fn name(self) -> &'static str {
    match self {
      NumberSet::Natural => "Natural",
      NumberSet::Whole => "Whole",
      NumberSet::Integer => "Integer",
      NumberSet::Rational => "Rational",
      NumberSet::Irrational => "Irrational",
    }
  }

  fn aliases(self) -> Vec<String> {
    let name = self.name();
    let mut out = vec![name.to_string(), format!("{name} number"), format!("{name} numbers")];
    if self == NumberSet::Integer {
      out.push("Integers".to_string());
    }
    out
  }

  /// Sets this one sits inside, for explanations.
  fn also(self) -> &'static str {
    match self {
      NumberSet::Natural => " (and also Whole, Integer, and Rational)",
      NumberSet::Whole => " (and also Integer and Rational)",
      NumberSet::Integer => " (and also Rational)",
      NumberSet::Rational | NumberSet::Irrational => "",
    }
  }
}

/// How a number is written on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberForm {
  Int(i64),
  /// `num/den`, den > 1, not reducing to an integer.
  Fraction(i64, i64),
  /// Hundredths, e.g. `-275` for -2.75.
  Hundredths(i64),
  /// `√n` (or `-√n`).
  Root { n: i64, negative: bool },
  Pi,
}

impl fmt::Display for NumberForm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      NumberForm::Int(v) => write!(f, "{v}"),
      NumberForm::Fraction(n, d) => write!(f, "{n}/{d}"),
      NumberForm::Hundredths(h) => {
        let sign = if h < 0 { "-" } else { "" };
        let h = h.abs();
        let frac = format!("{:02}", h % 100);
        write!(f, "{sign}{}.{}", h / 100, frac.trim_end_matches('0'))
      }
      NumberForm::Root { n, negative } => write!(f, "{}√{n}", if negative { "-" } else { "" }),
      NumberForm::Pi => f.write_str("π"),
    }
  }
}

impl NumberForm {
  pub fn value(self) -> f64 {
    match self {
      NumberForm::Int(v) => v as f64,
      NumberForm::Fraction(n, d) => n as f64 / d as f64,
      NumberForm::Hundredths(h) => h as f64 / 100.0,
      NumberForm::Root { n, negative } => {
        let r = (n as f64).sqrt();
        if negative { -r } else { r }
      }
      NumberForm::Pi => std::f64::consts::PI,
    }
  }
}

pub fn classify(form: NumberForm) -> (NumberSet, String) {
  let int_set = |v: i64| match v {
    v if v > 0 => NumberSet::Natural,
    0 => NumberSet::Whole,
    _ => NumberSet::Integer,
  };
  match form {
    NumberForm::Int(v) => {
      let why = match int_set(v) {
        NumberSet::Natural => format!("{v} is a counting number"),
        NumberSet::Whole => "0 is a whole number but not a counting number".to_string(),
        _ => format!("{v} is a negative whole-number value"),
      };
      (int_set(v), why)
    }
    NumberForm::Fraction(n, d) => (NumberSet::Rational, format!("{n}/{d} is a ratio of two integers that is not a whole value")),
    NumberForm::Hundredths(_) => (NumberSet::Rational, format!("{form} is a terminating decimal, so it can be written as a fraction")),
    NumberForm::Root { n, negative } => match perfect_sqrt(n) {
      Some(r) => {
        let v = if negative { -r } else { r };
        (int_set(v), format!("{form} simplifies to {v}, because {r}² = {n}"))
      }
      None => (NumberSet::Irrational, format!("{n} is not a perfect square, so {form} is a non-terminating, non-repeating decimal")),
    },
    NumberForm::Pi => (NumberSet::Irrational, "π is a non-terminating, non-repeating decimal".to_string()),
  }
}

pub fn classify_problem(form: NumberForm) -> Problem {
  let (set, why) = classify(form);
  let options = NumberSet::ALL.iter().map(|s| s.name().to_string()).collect();
  Problem::new(
    ProblemKind::Classify,
    format!("What is the most specific set of numbers that {form} belongs to?"),
    Expected::Choice { answer: set.name().to_string(), accepted: set.aliases(), options },
    format!("{why}, so it is {}{}.", set.name(), set.also()),
  )
  .with_param("number", form.to_string())
  .with_hint("Simplify first, then start from the narrowest set: Natural, Whole, Integer, Rational.")
  .with_fingerprint(format!("classify:{}", set.name()))
}

/// `n` must not be a perfect square.
pub fn estimate_root(n: i64, tolerance: f64) -> Problem {
  let lo = (n as f64).sqrt().floor() as i64;
  let hi = lo + 1;
  let value = round_to((n as f64).sqrt(), 1);
  Problem::new(
    ProblemKind::EstimateRoot,
    format!("Estimate √{n} to the nearest tenth."),
    Expected::Number { value, tolerance, unit: None },
    format!("{lo}² = {} and {hi}² = {}, so √{n} is between {lo} and {hi}. √{n} ≈ {value:.1}.", lo * lo, hi * hi),
  )
  .with_param("n", n)
  .with_hint("Find the two closest perfect squares it falls between.")
  .with_fingerprint(format!("root:{lo}"))
}

/// `forms` in display order; values must be distinct.
pub fn order_problem(forms: &[NumberForm], descending: bool) -> Problem {
  let mut sorted = forms.to_vec();
  sorted.sort_by(|a, b| a.value().total_cmp(&b.value()));
  if descending {
    sorted.reverse();
  }
  let order: Vec<String> = sorted.iter().map(ToString::to_string).collect();
  let options: Vec<String> = forms.iter().map(ToString::to_string).collect();
  let (direction, words) = if descending { ("desc", "GREATEST to LEAST") } else { ("asc", "LEAST to GREATEST") };
  let values = sorted
    .iter()
    .map(|f| format!("{f} ≈ {}", round_to(f.value(), 2)))
    .collect::<Vec<_>>()
    .join(", ");
  Problem::new(
    ProblemKind::Order,
    format!("Order from {words}: {}. Separate them with commas.", options.join(", ")),
    Expected::Sequence { order: order.clone(), options },
    format!("As decimals: {values}. So the order is {}.", order.join(", ")),
  )
  .with_param("direction", direction)
  .with_hint("Turn each number into a decimal first, then place them on a number line.")
  .with_fingerprint(format!("order:{direction}"))
}

pub fn concept_problem(q: &ConceptQuestion) -> Problem {
  Problem::new(
    ProblemKind::Concept,
    q.question,
    Expected::Boolean { value: q.answer },
    q.explanation,
  )
  .with_hint("Picture the nested sets: Natural inside Whole inside Integer inside Rational. Rational and Irrational together make the Reals.")
  .with_fingerprint(format!("concept:{}", q.id))
}

pub fn sample_form<R: Rng>(rng: &mut R) -> NumberForm {
  match rng.gen_range(0..8) {
    0 => NumberForm::Int(rng.gen_range(1..=50)),
    1 => NumberForm::Int(0),
    2 => NumberForm::Int(-rng.gen_range(1..=50)),
    3 => {
      let d = rng.gen_range(2..=9);
      let mut n = rng.gen_range(1..=20);
      if n % d == 0 {
        n += 1;
      }
      NumberForm::Fraction(if rng.gen_bool(0.5) { -n } else { n }, d)
    }
    4 => {
      let mut h = rng.gen_range(1..=999);
      if h % 100 == 0 {
        h += 5;
      }
      NumberForm::Hundredths(if rng.gen_bool(0.5) { -h } else { h })
    }
    5 => {
      let k = rng.gen_range(1..=12);
      NumberForm::Root { n: k * k, negative: rng.gen_bool(0.5) }
    }
    6 => NumberForm::Root { n: sample_non_square(rng, 2, 99), negative: rng.gen_bool(0.3) },
    _ => NumberForm::Pi,
  }
}

fn sample_non_square<R: Rng>(rng: &mut R, lo: i64, hi: i64) -> i64 {
  loop {
    let n = rng.gen_range(lo..=hi);
    if perfect_sqrt(n).is_none() {
      return n;
    }
  }
}

pub fn sample_classify<R: Rng>(rng: &mut R) -> Problem {
  classify_problem(sample_form(rng))
}

pub fn sample_estimate_root<R: Rng>(rng: &mut R, tol: &Tolerances) -> Problem {
  estimate_root(sample_non_square(rng, 2, 150), tol.root_estimate)
}

const ORDER_LEN: usize = 4;

pub fn sample_order<R: Rng>(rng: &mut R) -> Problem {
  let mut forms: Vec<NumberForm> = Vec::with_capacity(ORDER_LEN);
  while forms.len() < ORDER_LEN {
    let f = sample_form(rng);
    // Equal values would make two orders correct.
    if forms.iter().all(|g| (g.value() - f.value()).abs() > 1e-9) {
      forms.push(f);
    }
  }
  forms.shuffle(rng);
  order_problem(&forms, rng.gen_bool(0.5))
}

pub fn sample_concept<R: Rng>(rng: &mut R) -> Problem {
  concept_problem(&CONCEPT_QUESTIONS[rng.gen_range(0..CONCEPT_QUESTIONS.len())])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::checker::{judge, Verdict};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn most_specific_set() {
    assert_eq!(classify(NumberForm::Int(24)).0, NumberSet::Natural);
    assert_eq!(classify(NumberForm::Int(0)).0, NumberSet::Whole);
    assert_eq!(classify(NumberForm::Int(-7)).0, NumberSet::Integer);
    assert_eq!(classify(NumberForm::Fraction(3, 4)).0, NumberSet::Rational);
    assert_eq!(classify(NumberForm::Hundredths(-275)).0, NumberSet::Rational);
    assert_eq!(classify(NumberForm::Root { n: 49, negative: false }).0, NumberSet::Natural);
    assert_eq!(classify(NumberForm::Root { n: 16, negative: true }).0, NumberSet::Integer);
    assert_eq!(classify(NumberForm::Root { n: 28, negative: false }).0, NumberSet::Irrational);
    assert_eq!(classify(NumberForm::Pi).0, NumberSet::Irrational);
  }

  #[test]
  fn forms_render() {
    assert_eq!(NumberForm::Hundredths(-275).to_string(), "-2.75");
    assert_eq!(NumberForm::Hundredths(5).to_string(), "0.05");
    assert_eq!(NumberForm::Hundredths(130).to_string(), "1.3");
    assert_eq!(NumberForm::Root { n: 10, negative: true }.to_string(), "-√10");
  }

  #[test]
  fn classify_accepts_plural_names() {
    let p = classify_problem(NumberForm::Int(0));
    assert_eq!(judge(&p.expected, "whole numbers"), Verdict::Correct);
    assert_eq!(judge(&p.expected, "Natural"), Verdict::Incorrect);
    assert!(p.explanation.ends_with("so it is Whole (and also Integer and Rational)."));
  }

  #[test]
  fn root_estimate_between_squares() {
    let p = estimate_root(50, Tolerances::default().root_estimate);
    assert_eq!(p.explanation, "7² = 49 and 8² = 64, so √50 is between 7 and 8. √50 ≈ 7.1.");
    assert_eq!(judge(&p.expected, "7.1"), Verdict::Correct);
    assert_eq!(judge(&p.expected, "7.12"), Verdict::Correct);
    // Neighbouring tenths are wrong answers.
    assert_eq!(judge(&p.expected, "7.0"), Verdict::Incorrect);
    assert_eq!(judge(&p.expected, "7.2"), Verdict::Incorrect);
    assert_eq!(judge(&p.expected, "6.9"), Verdict::Incorrect);
  }

  #[test]
  fn ordering_by_value() {
    let forms = [
      NumberForm::Root { n: 5, negative: false },
      NumberForm::Hundredths(250),
      NumberForm::Root { n: 3, negative: false },
      NumberForm::Int(2),
    ];
    let p = order_problem(&forms, false);
    assert_eq!(p.expected.display(), "√3, 2, √5, 2.5");
    assert_eq!(p.expected.options(), vec!["√5", "2.5", "√3", "2"]);
    assert_eq!(judge(&p.expected, "sqrt3, 2, sqrt5, 2.5"), Verdict::Correct);
    assert_eq!(judge(&p.expected, "2, √3, √5, 2.5"), Verdict::Incorrect);

    let forms = [NumberForm::Root { n: 10, negative: true }, NumberForm::Hundredths(-350), NumberForm::Pi, NumberForm::Int(3)];
    let p = order_problem(&forms, true);
    assert_eq!(p.expected.display(), "π, 3, -√10, -3.5");
    assert_eq!(p.text("direction"), Some("desc"));
  }

  #[test]
  fn sampled_orderings_have_distinct_values() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
      let p = sample_order(&mut rng);
      let Expected::Sequence { order, options } = &p.expected else { panic!() };
      assert_eq!(order.len(), ORDER_LEN);
      let mut shown = options.clone();
      let mut sorted = order.clone();
      shown.sort();
      sorted.sort();
      assert_eq!(shown, sorted);
    }
  }

  #[test]
  fn concept_questions_are_yes_no() {
    let zero = CONCEPT_QUESTIONS.iter().find(|q| q.id == "zero_natural").unwrap();
    let p = concept_problem(zero);
    assert_eq!(judge(&p.expected, "no"), Verdict::Correct);
    assert_eq!(judge(&p.expected, "yes"), Verdict::Incorrect);
    assert_eq!(p.expected.options(), vec!["Yes", "No"]);
    assert_eq!(p.fingerprint, "concept:zero_natural");
  }
}
