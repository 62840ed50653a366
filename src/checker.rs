//! Answer normalization and checking.
//!
//! `judge` is a pure predicate over an expected answer and the raw text the
//! learner typed. `check` wraps it with feedback text and the one score-card
//! update. Nothing here does I/O.

use serde::{Deserialize, Serialize};

use crate::config::Messages;
use crate::domain::{Expected, Problem};
use crate::score::ScoreCard;
use crate::util::fill_template;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Blank input, or text where a number was required.
    Invalid,
    /// x solved but the angle is wrong. Not scored; the problem stays open.
    Partial,
}

/// What an `Invalid` verdict does to the score card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidInputPolicy {
    /// Ask again; the score card is untouched.
    #[default]
    Retry,
    /// Count it as a wrong answer.
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub correct: bool,
    pub verdict: Verdict,
    pub message: String,
    /// Displayed ground truth; empty while the learner can still retry.
    pub expected: String,
    pub explanation: String,
}

pub struct Grading<'a> {
    pub increment: u32,
    pub policy: InvalidInputPolicy,
    pub messages: &'a Messages,
}

/// A submission. `angle` is only read for two-part algebra answers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Answer<'a> {
    pub value: &'a str,
    pub angle: Option<&'a str>,
}

impl<'a> From<&'a str> for Answer<'a> {
    fn from(value: &'a str) -> Self {
        Self { value, angle: None }
    }
}

impl Answer<'_> {
    fn is_blank(&self, expected: &Expected) -> bool {
        let blank = |s: &str| s.trim().is_empty();
        blank(self.value) || (matches!(expected, Expected::Algebra { .. }) && self.angle.map_or(true, blank))
    }
}

const YES_WORDS: [&str; 2] = ["yes", "true"];

/// Strip whitespace, lowercase, fold multiplication signs to `x`, fold the
/// unicode minus, drop thousands separators.
pub fn normalize_notation(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            '×' | '*' | '·' | '⋅' => 'x',
            '−' => '-',
            other => other,
        })
        .collect()
}

/// Trim, lowercase and collapse runs of whitespace.
pub fn normalize_choice(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lenient numeric parse: thousands separators, a leading `+` and a trailing
/// degree sign are allowed. Non-finite values are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.replace('−', "-");
    let cleaned = cleaned.trim_end_matches('°').trim();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One item of an ordering answer: notation folding plus `sqrt`/`pi` spelled out.
pub fn normalize_item(s: &str) -> String {
    normalize_notation(s).replace("sqrt", "√").replace("pi", "π")
}

pub fn parse_yes(raw: &str) -> bool {
    let v = raw.trim().to_lowercase();
    YES_WORDS.contains(&v.as_str())
}

pub fn judge(expected: &Expected, raw: &str) -> Verdict {
    if raw.trim().is_empty() {
        return Verdict::Invalid;
    }
    let correct = match expected {
        Expected::Number { value, tolerance, .. } => match parse_number(raw) {
            Some(x) => (x - value).abs() < *tolerance,
            None => return Verdict::Invalid,
        },
        Expected::Boolean { value } => parse_yes(raw) == *value,
        Expected::Notation { accepted, .. } => {
            let user = normalize_notation(raw);
            accepted.iter().any(|a| normalize_notation(a) == user)
        }
        Expected::Choice { accepted, .. } => {
            let user = normalize_choice(raw);
            accepted.iter().any(|a| normalize_choice(a) == user)
        }
        Expected::Algebra { x: value, tolerance, .. } => match parse_number(raw) {
            Some(x) => (x - value).abs() < *tolerance,
            None => return Verdict::Invalid,
        },
        Expected::Sequence { order, .. } => {
            let user: Vec<String> = raw
                .split([',', ';'])
                .map(normalize_item)
                .filter(|s| !s.is_empty())
                .collect();
            user.len() == order.len() && user.iter().zip(order).all(|(u, o)| *u == normalize_item(o))
        }
    };
    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// `judge` plus the angle half of algebra answers: both parts must parse,
/// x is checked first.
pub fn judge_answer(expected: &Expected, answer: &Answer<'_>) -> Verdict {
    let x = judge(expected, answer.value);
    let Expected::Algebra { angles, angle_tolerance, .. } = expected else {
        return x;
    };
    let Some(angle) = answer.angle.and_then(parse_number) else {
        return Verdict::Invalid;
    };
    match x {
        Verdict::Correct if angles.iter().any(|v| (angle - v).abs() < *angle_tolerance) => Verdict::Correct,
        Verdict::Correct => Verdict::Partial,
        other => other,
    }
}

pub fn check(problem: &Problem, answer: Answer<'_>, card: ScoreCard, grading: &Grading<'_>) -> (CheckResult, ScoreCard) {
    let verdict = judge_answer(&problem.expected, &answer);
    let expected = problem.expected.display();
    let messages = grading.messages;

    let (message, card, reveal) = match verdict {
        Verdict::Correct => (messages.correct.clone(), card.on_correct(grading.increment), true),
        Verdict::Incorrect => (
            fill_template(&messages.incorrect, &[("expected", &expected)]),
            card.on_incorrect(),
            true,
        ),
        Verdict::Partial => (messages.partial.clone(), card, false),
        Verdict::Invalid => {
            let message = if answer.is_blank(&problem.expected) {
                messages.empty.clone()
            } else {
                messages.invalid_number.clone()
            };
            match grading.policy {
                InvalidInputPolicy::Retry => (message, card, false),
                InvalidInputPolicy::Incorrect => (message, card.on_incorrect(), true),
            }
        }
    };

    let result = CheckResult {
        correct: verdict == Verdict::Correct,
        verdict,
        message,
        expected: if reveal { expected } else { String::new() },
        explanation: if reveal { problem.explanation.clone() } else { String::new() },
    };
    (result, card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProblemKind;

    fn number(value: f64, tolerance: f64) -> Expected {
        Expected::Number { value, tolerance, unit: None }
    }

    fn grading(messages: &Messages, policy: InvalidInputPolicy) -> Grading<'_> {
        Grading { increment: 10, policy, messages }
    }

    #[test]
    fn numeric_tolerance_is_strict() {
        let e = number(5.0, 0.15);
        assert_eq!(judge(&e, "5"), Verdict::Correct);
        assert_eq!(judge(&e, " 5.1 "), Verdict::Correct);
        assert_eq!(judge(&e, "4.86"), Verdict::Correct);
        assert_eq!(judge(&e, "5.2"), Verdict::Incorrect);
        assert_eq!(judge(&e, "five"), Verdict::Invalid);
        assert_eq!(judge(&e, "NaN"), Verdict::Invalid);
        assert_eq!(judge(&e, "inf"), Verdict::Invalid);
        assert_eq!(judge(&e, ""), Verdict::Invalid);
    }

    #[test]
    fn numbers_accept_degrees_signs_and_separators() {
        assert_eq!(parse_number("70°"), Some(70.0));
        assert_eq!(parse_number("+12.5"), Some(12.5));
        assert_eq!(parse_number("1,256"), Some(1256.0));
        assert_eq!(parse_number("−3"), Some(-3.0));
        assert_eq!(parse_number("12 cm"), None);
    }

    #[test]
    fn boolean_answers() {
        let yes = Expected::Boolean { value: true };
        let no = Expected::Boolean { value: false };
        assert_eq!(judge(&yes, "YES"), Verdict::Correct);
        assert_eq!(judge(&yes, "true"), Verdict::Correct);
        assert_eq!(judge(&yes, "no"), Verdict::Incorrect);
        assert_eq!(judge(&no, "no"), Verdict::Correct);
        assert_eq!(judge(&no, "maybe"), Verdict::Correct);
        assert_eq!(judge(&no, "Yes"), Verdict::Incorrect);
        // Anything that is not a yes word reads as "no"; only blank asks again.
        assert_eq!(judge(&yes, "maybe"), Verdict::Incorrect);
        assert_eq!(judge(&yes, "   "), Verdict::Invalid);
        assert_eq!(judge(&no, ""), Verdict::Invalid);
    }

    #[test]
    fn notation_forms_are_enumerated() {
        let e = Expected::Notation {
            canonical: "4.5x10^5".into(),
            accepted: vec!["4.5x10^5".into(), "450000".into()],
        };
        assert_eq!(judge(&e, "4.5 × 10^5"), Verdict::Correct);
        assert_eq!(judge(&e, "4.5 X 10^5"), Verdict::Correct);
        assert_eq!(judge(&e, "4.5*10^5"), Verdict::Correct);
        assert_eq!(judge(&e, "450,000"), Verdict::Correct);
        assert_eq!(judge(&e, "45x10^4"), Verdict::Incorrect);
        assert_eq!(judge(&e, "4.50x10^5"), Verdict::Incorrect);
    }

    #[test]
    fn choices_match_aliases_only() {
        let e = Expected::Choice {
            answer: "Corresponding Angles".into(),
            accepted: vec!["Corresponding Angles".into(), "Corresponding".into()],
            options: vec![],
        };
        assert_eq!(judge(&e, "  corresponding   angles "), Verdict::Correct);
        assert_eq!(judge(&e, "CORRESPONDING"), Verdict::Correct);
        assert_eq!(judge(&e, "Correspond"), Verdict::Incorrect);
    }

    #[test]
    fn normalization_examples() {
        assert_eq!(normalize_notation(" 2.5 × 10^5 "), "2.5x10^5");
        assert_eq!(normalize_notation("9,461,000"), "9461000");
        assert_eq!(normalize_notation("3.1·10^−4"), "3.1x10^-4");
        assert_eq!(normalize_choice("Linear\tPair"), "linear pair");
    }

    #[test]
    fn check_updates_card_and_fills_messages() {
        let messages = Messages::default();
        let p = Problem::new(ProblemKind::MissingHypotenuse, "c?", number(5.0, 0.15), "3² + 4² = 25");
        let g = grading(&messages, InvalidInputPolicy::Retry);

        let (res, card) = check(&p, "5.0".into(), ScoreCard::default(), &g);
        assert!(res.correct);
        assert_eq!(res.message, "Correct! Great job.");
        assert_eq!(card.score, 10);
        assert_eq!(card.streak, 1);

        let (res, card) = check(&p, "7".into(), card, &g);
        assert!(!res.correct);
        assert_eq!(res.verdict, Verdict::Incorrect);
        assert_eq!(res.message, "Not quite. The answer was 5.");
        assert_eq!(res.explanation, "3² + 4² = 25");
        assert_eq!(card.score, 10);
        assert_eq!(card.streak, 0);
    }

    #[test]
    fn invalid_input_follows_policy() {
        let messages = Messages::default();
        let p = Problem::new(ProblemKind::Distance, "d?", number(5.0, 0.15), "");
        let start = ScoreCard::default().on_correct(10);

        for (policy, streak_after, revealed) in [
            (InvalidInputPolicy::Retry, 1, false),
            (InvalidInputPolicy::Incorrect, 0, true),
        ] {
            let (res, card) = check(&p, "abc".into(), start, &grading(&messages, policy));
            assert_eq!(res.verdict, Verdict::Invalid);
            assert!(!res.correct);
            assert_eq!(res.message, "Please enter a valid number.");
            assert_eq!(card.streak, streak_after, "{policy:?}");
            assert_eq!(card.score, 10);
            assert_eq!(!res.expected.is_empty(), revealed);
        }

        let (res, _) = check(&p, "   ".into(), start, &grading(&messages, InvalidInputPolicy::Retry));
        assert_eq!(res.message, "Please enter an answer first.");
    }

    fn algebra(x: f64, angles: Vec<f64>) -> Expected {
        Expected::Algebra { x, tolerance: 0.5, angles, angle_tolerance: 1.0 }
    }

    fn two_part<'a>(value: &'a str, angle: &'a str) -> Answer<'a> {
        Answer { value, angle: Some(angle) }
    }

    #[test]
    fn algebra_needs_x_then_the_angle() {
        let e = algebra(15.0, vec![55.0, 125.0]);
        assert_eq!(judge_answer(&e, &two_part("15", "55")), Verdict::Correct);
        assert_eq!(judge_answer(&e, &two_part("15.2", "125.5")), Verdict::Correct);
        assert_eq!(judge_answer(&e, &two_part("15", "56")), Verdict::Partial);
        assert_eq!(judge_answer(&e, &two_part("14", "55")), Verdict::Incorrect);
        assert_eq!(judge_answer(&e, &two_part("15", "")), Verdict::Invalid);
        assert_eq!(judge_answer(&e, &two_part("x", "55")), Verdict::Invalid);
        assert_eq!(judge_answer(&e, &"15".into()), Verdict::Invalid);
    }

    #[test]
    fn partial_answer_keeps_card_and_answer_hidden() {
        let messages = Messages::default();
        let p = Problem::new(ProblemKind::AnglePairSolve, "x?", algebra(15.0, vec![55.0]), "3x + 10 = 55");
        let g = grading(&messages, InvalidInputPolicy::Retry);
        let start = ScoreCard::default().on_correct(10);

        let (res, card) = check(&p, two_part("15", "60"), start, &g);
        assert_eq!(res.verdict, Verdict::Partial);
        assert!(!res.correct);
        assert_eq!(res.message, messages.partial);
        assert!(res.expected.is_empty());
        assert_eq!(card, start);

        let (res, _) = check(&p, two_part("15", " "), start, &g);
        assert_eq!(res.message, "Please enter an answer first.");

        let (res, card) = check(&p, two_part("15", "55"), start, &g);
        assert!(res.correct);
        assert_eq!(card.streak, 2);
    }

    #[test]
    fn orderings_compare_item_by_item() {
        let e = Expected::Sequence {
            order: vec!["-√10".into(), "-3.1".into(), "1/2".into(), "π".into()],
            options: vec![],
        };
        assert_eq!(judge(&e, "-√10, -3.1, 1/2, π"), Verdict::Correct);
        assert_eq!(judge(&e, "−sqrt10; -3.1; 1/2; pi"), Verdict::Correct);
        assert_eq!(judge(&e, "-3.1, -√10, 1/2, π"), Verdict::Incorrect);
        assert_eq!(judge(&e, "-√10, -3.1, 1/2"), Verdict::Incorrect);
        assert_eq!(judge(&e, " "), Verdict::Invalid);
    }
}
