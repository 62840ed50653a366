//! Conversions between standard decimal strings and scientific notation.
//!
//! All arithmetic is done on digit strings, never on floats, so a value like
//! `0.000003582` survives the trip to `3.582x10^-6` and back unchanged.
//! The canonical scientific form is `<mantissa>x10^<exponent>` with no spaces
//! (`2.5x10^5`, `5x10^-10`); inputs may also use `×`, `*`, `·`, spaces and
//! thousands separators.

use crate::error::NotationError;

/// Largest power of ten the converters expand.
pub const MAX_EXPONENT: i32 = 100;

/// A non-zero decimal: significant digits (no leading or trailing zeros) and
/// the power of ten of the first digit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Decimal {
    negative: bool,
    digits: String,
    exponent: i32,
}

impl Decimal {
    /// `digits` must be ASCII digits; surrounding zeros are trimmed.
    pub(crate) fn new(negative: bool, digits: &str, exponent: i32) -> Result<Self, NotationError> {
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(NotationError::InvalidCharacter(c));
        }
        let lead = digits.len() - digits.trim_start_matches('0').len();
        let sig = digits.trim_start_matches('0').trim_end_matches('0');
        if sig.is_empty() {
            return Err(NotationError::Zero);
        }
        let exponent = exponent - lead as i32;
        if exponent.abs() > MAX_EXPONENT {
            return Err(NotationError::ExponentOutOfRange(exponent));
        }
        Ok(Self { negative, digits: sig.to_string(), exponent })
    }

    pub(crate) fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Mantissa with the point after the first digit ("2.5", "5").
    pub(crate) fn mantissa(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        let (first, rest) = self.digits.split_at(1);
        if rest.is_empty() {
            format!("{sign}{first}")
        } else {
            format!("{sign}{first}.{rest}")
        }
    }

    pub(crate) fn scientific(&self) -> String {
        format!("{}x10^{}", self.mantissa(), self.exponent)
    }

    /// Shift the decimal point `exponent` places and write plain digits.
    pub(crate) fn standard(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        let len = self.digits.len() as i32;
        let body = if self.exponent < 0 {
            let zeros = "0".repeat((-self.exponent - 1) as usize);
            format!("0.{zeros}{}", self.digits)
        } else if len <= self.exponent + 1 {
            let zeros = "0".repeat((self.exponent + 1 - len) as usize);
            format!("{}{zeros}", self.digits)
        } else {
            let (int, frac) = self.digits.split_at((self.exponent + 1) as usize);
            format!("{int}.{frac}")
        };
        format!("{sign}{body}")
    }
}

fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c {
            '×' | '*' | '·' | '⋅' | 'X' => 'x',
            '−' => '-',
            'E' => 'e',
            other => other,
        })
        .collect()
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

pub(crate) fn parse_standard(input: &str) -> Result<Decimal, NotationError> {
    let cleaned = clean(input);
    let (negative, body) = split_sign(&cleaned);
    if body.is_empty() {
        return Err(NotationError::Empty);
    }
    let mut parts = body.split('.');
    let int = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(NotationError::MisplacedPoint);
    }
    if int.is_empty() && frac.is_empty() {
        return Err(NotationError::Empty);
    }
    let digits = format!("{int}{frac}");
    Decimal::new(negative, &digits, int.len() as i32 - 1)
}

pub(crate) fn parse_scientific(input: &str) -> Result<Decimal, NotationError> {
    let cleaned = clean(input);
    let (mantissa, exponent) = if let Some((m, e)) = cleaned.split_once("x10^") {
        (m, e)
    } else if let Some((m, e)) = cleaned.split_once('e') {
        (m, e)
    } else {
        return Err(NotationError::MissingExponent);
    };
    let exponent: i32 = exponent
        .strip_prefix('+')
        .unwrap_or(exponent)
        .parse()
        .map_err(|_| NotationError::InvalidExponent(exponent.to_string()))?;
    if exponent.abs() > MAX_EXPONENT {
        return Err(NotationError::ExponentOutOfRange(exponent));
    }
    let m = parse_standard(mantissa)?;
    Decimal::new(m.negative, &m.digits, m.exponent + exponent)
}

/// `"250000"` -> `"2.5x10^5"`.
pub fn to_scientific(standard: &str) -> Result<String, NotationError> {
    Ok(parse_standard(standard)?.scientific())
}

/// `"2.5x10^5"` -> `"250000"`.
pub fn to_standard(scientific: &str) -> Result<String, NotationError> {
    Ok(parse_scientific(scientific)?.standard())
}

/// `"450000"` -> `"450,000"`; fractional digits are left alone.
pub fn group_thousands(standard: &str) -> String {
    let (sign, body) = match standard.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", standard),
    };
    let (int, frac) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `"4.5x10^5"` -> `"4.5 × 10^5"` for prompts.
pub fn pretty_scientific(canonical: &str) -> String {
    canonical.replacen("x10^", " × 10^", 1)
}
