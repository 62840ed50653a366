//! Small utility helpers used across modules.

/// `{key}` placeholder substitution for feedback messages and word-problem
/// prompts. Unknown placeholders are left in place.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  pairs.iter().fold(tpl.to_string(), |out, (key, value)| out.replace(&format!("{{{key}}}"), value))
}

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
  let factor = 10f64.powi(places as i32);
  (value * factor).round() / factor
}

/// Render a number the way the practice screens show it: no trailing zeros,
/// no dangling decimal point ("5", "12.57", "0.1").
pub fn fmt_num(value: f64) -> String {
  let s = format!("{:.4}", value);
  let s = if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s.as_str() };
  if s == "-0" { "0".into() } else { s.to_string() }
}

/// Integer square root for perfect-square checks on small positive values.
pub fn perfect_sqrt(n: i64) -> Option<i64> {
  if n < 0 { return None; }
  let r = (n as f64).sqrt().round() as i64;
  (r * r == n).then_some(r)
}

/// Log-safe truncation for user-provided strings.
/// Avoids spamming logs with huge submitted answers.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) { end -= 1; }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_replaces_every_key() {
    let out = fill_template("Not quite. The answer was {expected} {unit}.", &[("expected", "5"), ("unit", "cm")]);
    assert_eq!(out, "Not quite. The answer was 5 cm.");
  }

  #[test]
  fn numbers_drop_trailing_zeros() {
    assert_eq!(fmt_num(5.0), "5");
    assert_eq!(fmt_num(12.57), "12.57");
    assert_eq!(fmt_num(0.10), "0.1");
    assert_eq!(fmt_num(-0.0), "0");
    assert_eq!(fmt_num(round_to(13.038404, 1)), "13");
  }

  #[test]
  fn rounding_is_half_away_from_zero() {
    assert_eq!(round_to(2.25, 1), 2.3);
    assert_eq!(round_to(5.0, 1), 5.0);
    assert_eq!(round_to(314.159, 2), 314.16);
  }

  #[test]
  fn perfect_squares() {
    assert_eq!(perfect_sqrt(16), Some(4));
    assert_eq!(perfect_sqrt(0), Some(0));
    assert_eq!(perfect_sqrt(30), None);
    assert_eq!(perfect_sqrt(-4), None);
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    let t = trunc_for_log("√√√√", 4);
    assert!(t.starts_with('√'));
    assert!(t.ends_with("(12 bytes total)"));
  }
}
