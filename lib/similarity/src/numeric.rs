//! Numeric attribute closeness
//!
//! Compares two "numeric-like" values (alcohol percentages, prices, scale
//! ratings) with a relative-difference metric:
//!
//! ```text
//! score = max(0, round(100 * (1 - |a - b| / max(|a|, |b|))))
//! ```
//!
//! A one-point gap on a two-point scale scores far worse than a one-point gap
//! on a hundred-point scale.

use crate::score::to_score;

/// Value that can be read as a number, possibly after cleanup
pub trait NumericLike {
    fn to_numeric(&self) -> Option<f64>;
}

impl NumericLike for str {
    fn to_numeric(&self) -> Option<f64> {
        parse_numeric(self)
    }
}

impl NumericLike for String {
    fn to_numeric(&self) -> Option<f64> {
        parse_numeric(self)
    }
}

impl NumericLike for f64 {
    fn to_numeric(&self) -> Option<f64> {
        self.is_finite().then_some(*self)
    }
}

impl NumericLike for f32 {
    fn to_numeric(&self) -> Option<f64> {
        self.is_finite().then_some(*self as f64)
    }
}

impl NumericLike for i64 {
    fn to_numeric(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl NumericLike for u32 {
    fn to_numeric(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl<T: NumericLike> NumericLike for Option<T> {
    fn to_numeric(&self) -> Option<f64> {
        self.as_ref().and_then(NumericLike::to_numeric)
    }
}

impl<T: NumericLike + ?Sized> NumericLike for &T {
    fn to_numeric(&self) -> Option<f64> {
        (**self).to_numeric()
    }
}

/// Parse a loosely formatted number
///
/// Keeps digits and the separators `.` and `,`, drops everything else
/// (spaces, units, currency). A separator right after a letter closes an
/// abbreviation (`ca.`, `kr.`) and is dropped. When both separators appear the last one is
/// the decimal mark. A single separator is a decimal mark; a separator that
/// repeats is a thousands mark.
///
/// ```
/// use vinsmak_similarity::numeric::parse_numeric;
///
/// assert_eq!(parse_numeric("12,5 %"), Some(12.5));
/// assert_eq!(parse_numeric("kr 1 249,90"), Some(1249.9));
/// assert_eq!(parse_numeric("1.234.567"), Some(1234567.0));
/// assert_eq!(parse_numeric("ukjent"), None);
/// ```
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let mut kept = String::with_capacity(raw.len());
    let mut prev = None;
    for c in raw.chars() {
        let abbreviation = prev.is_some_and(char::is_alphabetic);
        if c.is_ascii_digit() || ((c == '.' || c == ',') && !abbreviation) {
            kept.push(c);
        }
        prev = Some(c);
    }
    let kept = kept.trim_end_matches(|c| c == '.' || c == ',');

    if !kept.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    let commas = kept.matches(',').count();
    let dots = kept.matches('.').count();

    let decimal = match (commas, dots) {
        (0, 0) => None,
        (_, 0) => (commas == 1).then_some(','),
        (0, _) => (dots == 1).then_some('.'),
        _ => kept.rfind([',', '.']).and_then(|i| kept[i..].chars().next()),
    };

    let normalized: String = match decimal {
        Some(mark) => {
            // everything before the last mark is integer part
            let split = kept.rfind(mark)?;
            let (int_part, frac_part) = kept.split_at(split);
            let int_digits: String = int_part.chars().filter(char::is_ascii_digit).collect();
            let int_digits = if int_digits.is_empty() { "0".to_string() } else { int_digits };
            format!("{}.{}", int_digits, &frac_part[1..])
        }
        None => kept.chars().filter(char::is_ascii_digit).collect(),
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Relative closeness of two numbers in `[0, 100]`
///
/// Unparseable input on either side scores 0; equal values score 100.
pub fn numeric_closeness<A, B>(a: &A, b: &B) -> u8
where
    A: NumericLike + ?Sized,
    B: NumericLike + ?Sized,
{
    match (a.to_numeric(), b.to_numeric()) {
        (Some(x), Some(y)) => closeness(x, y),
        _ => 0,
    }
}

/// [`numeric_closeness`] over already parsed values
pub fn closeness(a: f64, b: f64) -> u8 {
    if !a.is_finite() || !b.is_finite() {
        return 0;
    }
    if a == b {
        return 100;
    }
    let max = a.abs().max(b.abs());
    let relative_diff = (a - b).abs() / max;
    to_score(100.0 * (1.0 - relative_diff))
}

/// Linear remap of a 1–6 rating onto the 1–10 scale: `(v - 1) * 9 / 5 + 1`
pub fn six_to_ten(value: f64) -> f64 {
    (value - 1.0) * 9.0 / 5.0 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values() {
        for v in ["13", "13,5 %", "kr 149,90", "0", "1 200"] {
            assert_eq!(numeric_closeness(v, v), 100, "{}", v);
        }
        assert_eq!(numeric_closeness(&7.0, &7.0), 100);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [("4", "5"), ("12,5", "14"), ("100 kr", "250 kr"), ("1", "12")];
        for (a, b) in pairs {
            assert_eq!(numeric_closeness(a, b), numeric_closeness(b, a));
        }
    }

    #[test]
    fn test_relative_difference() {
        assert_eq!(numeric_closeness("10", "20"), 50);
        assert_eq!(numeric_closeness("4", "5"), 80);
        assert_eq!(numeric_closeness("1", "2"), 50);
        assert_eq!(numeric_closeness("99", "100"), 99);
        assert_eq!(numeric_closeness("0", "5"), 0);
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(numeric_closeness("ukjent", "5"), 0);
        assert_eq!(numeric_closeness("5", ""), 0);
        assert_eq!(numeric_closeness(&None::<f64>, &Some(5.0)), 0);
        assert_eq!(numeric_closeness(&f64::NAN, &5.0), 0);
    }

    #[test]
    fn test_mixed_types() {
        assert_eq!(numeric_closeness("12,5 %", &12.5), 100);
        assert_eq!(numeric_closeness(&Some(8.0), &10i64), 80);
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_numeric("13,5"), Some(13.5));
        assert_eq!(parse_numeric("13.5"), Some(13.5));
        assert_eq!(parse_numeric("1,234,567"), Some(1234567.0));
        assert_eq!(parse_numeric("1.234,50"), Some(1234.5));
        assert_eq!(parse_numeric("1,234.50"), Some(1234.5));
        assert_eq!(parse_numeric("149,- kr"), Some(149.0));
        assert_eq!(parse_numeric("12.5 kr."), Some(12.5));
        assert_eq!(parse_numeric("..."), None);
    }

    #[test]
    fn test_parse_leading_decimal_mark() {
        assert_eq!(parse_numeric(".5"), Some(0.5));
        assert_eq!(parse_numeric(",5"), Some(0.5));
        assert_eq!(parse_numeric(",5 %"), Some(0.5));
        assert_eq!(parse_numeric("ca. 13,5"), Some(13.5));
        assert_eq!(numeric_closeness("0,5", ".5"), 100);
    }

    #[test]
    fn test_six_to_ten() {
        assert_eq!(six_to_ten(1.0), 1.0);
        assert_eq!(six_to_ten(6.0), 10.0);
        assert!((six_to_ten(3.5) - 5.5).abs() < 1e-9);
    }
}
