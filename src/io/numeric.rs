//! Localized amount parsing
//!
//! Indonesian-locale amounts arrive as thousand-separated strings like
//! `"15.000"` or `"1.234.567,89"`.
//! Sessions exported from other locales use the en-US convention
//! (`"1,234,567.89"`). This module normalizes both into plain `f64`
//! before anything downstream sees them, so the engine only ever works
//! with numbers.
//!
//! # Disambiguation rules
//!
//! - Both `.` and `,` present: the separator that occurs last is the
//!   decimal mark, the other is the grouping mark
//! - One separator kind, occurring more than once: grouping mark
//! - One separator, exactly once, followed by exactly three digits:
//!   grouping mark (`"15.000"` is fifteen thousand rupiah, not 15.0)
//! - Otherwise: decimal mark

use crate::types::SplitError;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Parse a localized, possibly thousand-separated amount string
///
/// Accepts an optional leading `Rp` currency marker and either id-ID or
/// en-US separator conventions.
///
/// # Arguments
///
/// * `input` - The raw string, e.g. `"15.000"`, `"Rp 1.234,50"`, `"1,200.75"`
///
/// # Returns
///
/// * `Ok(f64)` with the parsed value
/// * `Err(SplitError::InvalidAmount)` when the string is not a number
///
/// # Examples
///
/// ```
/// use patungan::io::numeric::parse_amount;
///
/// assert_eq!(parse_amount("15.000").unwrap(), 15_000.0);
/// assert_eq!(parse_amount("1.234.567,89").unwrap(), 1_234_567.89);
/// assert_eq!(parse_amount("1,234,567.89").unwrap(), 1_234_567.89);
/// ```
pub fn parse_amount(input: &str) -> Result<f64, SplitError> {
    let trimmed = input
        .trim()
        .trim_start_matches("Rp")
        .trim_start_matches("rp")
        .trim();
    if trimmed.is_empty() {
        return Err(SplitError::invalid_amount(input));
    }

    let normalized = normalize_separators(trimmed).ok_or_else(|| {
        SplitError::invalid_amount(input)
    })?;

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SplitError::invalid_amount(input))
}

/// Rewrite grouped/localized separators into plain `1234.56` form
///
/// Returns `None` when the separator layout is inconsistent: two decimal
/// marks, grouping runs that aren't exactly three digits, or characters
/// that are neither digits nor separators.
fn normalize_separators(s: &str) -> Option<String> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };
    if rest.is_empty()
        || !rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let dots = rest.matches('.').count();
    let commas = rest.matches(',').count();

    let decimal_sep = if dots > 0 && commas > 0 {
        // The later of the two marks is the decimal separator.
        let (sep, count) = if rest.rfind('.') > rest.rfind(',') {
            ('.', dots)
        } else {
            (',', commas)
        };
        if count > 1 {
            return None;
        }
        Some(sep)
    } else if dots + commas == 1 {
        let sep = if dots == 1 { '.' } else { ',' };
        let tail_len = rest.len() - rest.rfind(sep)? - 1;
        // A lone separator with a three-digit tail is a grouping mark.
        (tail_len != 3).then_some(sep)
    } else {
        // Zero or repeated separators of one kind: all grouping marks.
        None
    };

    let (int_part, frac_part) = match decimal_sep {
        Some(sep) => {
            let idx = rest.rfind(sep)?;
            (&rest[..idx], Some(&rest[idx + 1..]))
        }
        None => (rest, None),
    };

    // Grouping marks must form 1-3 digit head groups followed by
    // exactly-3-digit runs ("1.234.567", never "1.2.3").
    let group_sep = ['.', ','].into_iter().find(|&c| int_part.contains(c));
    let int_digits = match group_sep {
        Some(sep) => {
            let groups: Vec<&str> = int_part.split(sep).collect();
            if groups[0].is_empty() || groups[0].len() > 3 {
                return None;
            }
            if groups.iter().skip(1).any(|g| g.len() != 3) {
                return None;
            }
            groups.concat()
        }
        None => int_part.to_string(),
    };
    if int_digits.is_empty() {
        return None;
    }

    match frac_part {
        Some(frac) if !frac.is_empty() => Some(format!("{sign}{int_digits}.{frac}")),
        Some(_) => None,
        None => Some(format!("{sign}{int_digits}")),
    }
}

/// Serde deserializer for amount fields
///
/// Session JSON normally carries plain numbers, but hand-edited or
/// form-exported files sometimes hold the raw input strings. This
/// accepts both.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a localized amount string")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
            parse_amount(value).map_err(|e| E::custom(e.to_string()))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}
