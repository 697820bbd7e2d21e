//! Value formats for the scalar part of a quantity
//!
//! Supports the usual specifier letters plus digit patterns:
//! - `G`/`G4`: general (shortest round-trip or N significant digits)
//! - `F2`: fixed-point
//! - `N2`: fixed-point with group separators
//! - `E3`: exponential, `1.234E+003`
//! - `R`: round-trip
//! - `0.00`, `#,##0.0#`: custom digit patterns

use std::fmt::Write;
use serde::{Deserialize, Serialize};
use crate::config::NumberLocale;
use crate::error::{FormatErrorReason, FormatStringError};

/// Default decimals for `F` and `N` without a precision
const DEFAULT_FIXED_DIGITS: u8 = 2;

/// Default mantissa decimals for `E` without a precision
const DEFAULT_EXPONENT_DIGITS: u8 = 6;

/// Magnitudes outside `[1e-5, 1e15)` switch the general format to exponential
const GENERAL_LOWER: f64 = 1e-5;
const GENERAL_UPPER: f64 = 1e15;

/// How to render a scalar value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueFormat {
    /// Shortest round-trip form, or the given number of significant digits
    General(Option<u8>),
    Fixed(u8),
    /// Fixed-point with group separators
    Number(u8),
    Exponential { digits: u8, upper: bool },
    RoundTrip,
    Custom(DigitPattern),
}

impl Default for ValueFormat {
    fn default() -> Self {
        ValueFormat::General(None)
    }
}

impl ValueFormat {
    /// Parse a value format specifier; an empty specifier is the general format
    pub fn parse(spec: &str) -> Result<Self, FormatStringError> {
        let trimmed = spec.trim();
        let invalid = || {
            FormatStringError::new(spec, FormatErrorReason::InvalidValueFormat(trimmed.to_string()))
        };

        let mut chars = trimmed.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return Ok(ValueFormat::default()),
        };
        let rest = chars.as_str();

        let precision = if rest.is_empty() {
            None
        } else if rest.len() <= 2 && rest.bytes().all(|b| b.is_ascii_digit()) {
            rest.parse::<u8>().ok()
        } else {
            None
        };
        let has_bad_precision = !rest.is_empty() && precision.is_none();

        match first {
            '0' | '#' | '.' | ',' => DigitPattern::parse(trimmed).map(ValueFormat::Custom).ok_or_else(invalid),
            _ if has_bad_precision => Err(invalid()),
            'G' | 'g' => Ok(ValueFormat::General(precision.filter(|&p| p > 0))),
            'F' | 'f' => Ok(ValueFormat::Fixed(precision.unwrap_or(DEFAULT_FIXED_DIGITS))),
            'N' | 'n' => Ok(ValueFormat::Number(precision.unwrap_or(DEFAULT_FIXED_DIGITS))),
            'E' | 'e' => Ok(ValueFormat::Exponential {
                digits: precision.unwrap_or(DEFAULT_EXPONENT_DIGITS),
                upper: first == 'E',
            }),
            'R' | 'r' if rest.is_empty() => Ok(ValueFormat::RoundTrip),
            _ => Err(invalid()),
        }
    }
}

/// A custom pattern such as `0.00` or `#,##0.0#`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitPattern {
    pub min_integer_digits: u8,
    pub min_fraction_digits: u8,
    pub max_fraction_digits: u8,
    pub grouping: bool,
}

impl DigitPattern {
    fn parse(pattern: &str) -> Option<Self> {
        if !pattern.chars().all(|c| matches!(c, '0' | '#' | '.' | ',')) {
            return None;
        }
        if !pattern.contains(['0', '#']) {
            return None;
        }

        let mut parts = pattern.splitn(2, '.');
        let integer = parts.next().unwrap_or("");
        let fraction = parts.next().unwrap_or("");
        if fraction.contains(['.', ',']) {
            return None;
        }

        let count = |s: &str, c: char| s.chars().filter(|&x| x == c).count();
        let min_integer_digits = u8::try_from(count(integer, '0')).ok()?;
        let min_fraction_digits = u8::try_from(count(fraction, '0')).ok()?;
        let max_fraction_digits = u8::try_from(fraction.len()).ok()?;

        Some(DigitPattern {
            min_integer_digits,
            min_fraction_digits,
            max_fraction_digits,
            grouping: integer.contains(','),
        })
    }

    fn write(&self, value: f64, out: &mut String) {
        let mut text = format!("{:.*}", self.max_fraction_digits as usize, value.abs());
        if let Some(dot) = text.find('.') {
            let min_len = dot + 1 + self.min_fraction_digits as usize;
            while text.len() > min_len && text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                text.pop();
            }
        }

        let (integer, fraction) = match text.find('.') {
            Some(dot) => (&text[..dot], &text[dot + 1..]),
            None => (text.as_str(), ""),
        };

        let mut integer = integer.to_string();
        if integer == "0" && self.min_integer_digits == 0 {
            integer.clear();
        }
        while integer.len() < self.min_integer_digits as usize {
            integer.insert(0, '0');
        }
        if self.grouping {
            integer = group_digits(&integer);
        }

        let is_zero = integer.chars().chain(fraction.chars()).all(|c| c == '0' || c == ',');
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        if integer.is_empty() && fraction.is_empty() {
            out.push('0');
            return;
        }
        out.push_str(&integer);
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
    }
}

/// Render `value` into `out` using `format` and the separators of `locale`
pub fn format_value(value: f64, format: &ValueFormat, locale: &NumberLocale, out: &mut String) {
    if value.is_nan() {
        out.push_str("NaN");
        return;
    }
    if value.is_infinite() {
        if value < 0.0 {
            out.push(locale.negative_sign);
        }
        out.push('∞');
        return;
    }

    let start = out.len();
    match format {
        ValueFormat::General(None) | ValueFormat::RoundTrip => write_shortest(value, out),
        ValueFormat::General(Some(digits)) => write_significant(value, *digits, out),
        ValueFormat::Fixed(digits) => {
            let _ = write!(out, "{:.*}", *digits as usize, value);
        }
        ValueFormat::Number(digits) => {
            let fixed = format!("{:.*}", *digits as usize, value);
            out.push_str(&group_digits(&fixed));
        }
        ValueFormat::Exponential { digits, upper } => {
            let letter = if *upper { 'E' } else { 'e' };
            let raw = format!("{:.*e}", *digits as usize, value);
            write_exponent(&raw, letter, 3, out);
        }
        ValueFormat::Custom(pattern) => pattern.write(value, out),
    }

    if !locale.is_invariant() {
        localize(out, start, locale);
    }
}

/// Shortest representation that parses back to the same value
fn write_shortest(value: f64, out: &mut String) {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(GENERAL_LOWER..GENERAL_UPPER).contains(&magnitude) {
        let raw = format!("{:e}", value);
        write_exponent(&raw, 'E', 2, out);
    } else {
        let _ = write!(out, "{}", value);
    }
}

fn write_significant(value: f64, digits: u8, out: &mut String) {
    if value == 0.0 {
        out.push('0');
        return;
    }

    let digits = digits.max(1) as i32;
    let raw = format!("{:.*e}", (digits - 1) as usize, value);
    let exponent = raw
        .rsplit_once('e')
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(0);

    if exponent >= -5 && exponent < digits {
        let decimals = (digits - 1 - exponent).max(0) as usize;
        let mut fixed = format!("{:.*}", decimals, value);
        trim_fraction_zeros(&mut fixed);
        out.push_str(&fixed);
    } else {
        let (mantissa, _) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
        let mut mantissa = mantissa.to_string();
        trim_fraction_zeros(&mut mantissa);
        let _ = write!(out, "{}E{}{:02}", mantissa, if exponent < 0 { '-' } else { '+' }, exponent.abs());
    }
}

/// Rewrite Rust's `1.5e-7` as `1.5E-07` (sign always present, zero-padded exponent)
fn write_exponent(raw: &str, letter: char, min_digits: usize, out: &mut String) {
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exponent),
            };
            let _ = write!(out, "{}{}{}{:0>width$}", mantissa, letter, sign, digits, width = min_digits);
        }
        None => out.push_str(raw),
    }
}

fn trim_fraction_zeros(text: &mut String) {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
}

/// Insert `,` every three digits of the integer part
fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(fraction);
    grouped
}

/// Swap invariant separators for the locale's, in place from `start`
fn localize(out: &mut String, start: usize, locale: &NumberLocale) {
    let localized: String = out[start..]
        .chars()
        .map(|c| match c {
            '.' => locale.decimal_separator,
            ',' => locale.group_separator,
            '-' => locale.negative_sign,
            other => other,
        })
        .collect();
    out.truncate(start);
    out.push_str(&localized);
}

/// Read a leading decimal number; returns the value and the byte offset after it
pub fn read_number(text: &str, locale: &NumberLocale) -> Option<(f64, usize)> {
    let mut normalized = String::new();
    let mut chars = text.char_indices().peekable();
    let mut end = 0;
    let mut digits = 0;

    if let Some(&(_, c)) = chars.peek() {
        if c == '+' || c == '-' || c == locale.negative_sign {
            normalized.push(if c == '+' { '+' } else { '-' });
            chars.next();
        }
    }

    let mut seen_separator = false;
    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() {
            normalized.push(c);
            digits += 1;
            end = i + c.len_utf8();
        } else if c == locale.decimal_separator && !seen_separator {
            seen_separator = true;
            normalized.push('.');
            end = i + c.len_utf8();
        } else {
            break;
        }
        chars.next();
    }

    if digits == 0 {
        return None;
    }

    // Exponent is only consumed when digits follow
    let rest = &text[end..];
    let mut exp_chars = rest.char_indices();
    if let Some((_, 'e' | 'E')) = exp_chars.next() {
        let after = &rest[1..];
        let sign_len = usize::from(after.starts_with(['+', '-']));
        let exp_digits = after[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
        if exp_digits > 0 {
            normalized.push('e');
            normalized.push_str(&after[..sign_len + exp_digits]);
            end += 1 + sign_len + exp_digits;
        }
    }

    normalized.parse::<f64>().ok().map(|value| (value, end))
}

/// Split a composite format such as `"F1 km"` into its value and symbol parts
///
/// A leading specifier letter is only treated as a value format when it is
/// followed by whitespace and a non-empty remainder, so `"F"` alone stays a
/// unit symbol.
pub fn split_composite(format: &str) -> (&str, &str) {
    let body = format.trim_start();
    let offset = format.len() - body.len();

    let pattern_len = body
        .find(|c: char| !matches!(c, '0' | '#' | '.' | ','))
        .unwrap_or(body.len());
    if pattern_len > 0 && body[..pattern_len].contains(['0', '#']) {
        return format.split_at(offset + pattern_len);
    }

    if let Some(first) = body.chars().next() {
        if matches!(first, 'G' | 'g' | 'F' | 'f' | 'N' | 'n' | 'E' | 'e' | 'R' | 'r') {
            let digits = body[1..].bytes().take_while(u8::is_ascii_digit).count();
            let end = 1 + digits;
            let rest = &body[end..];
            if digits <= 2 && rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
                return format.split_at(offset + end);
            }
        }
    }

    ("", format)
}
