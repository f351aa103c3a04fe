//! Text to number parsing with an implied base.
//!
//! `0x`, `0o` and `0b` select hex, octal and binary, a leading `0` selects
//! octal, anything else is decimal. `_` may separate digits. Results are
//! range-checked against a bit width.

use alloc::borrow::Cow;
use core::fmt;
use core::num::IntErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumError {
    Syntax,
    Range,
}

impl fmt::Display for NumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => f.write_str("invalid syntax"),
            Self::Range => f.write_str("value out of range"),
        }
    }
}

fn split_radix(text: &str) -> (u32, &str) {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return (10, text);
    }
    match bytes[1] {
        b'x' | b'X' => (16, &text[2..]),
        b'o' | b'O' => (8, &text[2..]),
        b'b' | b'B' => (2, &text[2..]),
        _ => (8, &text[1..]),
    }
}

fn strip_underscores(digits: &str, prefixed: bool) -> Option<Cow<'_, str>> {
    if !digits.contains('_') {
        return Some(Cow::Borrowed(digits));
    }
    if digits.ends_with('_') || digits.contains("__") || (!prefixed && digits.starts_with('_')) {
        return None;
    }
    Some(Cow::Owned(digits.replace('_', "")))
}

fn parse_magnitude(text: &str) -> Result<u64, NumError> {
    let (radix, digits) = split_radix(text);
    let digits = strip_underscores(digits, radix != 10).ok_or(NumError::Syntax)?;
    if digits.starts_with(['+', '-']) {
        return Err(NumError::Syntax);
    }
    u64::from_str_radix(&digits, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumError::Range,
        _ => NumError::Syntax,
    })
}

/// Parses an unsigned integer that fits in `bits` bits.
pub(crate) fn parse_uint(text: &str, bits: u32) -> Result<u64, NumError> {
    let value = parse_magnitude(text)?;
    let max = if bits >= 64 { u64::MAX } else { (1 << bits) - 1 };
    if value > max {
        return Err(NumError::Range);
    }
    Ok(value)
}

/// Parses a signed integer that fits in `bits` bits.
pub(crate) fn parse_int(text: &str, bits: u32) -> Result<i64, NumError> {
    let (negative, magnitude) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let value = i128::from(parse_magnitude(magnitude)?);
    let bits = bits.clamp(1, 64);
    let limit = 1_i128 << (bits - 1);

    let value = if negative { -value } else { value };
    if value < -limit || value >= limit {
        return Err(NumError::Range);
    }
    // The range check above keeps this lossless.
    Ok(value as i64)
}

/// Returns `true` for the spellings that name an infinity on purpose.
fn is_infinity(text: &str) -> bool {
    let name = text.trim_start_matches(['+', '-']);
    name.eq_ignore_ascii_case("inf") || name.eq_ignore_ascii_case("infinity")
}

/// Parses a float, rounding to `f32` precision when `bits` is 32.
///
/// Finite text that rounds to an infinity is out of range.
pub(crate) fn parse_float(text: &str, bits: u32) -> Result<f64, NumError> {
    let value = if bits == 32 {
        text.parse::<f32>().map(f64::from)
    } else {
        text.parse::<f64>()
    }
    .map_err(|_| NumError::Syntax)?;

    if value.is_infinite() && !is_infinity(text) {
        return Err(NumError::Range);
    }
    Ok(value)
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{NumError, parse_bool, parse_float, parse_int, parse_uint};

    #[test]
    fn implied_base() {
        assert_eq!(parse_int("42", 64), Ok(42));
        assert_eq!(parse_int("-0x1f", 64), Ok(-31));
        assert_eq!(parse_int("0o17", 64), Ok(15));
        assert_eq!(parse_int("017", 64), Ok(15));
        assert_eq!(parse_int("0b101", 8), Ok(5));
        assert_eq!(parse_int("0", 8), Ok(0));
        assert_eq!(parse_int("1_000", 32), Ok(1000));
        assert_eq!(parse_uint("0x_ff", 8), Ok(255));
    }

    #[test]
    fn rejects() {
        assert_eq!(parse_int("", 64), Err(NumError::Syntax));
        assert_eq!(parse_int("4.2", 64), Err(NumError::Syntax));
        assert_eq!(parse_int("08", 64), Err(NumError::Syntax));
        assert_eq!(parse_int("1__0", 64), Err(NumError::Syntax));
        assert_eq!(parse_int("--1", 64), Err(NumError::Syntax));
        assert_eq!(parse_uint("-1", 64), Err(NumError::Syntax));
        assert_eq!(parse_uint("+1", 64), Err(NumError::Syntax));
    }

    #[test]
    fn ranges() {
        assert_eq!(parse_int("127", 8), Ok(127));
        assert_eq!(parse_int("-128", 8), Ok(-128));
        assert_eq!(parse_int("128", 8), Err(NumError::Range));
        assert_eq!(parse_int("-9223372036854775808", 64), Ok(i64::MIN));
        assert_eq!(parse_uint("256", 8), Err(NumError::Range));
        assert_eq!(parse_uint("18446744073709551616", 64), Err(NumError::Range));
    }

    #[test]
    fn floats_and_bools() {
        assert_eq!(parse_float("1.5", 64), Ok(1.5));
        assert_eq!(parse_float("0.1", 32), Ok(f64::from(0.1_f32)));
        assert!(parse_float("x", 64).is_err());
        assert_eq!(parse_float("1e400", 64), Err(NumError::Range));
        assert_eq!(parse_float("-1e400", 64), Err(NumError::Range));
        assert_eq!(parse_float("1e40", 32), Err(NumError::Range));
        assert_eq!(parse_float("1e40", 64), Ok(1e40));
        assert_eq!(parse_float("-Inf", 64), Ok(f64::NEG_INFINITY));
        assert_eq!(parse_float("infinity", 32), Ok(f64::INFINITY));

        assert_eq!(parse_bool("T"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }
}
