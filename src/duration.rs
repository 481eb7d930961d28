//! Duration strings for the `-timeout` flag.
//!
//! Accepts the compact notation used by most command-line HTTP tools:
//! a possibly signed sequence of decimal numbers, each with an optional
//! fraction and a unit suffix, such as `"300ms"`, `"1.5s"` or `"2h45m"`.
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.

use std::time::Duration;

use thiserror::Error;

/// Largest magnitude a duration can hold, in nanoseconds (`2^63`).
const MAX_NANOS: u64 = 1 << 63;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Errors produced when a duration string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Input is empty, malformed, or overflows.
    #[error("invalid duration {input:?}")]
    Invalid {
        /// The rejected input.
        input: String,
    },

    /// A number was not followed by a unit.
    #[error("missing unit in duration {input:?}")]
    MissingUnit {
        /// The rejected input.
        input: String,
    },

    /// A number was followed by an unrecognized unit.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognized unit text.
        unit: String,
        /// The rejected input.
        input: String,
    },
}

impl DurationError {
    fn invalid(input: &str) -> Self {
        Self::Invalid {
            input: input.to_string(),
        }
    }
}

/// A parsed duration that keeps its sign.
///
/// `std::time::Duration` cannot be negative, but `-1s` is an accepted
/// timeout value (it disables the deadline), so the sign is carried
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDuration {
    /// Whether the input carried a leading `-`.
    pub negative: bool,
    /// Absolute value of the duration.
    pub magnitude: Duration,
}

impl SignedDuration {
    /// Interprets the duration as a request deadline.
    ///
    /// Zero and negative durations mean "no deadline".
    #[must_use]
    pub fn as_deadline(self) -> Option<Duration> {
        if self.negative || self.magnitude.is_zero() {
            None
        } else {
            Some(self.magnitude)
        }
    }
}

/// Parses a duration string such as `"10s"`, `"50ms"` or `"1h30m"`.
///
/// # Errors
///
/// Returns [`DurationError`] when the input is empty, a number has no unit,
/// a unit is unknown, or the total exceeds roughly 292 years.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use httpget_core::duration::parse_duration;
///
/// let parsed = parse_duration("1m30s").unwrap();
/// assert_eq!(parsed.magnitude, Duration::from_secs(90));
/// assert!(parse_duration("10").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<SignedDuration, DurationError> {
    let mut rest = input.as_bytes();
    let mut negative = false;

    if let Some((&sign, tail)) = rest.split_first()
        && (sign == b'-' || sign == b'+')
    {
        negative = sign == b'-';
        rest = tail;
    }

    // A bare zero needs no unit.
    if rest == b"0" {
        return Ok(SignedDuration {
            negative,
            magnitude: Duration::ZERO,
        });
    }
    if rest.is_empty() {
        return Err(DurationError::invalid(input));
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !(rest[0] == b'.' || rest[0].is_ascii_digit()) {
            return Err(DurationError::invalid(input));
        }

        let (whole, after_whole, has_whole) =
            leading_int(rest).ok_or_else(|| DurationError::invalid(input))?;
        rest = after_whole;

        let mut fraction = 0;
        let mut scale = 1.0_f64;
        let mut has_fraction = false;
        if let Some((b'.', tail)) = rest.split_first() {
            let (digits, digit_scale, after_fraction) = leading_fraction(tail);
            has_fraction = after_fraction.len() != tail.len();
            fraction = digits;
            scale = digit_scale;
            rest = after_fraction;
        }
        if !has_whole && !has_fraction {
            return Err(DurationError::invalid(input));
        }

        let unit_len = rest
            .iter()
            .position(|c| *c == b'.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit {
                input: input.to_string(),
            });
        }
        let (unit_bytes, after_unit) = rest.split_at(unit_len);
        rest = after_unit;

        // Unit boundaries fall on ASCII bytes, so the slice is valid UTF-8.
        let unit_text = String::from_utf8_lossy(unit_bytes);
        let unit = unit_nanos(&unit_text).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit_text.to_string(),
            input: input.to_string(),
        })?;

        if whole > MAX_NANOS / unit {
            return Err(DurationError::invalid(input));
        }
        let mut value = whole * unit;
        if fraction > 0 {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let fractional_nanos = (fraction as f64 * (unit as f64 / scale)) as u64;
            value = value
                .checked_add(fractional_nanos)
                .filter(|v| *v <= MAX_NANOS)
                .ok_or_else(|| DurationError::invalid(input))?;
        }
        total = total
            .checked_add(value)
            .filter(|v| *v <= MAX_NANOS)
            .ok_or_else(|| DurationError::invalid(input))?;
    }

    if !negative && total > MAX_NANOS - 1 {
        return Err(DurationError::invalid(input));
    }

    Ok(SignedDuration {
        negative,
        magnitude: Duration::from_nanos(total),
    })
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC Greek small letter mu
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consumes leading ASCII digits. Returns `None` on overflow.
fn leading_int(input: &[u8]) -> Option<(u64, &[u8], bool)> {
    let digits = input.iter().take_while(|c| c.is_ascii_digit()).count();
    let mut value: u64 = 0;
    for c in &input[..digits] {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(c - b'0')))
            .filter(|v| *v <= MAX_NANOS)?;
    }
    Some((value, &input[digits..], digits > 0))
}

/// Consumes fractional digits, dropping precision that would overflow.
fn leading_fraction(input: &[u8]) -> (u64, f64, &[u8]) {
    let digits = input.iter().take_while(|c| c.is_ascii_digit()).count();
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    let mut overflow = false;
    for c in &input[..digits] {
        if overflow {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(c - b'0')))
            .filter(|v| *v <= MAX_NANOS)
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &input[digits..])
}
