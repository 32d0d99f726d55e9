//! Amount text parsing and result formatting.
//!
//! The amount is kept as the raw text the user typed. It is only interpreted
//! when a rate arrives, and interpretation never fails: text without a numeric
//! prefix becomes `NaN` and flows through the multiplication unchanged.

use crate::CurrencyCode;

/// Interprets amount text the way browsers' `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5abc"` yields `12.5`. A leading `Infinity` (optionally signed) is
/// recognised. Anything else yields `NaN`.
pub fn parse_amount(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Renders a converted value with two decimals followed by the target code,
/// e.g. `9.20 EUR`. Non-finite values render as `NaN` / `Infinity`.
pub fn format_result(value: f64, target: CurrencyCode) -> String {
    let number = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        // -0.0 renders without a sign
        "0.00".to_string()
    } else {
        to_fixed_2(value)
    };
    format!("{} {}", number, target.code())
}

/// Two-decimal rendering where an exact tie rounds away from zero.
///
/// `{:.2}` rounds the exact binary value correctly but breaks ties to even.
/// A finite `f64` sits exactly halfway between two hundredths only when its
/// fractional part is an odd multiple of 1/8, so those are handled on the
/// integer `8 * |value|`.
fn to_fixed_2(value: f64) -> String {
    let eighths = value.abs() * 8.0;
    if eighths.fract() != 0.0 || eighths % 2.0 != 1.0 {
        return format!("{:.2}", value);
    }

    // |value| * 100 == 25 * eighths / 2, which is odd over two: round up.
    let cents = (25 * eighths as u128 + 1) / 2;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}
