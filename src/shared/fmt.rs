//! Formatting helpers for the human-readable readout.
//!
//! Ratios between two assets span many orders of magnitude (GST priced in SOL
//! sits around `1e-4`, SOL priced in USDT around `1e2`), so the number of
//! decimal places is picked from the magnitude. Values with more than five
//! leading fractional zeros switch to subscript notation: `0.0(6)15` reads as
//! `0.00000015`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const SUBSCRIPT_THRESHOLD: u32 = 5;
const SIGNIFICANT_DIGITS: u32 = 4;
const MAX_DECIMALS: u32 = 8;

/// Format a `Decimal` for display.
pub fn display(value: &Decimal) -> String {
    let abs = value.abs();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    if abs >= Decimal::ONE_HUNDRED {
        return format!("{}{}", sign, group_thousands(&abs.round_dp(0)));
    }
    if abs >= Decimal::ONE || abs.is_zero() {
        return format!("{}{}", sign, group_thousands(&abs.round_dp(2)));
    }

    let zeros = leading_fraction_zeros(&abs);
    if zeros > SUBSCRIPT_THRESHOLD {
        let digits = significant_digits(&abs);
        return format!("{}0.0({}){}", sign, zeros, digits);
    }

    let rounded = abs.round_dp((zeros + 3).min(MAX_DECIMALS)).normalize();
    format!("{}{}", sign, rounded)
}

/// Format an instant the way the readout shows it: `YYYY-MM-DD HH:MM:SS`.
pub fn display_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Number of zeros between the decimal point and the first significant digit
/// of a value in `(0, 1)`.
fn leading_fraction_zeros(abs: &Decimal) -> u32 {
    let digits = abs.mantissa().unsigned_abs().to_string().len() as u32;
    abs.scale().saturating_sub(digits)
}

/// Up to four significant digits after the leading zeros, trailing zeros dropped.
fn significant_digits(abs: &Decimal) -> String {
    let mantissa = abs.mantissa().unsigned_abs().to_string();
    let keep = (SIGNIFICANT_DIGITS as usize).min(mantissa.len());
    let kept = mantissa[..keep].trim_end_matches('0');
    if kept.is_empty() {
        "0".to_string()
    } else {
        kept.to_string()
    }
}

/// Render a non-negative decimal with `,` thousands separators and no
/// trailing fractional zeros.
fn group_thousands(abs: &Decimal) -> String {
    let text = abs.normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
