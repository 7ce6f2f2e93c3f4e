//! Indian-Rupee amount formatting.
//!
//! Amounts arrive precomputed and loosely typed (numbers, numeric strings,
//! or garbage). Record values are read as `f64` and rounded to paise from
//! that binary value, so `2.675` shows as `₹2.67`. Anything that cannot be
//! read as a finite number renders as zero.

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Currency symbol prefixed to every amount.
pub const RUPEE: &str = "₹";

/// Rendering of any amount that cannot be converted.
pub const ZERO_AMOUNT: &str = "₹0.00";

/// Format a record value as `₹1,234.50`.
///
/// Missing, null, non-numeric and non-finite values yield exactly
/// [`ZERO_AMOUNT`]; the failure never reaches the caller.
pub fn format_currency(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => ZERO_AMOUNT.to_string(),
        Some(v) => match to_amount(v) {
            Some(amount) => format_amount(amount),
            None => {
                warn!("amount {v} is not a finite number, rendering as {ZERO_AMOUNT}");
                ZERO_AMOUNT.to_string()
            }
        },
    }
}

/// Numeric view of a JSON value: numbers and numeric strings (`" 42 "`,
/// `"+1e3"`) convert, everything else is `None`. Infinities and NaN,
/// spelled out or overflowing, are `None` too.
pub fn to_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

/// Format a finite `f64` with the rupee prefix, thousands separators and
/// two decimals, rounding the exact binary value.
pub fn format_amount(amount: f64) -> String {
    let plain = format!("{:.2}", amount.abs());
    assemble(amount.is_sign_negative(), &plain)
}

/// Format an exact decimal the same way; midpoints round to even.
pub fn format_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let plain = format!("{:.2}", rounded.abs());
    assemble(rounded.is_sign_negative(), &plain)
}

/// `₹`, the sign unless the rounded amount is zero, grouped integer digits,
/// then the two decimals of `plain`.
fn assemble(negative: bool, plain: &str) -> String {
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, "00"));
    let is_zero = int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0');

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 4);
    out.push_str(RUPEE);
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
