//! Money representation and amount parsing
//!
//! CRITICAL: All money values are i64 (cents). Record amounts arrive from
//! the store as decimal strings (e.g. "1500.00"); they are converted to
//! cents exactly once, at the aggregation boundary, and every sum and
//! comparison after that is integer arithmetic. No binary floating point
//! ever touches a currency sum.
//!
//! Two parsing paths exist on purpose:
//!
//! - [`parse_amount`] is strict. Malformed or negative input is a
//!   [`ValidationError`] naming the offending value. Used for store
//!   records, which are never silently coerced.
//! - [`coerce_amount_input`] / [`coerce_rate_input`] mirror the original
//!   interactive fields: anything unparseable becomes 0. This silently
//!   masks typos (a bad rate becomes a 0% bonus) and is preserved as-is;
//!   see DESIGN.md for the open question on hardening it.

use crate::errors::ValidationError;

/// Monetary value in cents.
pub type Money = i64;

/// Tolerance for the split/pool conservation check: one cent.
///
/// The split invariant (`split_a + split_b == total_bonus`) is compared
/// within this tolerance, never with exact equality on user-entered
/// figures.
pub const SPLIT_TOLERANCE: Money = 1;

/// Parse a decimal amount string into cents.
///
/// Accepts an optional leading minus, digits, and at most two fraction
/// digits ("1500", "1500.5", "1500.50"). More than two fraction digits,
/// empty input, or any non-numeric character is malformed. Negative
/// amounts parse but are the caller's problem to reject where the domain
/// forbids them (cost records do; bonus splits do not).
///
/// # Example
/// ```
/// use contract_settlement_core_rs::core::money::parse_amount;
///
/// assert_eq!(parse_amount("1500.00").unwrap(), 150_000);
/// assert_eq!(parse_amount("1500.5").unwrap(), 150_050);
/// assert_eq!(parse_amount("0").unwrap(), 0);
/// assert!(parse_amount("abc").is_err());
/// assert!(parse_amount("1.005").is_err());
/// ```
pub fn parse_amount(raw: &str) -> Result<Money, ValidationError> {
    let s = raw.trim();
    let malformed = || ValidationError::MalformedAmount {
        value: raw.to_string(),
    };

    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(malformed());
    }
    if frac_part.len() > 2 {
        return Err(malformed());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(malformed());
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| malformed())?
    };

    // Pad "5" to 50 cents, "50" stays 50.
    let cents: i64 = match frac_part.len() {
        0 => 0,
        1 => frac_part.parse::<i64>().map_err(|_| malformed())? * 10,
        _ => frac_part.parse().map_err(|_| malformed())?,
    };

    let total = whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(cents))
        .ok_or_else(malformed)?;

    Ok(if negative { -total } else { total })
}

/// Parse an interactive amount field, coercing garbage to 0.
///
/// Matches the original UI's `parseFloat(value) || 0` fallback for the
/// bonus split fields. Negative values pass through; one side may carry
/// a negative allocation.
pub fn coerce_amount_input(raw: &str) -> Money {
    parse_amount(raw).unwrap_or(0)
}

/// Parse an interactive rate field (percent), coercing garbage to 0.0.
pub fn coerce_rate_input(raw: &str) -> f64 {
    let v: f64 = raw.trim().parse().unwrap_or(0.0);
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Format cents as a decimal string with two fraction digits.
///
/// Inverse of [`parse_amount`] for store payloads.
///
/// # Example
/// ```
/// use contract_settlement_core_rs::core::money::format_amount;
///
/// assert_eq!(format_amount(150_050), "1500.50");
/// assert_eq!(format_amount(-25), "-0.25");
/// ```
pub fn format_amount(cents: Money) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
