//! Format checks for optional lead fields.
//!
//! Every check takes a possibly absent value and answers `true`/`false`.
//! Nothing here errors or panics: a missing or unparsable value is simply invalid.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid")
});

// `[0-9]` rather than `\d`, which would also match non-ASCII digits
static IPV4_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
        .expect("ipv4 pattern is valid")
});

/// Numeric check for amounts such as `mortgage_balance` and `property_value`.
///
/// Accepts anything `f64` parses (integers, decimals, signs, exponents) after
/// trimming surrounding whitespace. `NaN` and infinities are rejected.
pub fn is_numeric(value: Option<&str>) -> bool {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .is_some_and(f64::is_finite)
}

/// Calendar date in exactly `YYYY-MM-DD` form that actually exists.
pub fn is_valid_date(value: Option<&str>) -> bool {
    let Some(v) = value else {
        return false;
    };

    // chrono alone would accept `2024-1-5`
    DATE_SHAPE.is_match(v) && NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok()
}

/// Dotted-quad IPv4 address with every octet in 0..=255.
///
/// Leading zeros inside a group (`010.0.0.1`) are tolerated as long as the
/// group has at most three digits.
pub fn is_valid_ipv4(value: Option<&str>) -> bool {
    let Some(caps) = value.and_then(|v| IPV4_SHAPE.captures(v)) else {
        return false;
    };

    caps.iter()
        .skip(1)
        .flatten()
        .all(|octet| octet.as_str().parse::<u16>().is_ok_and(|n| n <= 255))
}
