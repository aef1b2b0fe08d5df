//! Measurement parsing and formatting
//!
//! Seller input is free text from numeric fields. Parsing is lenient: the
//! leading number is used and anything after it is ignored, so a value
//! still being typed ("12.", "-") never blocks the row.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
});

/// Parse the leading number of a measurement.
///
/// # Examples
/// ```
/// use lotsize::services::measure::parse_measure;
///
/// assert_eq!(parse_measure("12.5"), Some(12.5));
/// assert_eq!(parse_measure(" 8g"), Some(8.0));
/// assert_eq!(parse_measure("abc"), None);
/// ```
pub fn parse_measure(text: &str) -> Option<f64> {
    let found = LEADING_NUMBER.find(text.trim_start())?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parsed value, or 0 when the text holds no number
pub fn measure_or_zero(text: &str) -> f64 {
    parse_measure(text).unwrap_or(0.0)
}

/// Divisor for per-set averages: the set count, or 1 when missing or zero
pub fn set_divisor(text: &str) -> f64 {
    parse_measure(text)
        .filter(|&value| value != 0.0)
        .unwrap_or(1.0)
}

/// Fixed 3-decimal rendering used for all weights (`"5.000"`).
///
/// Halfway values round away from zero (`0.0625` gives `"0.063"`).
pub fn format_weight(value: f64) -> String {
    // Normalise -0.0 so empty rows never render "-0.000"
    let value = if value == 0.0 { 0.0 } else { value };

    // A float sits exactly halfway between two thousandths only when it is an
    // odd number of sixteenths; every other value formats exactly as is.
    let sixteenths = value * 16.0;
    if sixteenths.fract() == 0.0 && sixteenths % 2.0 != 0.0 && sixteenths.abs() < 1e30 {
        let n = sixteenths as i128;
        let thousandths = (n * 125 + n.signum()) / 2;
        let sign = if thousandths < 0 { "-" } else { "" };
        let abs = thousandths.unsigned_abs();
        return format!("{}{}.{:03}", sign, abs / 1000, abs % 1000);
    }
    format!("{:.3}", value)
}
