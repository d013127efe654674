use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for numeric coercion
static DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());
static INFINITY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([+-]?)Infinity$").unwrap());
static RADIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0([xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").unwrap());

/// Coerce a form value to a number the way the browser's `Number(value)` does.
///
/// Supported forms:
/// - Empty or whitespace only: `0`
/// - Decimal: "42", "-3.5", ".5", "1e3"
/// - Infinity: "Infinity", "-Infinity"
/// - Radix literals: "0x1F", "0o17", "0b101"
///
/// Anything else yields `NaN`.
///
/// # Examples
/// ```
/// use marathon_pace::utils::js_number;
/// assert_eq!(js_number(" 42 "), 42.0);
/// assert_eq!(js_number(""), 0.0);
/// assert_eq!(js_number("0x10"), 16.0);
/// assert!(js_number("abc").is_nan());
/// ```
pub fn js_number(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if DECIMAL_REGEX.is_match(trimmed) {
        return trimmed.parse::<f64>().unwrap_or(f64::NAN);
    }

    if let Some(captures) = INFINITY_REGEX.captures(trimmed) {
        return if &captures[1] == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    if let Some(captures) = RADIX_REGEX.captures(trimmed) {
        let literal = &captures[1];
        let radix = match &literal[..1] {
            "x" | "X" => 16,
            "o" | "O" => 8,
            _ => 2,
        };
        return literal[1..]
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * radix as f64 + d as f64);
    }

    f64::NAN
}

/// Floor `value` into `[min, max]`, or return `fallback` if it is not finite.
pub fn clamp_int(value: f64, min: i64, max: i64, fallback: i64) -> i64 {
    if !value.is_finite() {
        return fallback;
    }
    value.floor().clamp(min as f64, max as f64) as i64
}
