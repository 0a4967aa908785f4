//! Shared parsing utilities for raw incident rows.
//!
//! The Socrata portal returns every field as an optional string (or
//! occasionally a bare number), so dates and hectare values need
//! tolerant parsing. A value that fails to parse becomes `None`, since
//! zero and "unknown" are semantically distinct and must not be conflated.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses a Socrata datetime string (ISO 8601 floating timestamp with
/// optional fractional seconds).
#[must_use]
pub fn parse_socrata_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

/// Parses a non-negative hectare value from a raw JSON field.
///
/// Accepts both string-encoded numbers (the usual Socrata shape) and
/// bare JSON numbers. Missing, unparseable, or negative values yield
/// `None`, never `0.0`.
#[must_use]
pub fn parse_hectares(value: Option<&serde_json::Value>) -> Option<f64> {
    let parsed = match value? {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        serde_json::Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    if parsed.is_finite() && parsed >= 0.0 {
        Some(parsed)
    } else {
        None
    }
}

/// Extracts a trimmed text field from a raw JSON row, mapping missing
/// and empty values to `None`.
#[must_use]
pub fn parse_text(value: Option<&serde_json::Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_socrata_date_with_fractional() {
        let dt = parse_socrata_date("2024-01-15T14:30:00.000").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00 UTC");
    }

    #[test]
    fn parses_socrata_date_without_fractional() {
        let dt = parse_socrata_date("2024-01-15T14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00 UTC");
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_socrata_date("not-a-date").is_none());
        assert!(parse_socrata_date("").is_none());
    }

    #[test]
    fn parses_hectares_from_string_and_number() {
        assert_eq!(parse_hectares(Some(&json!("10.5"))), Some(10.5));
        assert_eq!(parse_hectares(Some(&json!(" 3 "))), Some(3.0));
        assert_eq!(parse_hectares(Some(&json!(7.25))), Some(7.25));
    }

    #[test]
    fn unparseable_hectares_are_none_not_zero() {
        assert_eq!(parse_hectares(Some(&json!("bad"))), None);
        assert_eq!(parse_hectares(Some(&json!(""))), None);
        assert_eq!(parse_hectares(None), None);
        assert_eq!(parse_hectares(Some(&json!(null))), None);
    }

    #[test]
    fn negative_hectares_are_rejected() {
        assert_eq!(parse_hectares(Some(&json!("-4.0"))), None);
    }

    #[test]
    fn text_fields_trim_to_none_when_empty() {
        assert_eq!(parse_text(Some(&json!("  Quema  "))), Some("Quema".to_string()));
        assert_eq!(parse_text(Some(&json!("   "))), None);
        assert_eq!(parse_text(Some(&json!(null))), None);
        assert_eq!(parse_text(None), None);
    }
}
