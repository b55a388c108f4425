//! Display formatting for prices, percentages and timestamps.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Placeholder shown for missing values.
pub const MISSING: &str = "-";

/// Two-decimal price, or `-` when unknown.
pub fn price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => MISSING.to_string(),
    }
}

/// Two-decimal percentage, or `-` when unknown.
pub fn pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => MISSING.to_string(),
    }
}

/// Percentage with an explicit sign for non-negative values.
pub fn signed_pct(value: Option<f64>) -> String {
    // Fold -0.0 into 0.0 so it does not print as "+-0.00%".
    match value.map(|v| if v == 0.0 { 0.0 } else { v }) {
        Some(v) if v >= 0.0 => format!("+{:.2}%", v),
        Some(v) => format!("{:.2}%", v),
        None => MISSING.to_string(),
    }
}

/// Two-decimal ratio such as reward-to-risk.
pub fn ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Price band `low – high`, or `-` when either bound is unknown.
pub fn band(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (Some(lo), Some(hi)) => format!("{} – {}", price(Some(lo)), price(Some(hi))),
        _ => MISSING.to_string(),
    }
}

/// Parse a server timestamp. Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Local date and time, or the raw string when it cannot be parsed.
pub fn date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None if raw.trim().is_empty() => MISSING.to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_price_and_pct() {
        assert_eq!(price(Some(150.0)), "150.00");
        assert_eq!(price(None), "-");
        assert_eq!(pct(Some(12.345)), "12.35%");
        assert_eq!(pct(None), "-");
    }

    #[test]
    fn test_signed_pct() {
        assert_eq!(signed_pct(Some(2.0)), "+2.00%");
        assert_eq!(signed_pct(Some(0.0)), "+0.00%");
        assert_eq!(signed_pct(Some(-1.5)), "-1.50%");
    }

    #[test]
    fn test_signed_pct_negative_zero() {
        let v: f64 = serde_json::from_str("-0.0").unwrap();
        assert!(v.is_sign_negative());
        assert_eq!(signed_pct(Some(v)), "+0.00%");
    }

    #[test]
    fn test_band_requires_both_bounds() {
        assert_eq!(band(Some(150.75), Some(155.25)), "150.75 – 155.25");
        assert_eq!(band(None, Some(1.0)), "-");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let naive = parse_timestamp("2025-03-04T05:06:07.123456").unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2025, 3, 4));
        assert_eq!(naive.hour(), 5);

        let zoned = parse_timestamp("2025-03-04T05:06:07+02:00").unwrap();
        assert_eq!(zoned.hour(), 3);

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_date_falls_back_to_raw() {
        assert_eq!(date("yesterday"), "yesterday");
        assert_eq!(date(""), "-");
    }
}
