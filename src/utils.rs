use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Extract the calendar year from a submission date
/// Supports:
/// - ISO 8601 date: "2020-03-14"
/// - RFC 3339: "2020-03-14T09:30:00Z"
/// - Naive datetime: "2020-03-14T09:30:00" or "2020-03-14 09:30:00"
///
/// Anything else yields `None`.
pub fn parse_year(input: &str) -> Option<i32> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.year());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.year());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.year())
}

/// Decode a count that may arrive as an integer, a float, a numeric string or null.
///
/// Negative and non-finite values decode as `None`.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64),
        _ => None,
    }
}
