//! Lenient field decoders for the backend's JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserialize, Deserializer};

/// Parses an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// timestamp (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_wire_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn datetime<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    parse_wire_datetime(&s).ok_or_else(|| de::Error::custom(format!("invalid date `{s}`")))
}

pub fn optional_datetime<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(d)? {
        None => Ok(None),
        Some(s) => parse_wire_datetime(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date `{s}`"))),
    }
}

pub fn optional_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(d)? {
        None => Ok(None),
        Some(s) => parse_wire_date(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date `{s}`"))),
    }
}

/// Calendar date as the backend wrote it. Offset timestamps keep their own
/// local date rather than being shifted to UTC first.
pub fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    parse_wire_datetime(s).map(|dt| dt.date_naive())
}

/// `null` and `""` both decode to `None`.
pub fn non_empty<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(d)?;
    Ok(s.filter(|v| !v.trim().is_empty()))
}

/// `null` decodes to the type's default.
pub fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Accepts `"5"` or `5` and yields `"5"`.
pub fn string_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_bare_date_is_utc_midnight() {
        let dt = parse_wire_datetime("2024-05-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_with_fraction() {
        let dt = parse_wire_datetime("2024-05-01T13:45:10.123").unwrap();
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_offset_converted() {
        let dt = parse_wire_datetime("2024-05-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_wire_datetime("next tuesday").is_none());
        assert!(parse_wire_datetime("").is_none());
    }

    #[test]
    fn test_wire_date_keeps_offset_calendar_day() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_wire_date("2024-01-01T00:00:00+05:30"), Some(day));
        assert_eq!(parse_wire_date("2024-01-01T23:30:00-08:00"), Some(day));
        assert_eq!(parse_wire_date("2024-01-01T10:00:00"), Some(day));
        assert_eq!(parse_wire_date("2024-01-01"), Some(day));
        assert_eq!(parse_wire_date("soon"), None);
    }
}
