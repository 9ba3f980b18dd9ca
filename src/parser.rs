//! Decoding of the backend's JSON envelopes.
//!
//! Every reply is wrapped as `{"data": ...}`. List endpoints put their
//! records under `data.items`; login puts the token under
//! `data.accessToken`. Records are validated one by one so a bad record is
//! reported with its position instead of leaking partially-filled values.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ConsoleError, Result};

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct Items {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    access_token: String,
}

fn schema(resource: &'static str, reason: impl Into<String>) -> ConsoleError {
    ConsoleError::Schema {
        resource,
        reason: reason.into(),
    }
}

/// Decodes `{"data": {"items": [...]}}` into typed records.
///
/// # Errors
///
/// Returns [`ConsoleError::Schema`] if the envelope is not JSON, lacks
/// `data.items`, or any record fails to decode as `T`.
pub fn parse_list<T: DeserializeOwned>(bytes: &[u8], resource: &'static str) -> Result<Vec<T>> {
    let envelope: Envelope<Items> =
        serde_json::from_slice(bytes).map_err(|e| schema(resource, format!("invalid JSON: {e}")))?;

    let items = envelope
        .data
        .and_then(|d| d.items)
        .ok_or_else(|| schema(resource, "missing data.items"))?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| schema(resource, format!("record {index}: {e}")))
        })
        .collect()
}

/// Decodes a login reply. `data: null` means the credentials were rejected.
pub fn parse_login(bytes: &[u8]) -> Result<String> {
    let envelope: Envelope<LoginData> =
        serde_json::from_slice(bytes).map_err(|e| schema("login", format!("invalid JSON: {e}")))?;

    match envelope.data {
        Some(d) if !d.access_token.is_empty() => Ok(d.access_token),
        _ => Err(ConsoleError::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drive, Student};

    #[test]
    fn test_parse_student_list() {
        let body = br#"{"data":{"items":[
            {"uniqueId":1,"id":"S1","name":"A","class":"5","isVaccinated":true},
            {"uniqueId":2,"id":"S2","name":"B","class":"6","isVaccinated":false}
        ]}}"#;
        let students: Vec<Student> = parse_list(body, "student").unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].name, "B");
    }

    #[test]
    fn test_parse_empty_list() {
        let drives: Vec<Drive> = parse_list(br#"{"data":{"items":[]}}"#, "drive").unwrap();
        assert!(drives.is_empty());
    }

    #[test]
    fn test_malformed_record_reports_position() {
        let body = br#"{"data":{"items":[
            {"uniqueId":1,"name":"A","class":"5"},
            {"uniqueId":"two","name":"B","class":"6"}
        ]}}"#;
        let err = parse_list::<Student>(body, "student").unwrap_err();
        match err {
            ConsoleError::Schema { resource, reason } => {
                assert_eq!(resource, "student");
                assert!(reason.starts_with("record 1:"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_items_is_schema_error() {
        let err = parse_list::<Drive>(br#"{"data":null}"#, "drive").unwrap_err();
        assert!(matches!(err, ConsoleError::Schema { .. }));
    }

    #[test]
    fn test_invalid_json_is_schema_error() {
        let err = parse_list::<Drive>(b"<html>", "drive").unwrap_err();
        assert!(matches!(err, ConsoleError::Schema { .. }));
    }

    #[test]
    fn test_parse_login_token() {
        let token = parse_login(br#"{"data":{"accessToken":"tok"}}"#).unwrap();
        assert_eq!(token, "tok");
    }

    #[test]
    fn test_parse_login_rejected() {
        let err = parse_login(br#"{"data":null,"message":"invalid"}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidCredentials));
    }

    #[test]
    fn test_absent_data_field() {
        let err = parse_list::<Student>(br#"{"message":"ok"}"#, "student").unwrap_err();
        assert!(matches!(err, ConsoleError::Schema { .. }));

        let err = parse_login(br#"{"message":"invalid"}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidCredentials));
    }
}
