// src/domain/time.rs

use chrono::{DateTime, Utc};
use serde::Serializer;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::ServerError;

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

pub fn parse_rfc3339(raw: &str) -> Result<i64, ServerError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.timestamp())
        .map_err(|e| ServerError::BadRequest(format!("invalid timestamp {raw:?}: {e}")))
}

fn to_rfc3339(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339())
}

/// Serializes unix seconds as an RFC3339 string.
pub fn serialize_unix<S: Serializer>(secs: &i64, s: S) -> Result<S::Ok, S::Error> {
    match to_rfc3339(*secs) {
        Some(text) => s.serialize_str(&text),
        None => Err(serde::ser::Error::custom(format!("timestamp out of range: {secs}"))),
    }
}

pub fn serialize_unix_opt<S: Serializer>(secs: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
    match secs {
        Some(secs) => serialize_unix(secs, s),
        None => s.serialize_none(),
    }
}
