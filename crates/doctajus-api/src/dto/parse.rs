//! Parsers for raw string values from multipart forms and query strings.
//!
//! Every parser returns a validation error naming the offending field.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;

/// `None` for empty or whitespace-only input, otherwise the trimmed text.
pub fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn parse_bool(field: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" | "" => Ok(false),
        other => Err(AppError::validation(format!(
            "{field} must be a boolean, got '{other}'"
        ))),
    }
}

pub fn parse_uuid(field: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::validation(format!("{field} must be a UUID, got '{raw}'")))
}

/// Parse one of the string-backed domain enums.
pub fn parse_enum<T>(raw: &str) -> AppResult<T>
where
    T: FromStr<Err = AppError>,
{
    raw.parse()
}

/// Tags given either as a JSON array (`["civil","urgente"]`) or as a
/// comma-separated list (`civil, urgente`). Blank tags are dropped.
pub fn parse_etiquetas(raw: &str) -> AppResult<Vec<String>> {
    let trimmed = raw.trim();
    let tags: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed).map_err(|e| {
            AppError::validation(format!("etiquetas must be a JSON array of strings: {e}"))
        })?
    } else {
        trimmed.split(',').map(String::from).collect()
    };

    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// A timestamp given as RFC 3339 or as a plain `YYYY-MM-DD` date. Plain
/// dates map to the start of the day, or to its last instant when
/// `end_of_day` is set.
pub fn parse_fecha(field: &str, raw: &str, end_of_day: bool) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!(
            "{field} must be a date (YYYY-MM-DD) or an RFC 3339 timestamp"
        ))
    })?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .unwrap_or_default();
    Ok(date.and_time(time).and_utc())
}
