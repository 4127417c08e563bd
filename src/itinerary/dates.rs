//! Date marker normalization
//!
//! A date marker carries a local wall-clock time and its UTC offset. The
//! normalized form carries the same instant expressed in UTC:
//!
//! ```text
//! D(2024-03-01T10:00+02:00)   ->  D(2024-03-01T08:00Z)
//! T07(2024-03-01T22:30-05:00) ->  T07(2024-03-02T03:30Z)
//! ```
//!
//! The flag and the optional qualifier are carried through untouched. Markers
//! already in UTC come back unchanged, so normalizing twice is the same as
//! normalizing once.
//!
//! A shift that would push the year outside `0000..=9999` cannot be written
//! back as a four-digit marker and is rejected.

use super::matcher::{is_date_marker, DATE_REGEX};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Utc};
use std::fmt;

const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A date marker whose timestamp could not be turned into an instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub token: String,
    pub reason: String,
}

impl DateParseError {
    fn new(token: &str, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::error::Error for DateParseError {}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid date marker '{}': {}", self.token, self.reason)
    }
}

/// The pieces of a date marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMarker {
    pub flag: char,
    pub qualifier: Option<String>,
    pub instant: DateTime<FixedOffset>,
}

impl DateMarker {
    /// Parse a whole date marker token such as `T12(2024-03-01T10:00Z)`.
    pub fn parse(token: &str) -> Result<Self, DateParseError> {
        if !is_date_marker(token) {
            return Err(DateParseError::new(token, "not a date marker"));
        }
        let caps = DATE_REGEX
            .captures(token)
            .ok_or_else(|| DateParseError::new(token, "not a date marker"))?;

        let flag = caps["flag"]
            .chars()
            .next()
            .ok_or_else(|| DateParseError::new(token, "missing flag"))?;
        let qualifier = caps.name("qualifier").map(|q| q.as_str().to_string());

        let local = NaiveDateTime::parse_from_str(&caps["stamp"], STAMP_FORMAT)
            .map_err(|e| DateParseError::new(token, e.to_string()))?;
        let offset = parse_zone(&caps["zone"]).ok_or_else(|| {
            DateParseError::new(token, format!("offset out of range: {}", &caps["zone"]))
        })?;
        let instant = offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| DateParseError::new(token, "timestamp not representable"))?;

        Ok(Self {
            flag,
            qualifier,
            instant,
        })
    }

    /// The marker moved onto UTC.
    pub fn to_utc(&self) -> Self {
        Self {
            flag: self.flag,
            qualifier: self.qualifier.clone(),
            instant: self.instant.with_timezone(&Utc).fixed_offset(),
        }
    }
}

impl fmt::Display for DateMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "{}", qualifier)?;
        }
        let zone = if self.instant.offset().local_minus_utc() == 0 {
            "Z".to_string()
        } else {
            self.instant.format("%:z").to_string()
        };
        write!(f, "({}{})", self.instant.format(STAMP_FORMAT), zone)
    }
}

/// `Z` or `+HH:MM` / `-HH:MM` into a fixed offset. `None` when out of range.
fn parse_zone(zone: &str) -> Option<FixedOffset> {
    if zone == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = match zone.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, minutes) = zone[1..].split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Normalize one date marker token onto UTC.
pub fn normalize(token: &str) -> Result<String, DateParseError> {
    let marker = DateMarker::parse(token)?.to_utc();
    let year = marker.instant.year();
    if !(0..=9999).contains(&year) {
        return Err(DateParseError::new(
            token,
            format!("year {} out of range after shift to UTC", year),
        ));
    }
    Ok(marker.to_string())
}
