//! # Temporal Types — Minute-Precision Timestamps
//!
//! Defines `Timestamp`, the date type used for pass expiration, relevance
//! and date-valued fields.
//!
//! ## Canonical Form
//!
//! `YYYY-MM-DDTHH:MM±HH:MM`: a W3C date-time profile with minute precision
//! and an explicit numeric offset. Output is always normalized to UTC, so
//! every timestamp formats as `...+00:00`.
//!
//! ## Parsing
//!
//! - Any numeric offset is accepted and converted to UTC.
//! - The `Z` designator is rejected; the canonical form uses numeric offsets.
//! - Seconds and fractional seconds are rejected, not truncated.
//!
//! Because the stored value has no sub-minute component,
//! `Timestamp::parse(&t.to_w3c())` returns `t` for every timestamp.

use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// Output pattern. The offset is written literally because the value is UTC.
const W3C_OUTPUT: &str = "%Y-%m-%dT%H:%M+00:00";

/// Parse pattern: minute precision with a `±HH:MM` offset.
const W3C_INPUT: &str = "%Y-%m-%dT%H:%M%:z";

/// Length of `YYYY-MM-DDTHH:MM±HH:MM`.
const W3C_LEN: usize = 22;

/// A UTC timestamp truncated to minute precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating seconds.
/// - [`Timestamp::parse()`]: from the canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to minutes.
    pub fn now() -> Self {
        Self(truncate_to_minutes(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, discarding
    /// seconds and sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_minutes(dt))
    }

    /// Create a timestamp from any fixed-offset time, converting to UTC.
    pub fn from_fixed(dt: DateTime<FixedOffset>) -> Self {
        Self::from_utc(dt.with_timezone(&Utc))
    }

    /// Create a timestamp from UTC calendar components.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidTimestamp` if the components do not name
    /// a real instant.
    pub fn from_ymd_hm(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, CodecError> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .map(Self)
            .ok_or_else(|| CodecError::InvalidTimestamp {
                input: format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}"),
                reason: "not a valid calendar date and time".to_string(),
            })
    }

    /// Parse the canonical `YYYY-MM-DDTHH:MM±HH:MM` form.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidTimestamp` if:
    /// - the string uses the `Z` designator,
    /// - the string carries seconds or fractional seconds,
    /// - the string is not a valid date-time with a numeric offset,
    /// - any field is unpadded or the offset lacks its colon.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let reject = |reason: &str| CodecError::InvalidTimestamp {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if s.ends_with('Z') || s.ends_with('z') {
            return Err(reject("Z designator is not accepted; use a numeric offset"));
        }
        if s.len() != W3C_LEN {
            return Err(reject("expected YYYY-MM-DDTHH:MM±HH:MM (minute precision)"));
        }

        let dt = DateTime::parse_from_str(s, W3C_INPUT).map_err(|e| reject(&e.to_string()))?;
        // chrono accepts unpadded fields and colon-less offsets; only the
        // exact rendering in the input's own offset is canonical.
        if dt.format(W3C_INPUT).to_string() != s {
            return Err(reject("expected YYYY-MM-DDTHH:MM±HH:MM (minute precision)"));
        }
        Ok(Self::from_fixed(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render in canonical form (e.g., `2026-01-15T12:00+00:00`).
    pub fn to_w3c(&self) -> String {
        self.0.format(W3C_OUTPUT).to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_w3c())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_w3c())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Drop seconds and nanoseconds.
fn truncate_to_minutes(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every minute between 1970 and 9999 survives format then parse.
        #[test]
        fn timestamp_round_trip(minutes in 0i64..(8_000 * 365 * 24 * 60)) {
            let dt = DateTime::from_timestamp(minutes * 60, 0).unwrap();
            let ts = Timestamp::from_utc(dt);
            prop_assert_eq!(Timestamp::parse(&ts.to_w3c()), Ok(ts));
        }

        /// Seconds never survive construction.
        #[test]
        fn truncation_is_idempotent(secs in 0i64..4_000_000_000) {
            let dt = DateTime::from_timestamp(secs, 0).unwrap();
            let ts = Timestamp::from_utc(dt);
            prop_assert_eq!(ts.epoch_secs() % 60, 0);
            prop_assert_eq!(Timestamp::from_utc(*ts.as_datetime()), ts);
        }
    }
}
