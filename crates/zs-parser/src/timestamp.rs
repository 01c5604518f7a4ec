//! Timestamp normalization for both `ts` encodings.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use regex::Regex;

use crate::error::{ParseError, ParseResult};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// chrono alone accepts single-digit months/days, so the exact layout is
/// checked first.
static RE_ISO_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{1,9})?Z$").unwrap()
});

const ISO_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Convert fractional seconds since the Unix epoch into an instant.
///
/// Whole seconds are floored toward negative infinity and the remainder is
/// rounded to the nearest nanosecond. Returns `None` for non-finite input
/// or values outside chrono's representable range.
///
/// Zero converts to the epoch here; treating it as "absent" is the
/// decoder's job.
pub fn from_unix_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let mut whole = secs.floor();
    let mut nanos = ((secs - whole) * NANOS_PER_SEC).round();
    if nanos >= NANOS_PER_SEC {
        whole += 1.0;
        nanos = 0.0;
    }
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos as u32)
}

/// Parse a `YYYY-MM-DDTHH:MM:SS[.fraction]Z` string into whole seconds
/// since the Unix epoch.
///
/// The fraction is validated but dropped: textual timestamps only keep
/// one-second resolution.
pub fn parse_iso8601(raw: &str, line: u64) -> ParseResult<f64> {
    let fail = |message: String| ParseError::TimeParse {
        line,
        raw: raw.to_string(),
        message,
    };

    if !RE_ISO_TS.is_match(raw) {
        return Err(fail(format!("expected layout {ISO_LAYOUT}")));
    }
    let parsed =
        NaiveDateTime::parse_from_str(raw, ISO_LAYOUT).map_err(|e| fail(e.to_string()))?;
    // chrono folds second 60 into 59 with nanos past one second.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(fail("second out of range".into()));
    }
    Ok(parsed.and_utc().timestamp() as f64)
}
