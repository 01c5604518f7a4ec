//! Zap-style JSON line records.
//!
//! A line is first decoded as a generic JSON object, then the reserved keys
//! are pulled out into typed values and whatever remains is the field bag.
//! Both `ts` encodings go through the same path; the timestamp type is the
//! only thing that differs, and each implements [`RawTimestamp`] to reduce
//! itself to fractional Unix seconds.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ParseError, ParseResult};
use crate::timestamp;
use crate::types::{Entry, Level};

/// Keys promoted to dedicated `Entry` attributes. They never appear in
/// [`Entry::fields`].
pub const RESERVED_KEYS: [&str; 4] = ["level", "caller", "msg", "ts"];

/// A wire timestamp that can be reduced to fractional Unix seconds.
pub(crate) trait RawTimestamp {
    fn unix_seconds(&self, line: u64) -> ParseResult<f64>;
}

impl RawTimestamp for f64 {
    fn unix_seconds(&self, _line: u64) -> ParseResult<f64> {
        Ok(*self)
    }
}

impl RawTimestamp for String {
    fn unix_seconds(&self, line: u64) -> ParseResult<f64> {
        timestamp::parse_iso8601(self, line)
    }
}

/// Remove `key` from `fields` and decode it. Absent and `null` values
/// both yield `V::default()`.
fn take_field<V>(fields: &mut Map<String, Value>, key: &str, line: u64) -> ParseResult<V>
where
    V: DeserializeOwned + Default,
{
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(V::default()),
        Some(value) => {
            serde_json::from_value(value).map_err(|source| ParseError::Decode { line, source })
        }
    }
}

/// Decode one line whose `ts` field has wire type `T`.
///
/// A key repeated within the line keeps its last value.
pub(crate) fn decode<T>(line: &str, line_number: u64) -> ParseResult<Entry>
where
    T: DeserializeOwned + Default + RawTimestamp,
{
    let mut fields: Map<String, Value> =
        serde_json::from_str(line).map_err(|source| ParseError::Decode {
            line: line_number,
            source,
        })?;

    let level: String = take_field(&mut fields, "level", line_number)?;
    let ts: T = take_field(&mut fields, "ts", line_number)?;
    let caller: Option<String> = take_field(&mut fields, "caller", line_number)?;
    let msg: String = take_field(&mut fields, "msg", line_number)?;

    let secs = ts.unix_seconds(line_number)?;
    // Zero doubles as "field absent"; a real epoch timestamp is rejected too.
    if secs == 0.0 {
        return Err(ParseError::MissingTimestamp { line: line_number });
    }

    let level = Level::resolve(&level, line_number)?;

    let timestamp =
        timestamp::from_unix_seconds(secs).ok_or_else(|| ParseError::TimeParse {
            line: line_number,
            raw: secs.to_string(),
            message: "timestamp out of range".into(),
        })?;

    Ok(Entry {
        caller,
        fields,
        level,
        message: msg,
        timestamp,
    })
}
