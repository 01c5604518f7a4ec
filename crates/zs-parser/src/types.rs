//! Core output types: severity levels, timestamp encodings and entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ParseError, ParseResult};

// ── Level ─────────────────────────────────────────────────────

/// Severity of a log entry, ordered from least to most severe.
///
/// Variant declaration order matters — `#[derive(Ord)]` uses it,
/// so Debug < Info < Warn < Error < DPanic < Panic < Fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    DPanic,
    Panic,
    Fatal,
}

impl Level {
    /// All levels in ascending severity.
    pub const ALL: [Level; 7] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::DPanic,
        Self::Panic,
        Self::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Map a lowercase level token to a `Level`.
    ///
    /// Matching is exact: `"INFO"` or `"warning"` are not accepted.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "dpanic" => Some(Self::DPanic),
            "panic" => Some(Self::Panic),
            "fatal" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Like [`Level::from_token`], reporting unknown tokens against `line`.
    pub fn resolve(token: &str, line: u64) -> ParseResult<Self> {
        Self::from_token(token).ok_or_else(|| ParseError::UnknownLevel {
            line,
            level: token.to_string(),
        })
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Time Format ───────────────────────────────────────────────

/// Wire encoding of the `ts` field. Selected once, before a run starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// Floating-point seconds since the Unix epoch.
    #[default]
    Unix,
    /// `YYYY-MM-DDTHH:MM:SS[.fff]Z`.
    Iso8601,
}

// ── Entry ─────────────────────────────────────────────────────

/// A decoded log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Source location annotation, if the logger recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    /// Every key of the line other than `level`, `caller`, `msg` and `ts`.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
