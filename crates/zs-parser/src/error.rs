//! Decoder and stream error types.

use thiserror::Error;

/// Errors reported to error subscribers while a stream is being parsed.
///
/// Every per-line variant carries the zero-based ordinal of the offending
/// line, taken from the same counter the driver advances.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("json parsing on line {line} failed: {source}")]
    Decode {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("no timestamp in message at line {line}")]
    MissingTimestamp { line: u64 },

    #[error("time parsing on line {line} failed for {raw:?}: {message}")]
    TimeParse {
        line: u64,
        raw: String,
        message: String,
    },

    #[error("unknown level at line {line}: {level}")]
    UnknownLevel { line: u64, level: String },

    #[error("reading log source failed: {0}")]
    SourceRead(#[from] std::io::Error),
}

impl ParseError {
    /// Line the error refers to. `None` for source failures, which are not
    /// tied to a decoded line.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Decode { line, .. }
            | Self::MissingTimestamp { line }
            | Self::TimeParse { line, .. }
            | Self::UnknownLevel { line, .. } => Some(*line),
            Self::SourceRead(_) => None,
        }
    }
}

/// Convenience alias for decoder results.
pub type ParseResult<T> = Result<T, ParseError>;
