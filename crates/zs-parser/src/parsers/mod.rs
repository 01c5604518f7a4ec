//! Line decoding for zap-style JSON logs.
//!
//! The decoder is stateless apart from the [`TimeFormat`] it was built
//! with; the stream driver supplies the line number for error context.

pub mod json_lines;

use crate::error::ParseResult;
use crate::types::{Entry, TimeFormat};

pub use json_lines::RESERVED_KEYS;

/// Decodes single lines into [`Entry`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineDecoder {
    format: TimeFormat,
}

impl LineDecoder {
    pub fn new(format: TimeFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// Decode one line. `line_number` is only used to label errors.
    pub fn decode(&self, line: &str, line_number: u64) -> ParseResult<Entry> {
        match self.format {
            TimeFormat::Unix => json_lines::decode::<f64>(line, line_number),
            TimeFormat::Iso8601 => json_lines::decode::<String>(line, line_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::types::Level;

    #[test]
    fn format_selects_timestamp_encoding() {
        let unix = LineDecoder::new(TimeFormat::Unix);
        let iso = LineDecoder::new(TimeFormat::Iso8601);
        let numeric = r#"{"level":"info","ts":1700000000,"msg":"a"}"#;
        let textual = r#"{"level":"info","ts":"2023-11-14T22:13:20Z","msg":"a"}"#;

        let a = unix.decode(numeric, 0).unwrap();
        let b = iso.decode(textual, 0).unwrap();
        assert_eq!(a.timestamp, b.timestamp);

        assert!(matches!(unix.decode(textual, 1), Err(ParseError::Decode { line: 1, .. })));
        assert!(matches!(iso.decode(numeric, 1), Err(ParseError::Decode { line: 1, .. })));
    }

    #[test]
    fn default_decoder_is_unix() {
        let decoder = LineDecoder::default();
        assert_eq!(decoder.format(), TimeFormat::Unix);
        let entry = decoder
            .decode(r#"{"level":"fatal","ts":12.0,"msg":"down"}"#, 0)
            .unwrap();
        assert_eq!(entry.level, Level::Fatal);
    }

    #[test]
    fn decode_is_independent_per_line() {
        let decoder = LineDecoder::default();
        assert!(decoder.decode("garbage", 0).is_err());
        let entry = decoder
            .decode(r#"{"level":"warn","ts":3.0,"msg":"fine","k":"v"}"#, 1)
            .unwrap();
        assert_eq!(entry.fields.len(), 1);
    }
}
