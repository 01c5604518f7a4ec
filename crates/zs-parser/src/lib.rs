//! Streaming parser for zap-style JSON logs.
//!
//! Reads one JSON object per line, normalizes it into an [`Entry`] and hands
//! entries and errors to registered callbacks. Timestamps may be fractional
//! Unix seconds or ISO-8601 strings, selected up front via [`TimeFormat`].
//! A malformed line produces an error and parsing continues with the next.

pub mod config;
pub mod driver;
pub mod error;
pub mod mock;
pub mod parsers;
pub mod source;
pub mod subscribers;
pub mod timestamp;
pub mod types;

// Re-export key types for convenience
pub use config::ParserConfig;
pub use driver::{Parser, ParserState, RunStats, StopHandle};
pub use error::{ParseError, ParseResult};
pub use mock::MockLineSource;
pub use parsers::{LineDecoder, RESERVED_KEYS};
pub use source::{LineSource, ReaderSource};
pub use subscribers::Subscribers;
pub use types::{Entry, Level, TimeFormat};
