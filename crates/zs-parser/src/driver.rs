//! Stream driver: pulls lines, decodes them and fans results out.
//!
//! The pull loop is blocking and single-threaded. The only state shared
//! across threads is the run state, which a [`StopHandle`] can flip from
//! anywhere. A stop takes effect between lines; an in-flight blocking read
//! is not interrupted.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::parsers::LineDecoder;
use crate::source::{LineSource, ReaderSource};
use crate::subscribers::Subscribers;
use crate::types::{Entry, TimeFormat};

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;
const CLOSED: u8 = 3;

/// Lifecycle of a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Constructed, not started.
    Idle,
    /// Pulling lines.
    Running,
    /// Stop requested or input ended; close callbacks not yet done.
    Stopped,
    /// Close callbacks have run. Terminal.
    Closed,
}

impl ParserState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            IDLE => Self::Idle,
            RUNNING => Self::Running,
            STOPPED => Self::Stopped,
            _ => Self::Closed,
        }
    }
}

/// Cloneable handle that asks a parser to stop after the current line.
#[derive(Debug, Clone)]
pub struct StopHandle {
    state: Arc<AtomicU8>,
}

impl StopHandle {
    /// Request a stop. Safe from any thread; a no-op once the parser has
    /// closed. A stop requested before `start` makes the run read nothing.
    pub fn stop(&self) {
        let prev = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| match s {
                IDLE | RUNNING => Some(STOPPED),
                _ => None,
            });
        if prev.is_ok() {
            tracing::debug!("parser stop requested");
        }
    }

    pub fn state(&self) -> ParserState {
        ParserState::from_raw(self.state.load(Ordering::Acquire))
    }
}

/// Counters for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Lines handed to the decoder.
    pub lines: u64,
    /// Entries dispatched.
    pub entries: u64,
    /// Errors dispatched, including a terminal source error.
    pub errors: u64,
}

/// Zap JSON log parser over a [`LineSource`].
pub struct Parser<S> {
    source: S,
    decoder: LineDecoder,
    current_line: u64,
    state: Arc<AtomicU8>,
    subscribers: Subscribers,
}

impl<R: BufRead> Parser<ReaderSource<R>> {
    /// Parser over a buffered reader, honoring every field of `config`.
    pub fn from_reader(reader: R, config: &ParserConfig) -> Self {
        Self::with_config(ReaderSource::new(reader, config.max_line_bytes), config)
    }
}

impl<S: LineSource> Parser<S> {
    /// Parser with Unix timestamps.
    pub fn new(source: S) -> Self {
        Self::with_config(source, &ParserConfig::default())
    }

    /// Parser using the time format from `config`. The line length limit
    /// only applies to sources built by [`Parser::from_reader`].
    pub fn with_config(source: S, config: &ParserConfig) -> Self {
        Self {
            source,
            decoder: LineDecoder::new(config.time_format),
            current_line: 0,
            state: Arc::new(AtomicU8::new(IDLE)),
            subscribers: Subscribers::new(),
        }
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.decoder = LineDecoder::new(format);
    }

    pub fn time_format(&self) -> TimeFormat {
        self.decoder.format()
    }

    pub fn on_entry(&mut self, callback: impl FnMut(&Entry) + Send + 'static) -> &mut Self {
        self.subscribers.on_entry(callback);
        self
    }

    pub fn on_error(&mut self, callback: impl FnMut(&ParseError) + Send + 'static) -> &mut Self {
        self.subscribers.on_error(callback);
        self
    }

    pub fn on_close(&mut self, callback: impl FnMut() + Send + 'static) -> &mut Self {
        self.subscribers.on_close(callback);
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: self.state.clone(),
        }
    }

    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    pub fn state(&self) -> ParserState {
        ParserState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Zero-based number of the next line to be decoded.
    pub fn current_line(&self) -> u64 {
        self.current_line
    }

    /// Parse until the source ends, fails, or a stop is requested.
    ///
    /// Blocks the calling thread. Close callbacks run exactly once, after
    /// which the parser is closed and further calls return empty stats.
    pub fn start(&mut self) -> RunStats {
        let mut stats = RunStats::default();

        match self
            .state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                tracing::info!(time_format = ?self.decoder.format(), "parser started");
                self.run(&mut stats);
                let _ = self.state.compare_exchange(
                    RUNNING,
                    STOPPED,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                );
            }
            Err(STOPPED) => {
                tracing::debug!("parser stopped before start, skipping input");
            }
            Err(_) => {
                tracing::warn!("start called on a closed parser");
                return stats;
            }
        }

        self.subscribers.emit_close();
        self.state.store(CLOSED, Ordering::Release);
        tracing::info!(
            lines = stats.lines,
            entries = stats.entries,
            errors = stats.errors,
            "parser closed"
        );
        stats
    }

    fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) == RUNNING
    }

    fn run(&mut self, stats: &mut RunStats) {
        while self.is_running() {
            let line = match self.source.next_line() {
                None => break,
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    tracing::warn!(line = self.current_line, error = %e, "log source failed");
                    self.subscribers.emit_error(&ParseError::SourceRead(e));
                    stats.errors += 1;
                    break;
                }
            };
            // The read may have blocked for a long time; honor a stop that
            // arrived meanwhile.
            if !self.is_running() {
                break;
            }

            match self.decoder.decode(&line, self.current_line) {
                Ok(entry) => {
                    tracing::trace!(line = self.current_line, level = %entry.level, "entry decoded");
                    self.subscribers.emit_entry(&entry);
                    stats.entries += 1;
                }
                Err(e) => {
                    tracing::debug!(line = self.current_line, error = %e, "line rejected");
                    self.subscribers.emit_error(&e);
                    stats.errors += 1;
                }
            }
            self.current_line += 1;
            stats.lines += 1;
        }
    }
}

impl<S: LineSource + Send + 'static> Parser<S> {
    /// Run [`Parser::start`] on tokio's blocking pool.
    ///
    /// A panicking callback surfaces as a `JoinError` from the handle.
    pub fn spawn(mut self) -> (StopHandle, tokio::task::JoinHandle<RunStats>) {
        let handle = self.stop_handle();
        let join = tokio::task::spawn_blocking(move || self.start());
        (handle, join)
    }
}

impl<S> std::fmt::Debug for Parser<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("decoder", &self.decoder)
            .field("current_line", &self.current_line)
            .field("state", &ParserState::from_raw(self.state.load(Ordering::Acquire)))
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
