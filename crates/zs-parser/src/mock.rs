//! Mock line source for testing — serves pre-loaded lines.

use std::collections::VecDeque;
use std::io;

use crate::source::LineSource;

/// A line source backed by an in-memory queue, with an optional terminal
/// read failure served once the queue is drained.
#[derive(Debug, Default)]
pub struct MockLineSource {
    lines: VecDeque<String>,
    failure: Option<io::Error>,
    pulled: usize,
}

impl MockLineSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue another line.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Fail with `error` after the queued lines have been served.
    pub fn fail_with(mut self, error: io::Error) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of successful `next_line` calls so far.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    /// Create a mock with a sample zap production log (Unix timestamps).
    pub fn with_unix_sample() -> Self {
        Self::from_lines([
            r#"{"level":"info","ts":1700000000.5,"caller":"server/main.go:42","msg":"listening","addr":":8080"}"#,
            r#"{"level":"debug","ts":1700000001.25,"caller":"server/conn.go:88","msg":"accepted connection","remote":"10.0.0.7:51234"}"#,
            r#"{"level":"warn","ts":1700000002.125,"caller":"server/pool.go:17","msg":"pool near capacity","in_use":95,"max":100}"#,
            r#"{"level":"error","ts":1700000003.0,"caller":"server/db.go:201","msg":"query failed","error":"connection reset","retry":true}"#,
            r#"{"level":"info","ts":1700000004.75,"msg":"shutting down","signal":"SIGTERM"}"#,
        ])
    }

    /// Create a mock with a sample zap development log (ISO-8601 timestamps).
    pub fn with_iso_sample() -> Self {
        Self::from_lines([
            r#"{"level":"info","ts":"2023-11-14T22:13:20.000Z","caller":"cmd/worker.go:30","msg":"worker started","id":1}"#,
            r#"{"level":"error","ts":"2023-11-14T22:13:21.512Z","caller":"cmd/worker.go:77","msg":"job failed","job":"reindex"}"#,
            r#"{"level":"dpanic","ts":"2023-11-14T22:13:22Z","msg":"invariant broken","stacktrace":"main.main\n\tmain.go:12"}"#,
        ])
    }
}

impl LineSource for MockLineSource {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        if let Some(line) = self.lines.pop_front() {
            self.pulled += 1;
            return Some(Ok(line));
        }
        self.failure.take().map(Err)
    }
}
