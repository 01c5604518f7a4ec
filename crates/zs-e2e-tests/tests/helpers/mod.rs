//! Shared harness for end-to-end parser tests.
//!
//! Records every callback the parser fires into one ordered event log, and
//! provides a channel-backed line source whose reads block like a live
//! stream.

#![allow(dead_code)]

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, Once};

use tracing_subscriber::EnvFilter;
use zs_parser::{Entry, LineSource, ParseError, Parser};

/// One observed callback invocation.
#[derive(Debug, Clone)]
pub enum Event {
    Entry(Entry),
    Error(String, Option<u64>),
    Close,
}

/// Ordered log of callback invocations, shared with the parser's callbacks.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    /// Register entry, error and close callbacks on `parser`.
    pub fn attach<S: LineSource>(parser: &mut Parser<S>) -> Self {
        let recorder = Self::default();

        let r = recorder.clone();
        parser.on_entry(move |entry| r.push(Event::Entry(entry.clone())));
        let r = recorder.clone();
        parser.on_error(move |err: &ParseError| r.push(Event::Error(err.to_string(), err.line())));
        let r = recorder.clone();
        parser.on_close(move || r.push(Event::Close));

        recorder
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Entry(entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<(String, Option<u64>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(msg, line) => Some((msg, line)),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Close))
            .count()
    }

    /// Compact `E`/`X`/`C` signature of the event order.
    pub fn signature(&self) -> String {
        self.events()
            .iter()
            .map(|e| match e {
                Event::Entry(_) => 'E',
                Event::Error(..) => 'X',
                Event::Close => 'C',
            })
            .collect()
    }
}

/// Line source fed from a channel. `next_line` blocks until a line arrives
/// or every sender is dropped.
pub struct ChannelSource {
    rx: Receiver<io::Result<String>>,
}

impl ChannelSource {
    pub fn new() -> (Sender<io::Result<String>>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl LineSource for ChannelSource {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.rx.recv().ok()
    }
}

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
