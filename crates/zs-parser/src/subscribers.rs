//! Ordered callback lists for entries, errors and stream close.

use crate::error::ParseError;
use crate::types::Entry;

pub type EntryCallback = Box<dyn FnMut(&Entry) + Send>;
pub type ErrorCallback = Box<dyn FnMut(&ParseError) + Send>;
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Three append-only subscriber lists, each invoked in registration order.
///
/// Callbacks run synchronously on the thread driving the parser. A panicking
/// callback is not caught: it unwinds out of `Parser::start` and the
/// remaining subscribers for that event are skipped.
#[derive(Default)]
pub struct Subscribers {
    entry: Vec<EntryCallback>,
    error: Vec<ErrorCallback>,
    close: Vec<CloseCallback>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_entry(&mut self, callback: impl FnMut(&Entry) + Send + 'static) {
        self.entry.push(Box::new(callback));
    }

    pub fn on_error(&mut self, callback: impl FnMut(&ParseError) + Send + 'static) {
        self.error.push(Box::new(callback));
    }

    pub fn on_close(&mut self, callback: impl FnMut() + Send + 'static) {
        self.close.push(Box::new(callback));
    }

    /// Registered (entry, error, close) callback counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.entry.len(), self.error.len(), self.close.len())
    }

    pub(crate) fn emit_entry(&mut self, entry: &Entry) {
        for callback in &mut self.entry {
            callback(entry);
        }
    }

    pub(crate) fn emit_error(&mut self, error: &ParseError) {
        for callback in &mut self.error {
            callback(error);
        }
    }

    pub(crate) fn emit_close(&mut self) {
        for callback in &mut self.close {
            callback();
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("entry", &self.entry.len())
            .field("error", &self.error.len())
            .field("close", &self.close.len())
            .finish()
    }
}
