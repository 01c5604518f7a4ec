//! Line source abstraction — where the driver pulls raw lines from.

use std::io::{self, BufRead, Read};

/// A blocking producer of text lines.
///
/// `None` means the input is exhausted. `Some(Err(_))` is a terminal read
/// failure: the driver reports it once and stops pulling.
pub trait LineSource {
    fn next_line(&mut self) -> Option<io::Result<String>>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        (**self).next_line()
    }
}

/// Reads newline-delimited lines from any buffered reader.
///
/// A trailing `\r` is stripped. Invalid UTF-8 is replaced rather than
/// rejected so the line still reaches the decoder and fails there on its
/// own. Lines longer than `max_line_bytes` end the stream with
/// [`io::ErrorKind::InvalidData`].
pub struct ReaderSource<R> {
    reader: R,
    max_line_bytes: usize,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            max_line_bytes,
            buf: Vec::new(),
            failed: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        if self.failed {
            return None;
        }
        self.buf.clear();

        // One byte of slack for the newline, one more to detect overflow.
        let limit = self.max_line_bytes as u64 + 2;
        let read = match (&mut self.reader).take(limit).read_until(b'\n', &mut self.buf) {
            Ok(n) => n,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        if read == 0 {
            return None;
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        if self.buf.len() > self.max_line_bytes {
            self.failed = true;
            return Some(Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds {} bytes", self.max_line_bytes),
            )));
        }

        Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
