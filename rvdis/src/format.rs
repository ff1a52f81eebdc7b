/// A printf-style sink. Every write goes through this wrapper, and a
/// failing write anywhere during the run latches a single flag.
use std::io::{self, Write};

pub struct Formatter<W: Write> {
    sink: W,
    write_failed: bool,
}

impl<W: Write> Formatter<W> {
    pub fn new(sink: W) -> Self {
        Formatter {
            sink,
            write_failed: false,
        }
    }

    /// Writes pre-formatted text, latching `write_failed` on any I/O
    /// error instead of returning it. Once latched, further writes are
    /// skipped.
    pub fn write(&mut self, text: &str) {
        if self.write_failed {
            return;
        }
        if self.sink.write_all(text.as_bytes()).is_err() {
            self.write_failed = true;
        }
    }

    pub fn had_error(&self) -> bool {
        self.write_failed
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Unwraps the formatter, handing back the underlying sink. Mainly
    /// useful in tests that disassemble into an in-memory `Vec<u8>`.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// Writes a single diagnostic line to stderr, unconditionally prefixed
/// `"Error. "`.
pub fn report_error(message: impl std::fmt::Display) {
    eprintln!("Error. {message}");
}
