//! Assembles serial bytes into command lines.

use heapless::Vec;

/// Longest unterminated input kept before old bytes are dropped
pub const LINE_CAPACITY: usize = 256;

/// Byte-to-line assembler with bounded memory
///
/// Carriage returns are dropped and a newline completes the line. When
/// unterminated input outgrows the buffer, the older half is discarded, so a
/// runaway line is cut but memory stays bounded.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8, LINE_CAPACITY>,
    complete: bool,
    dropped: usize,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            complete: false,
            dropped: 0,
        }
    }

    /// Number of bytes discarded on overflow since creation
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Feed one byte; returns the line when `byte` terminates a non-empty one.
    ///
    /// The returned line stays valid until the next call.
    pub fn push(&mut self, byte: u8) -> Option<&str> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }

        match byte {
            b'\r' => None,
            b'\n' => {
                self.complete = true;
                if self.buf.is_empty() {
                    return None;
                }
                match core::str::from_utf8(&self.buf) {
                    Ok(line) => Some(line),
                    Err(_) => {
                        log!("[serial] dropped non-UTF-8 line");
                        None
                    }
                }
            }
            _ => {
                if self.buf.is_full() {
                    self.discard_oldest();
                }
                // Cannot fail after `discard_oldest`.
                let _ = self.buf.push(byte);
                None
            }
        }
    }

    fn discard_oldest(&mut self) {
        let half = self.buf.len() / 2;
        self.buf.rotate_left(half);
        self.buf.truncate(self.buf.len() - half);
        self.dropped += half;
        log!("[serial] line overflow, dropped {} bytes", half);
    }
}
