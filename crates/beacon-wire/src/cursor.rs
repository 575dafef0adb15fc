use std::io::BufRead;

use crate::error::WireError;
use crate::pushback::Pushback;
use crate::text::{self, BOM};

/// Forward-only line reader with one line of pushback.
///
/// A logical line is everything up to and including the next `'\n'`, or
/// the trailing bytes before end-of-stream if the last line has no
/// terminator. Lines come back either raw (terminator kept, for
/// multi-line value reassembly) or stripped.
///
/// ```text
///   BufRead ──read_until('\n')──▶ ┌────────────┐ ──▶ next_line_raw()
///                                 │  Pushback  │ ──▶ next_line()
///             push_back(line) ──▶ └────────────┘
/// ```
///
/// The line counter is 1-based and counts physical lines pulled from the
/// reader. Lines served from the pushback slot were already counted when
/// first read, so they do not advance it again.
///
/// # Example
///
/// ```rust
/// use beacon_wire::LineCursor;
///
/// let mut cursor = LineCursor::new(&b"first\r\nsecond"[..]);
/// let first = cursor.next_line().unwrap().unwrap();
/// assert_eq!(first, "first");
/// cursor.push_back("first\r\n".to_string());
/// assert_eq!(cursor.next_line_raw().unwrap().as_deref(), Some("first\r\n"));
/// assert_eq!(cursor.next_line().unwrap().as_deref(), Some("second"));
/// assert_eq!(cursor.next_line().unwrap(), None);
/// assert_eq!(cursor.line(), 2);
/// ```
#[derive(Debug)]
pub struct LineCursor<R> {
    reader: R,
    pushback: Pushback,
    line: u64,
}

impl<R: BufRead> LineCursor<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pushback: Pushback::new(),
            line: 0,
        }
    }

    /// Number of physical lines read from the stream so far.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Next logical line with its terminator kept.
    ///
    /// Returns `Ok(None)` at end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the underlying reader fails.
    pub fn next_line_raw(&mut self) -> Result<Option<String>, WireError> {
        if let Some(line) = self.pushback.take() {
            return Ok(Some(line));
        }
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(text::decode_line(bytes, self.line)))
    }

    /// Next logical line with its terminator stripped.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the underlying reader fails.
    pub fn next_line(&mut self) -> Result<Option<String>, WireError> {
        Ok(self.next_line_raw()?.map(|mut line| {
            text::strip_line_break(&mut line);
            line
        }))
    }

    /// Hand a line back so the next read returns it instead of the stream.
    ///
    /// Pass the line in the same form it was read (raw, terminator kept);
    /// the next caller decides whether to strip it.
    ///
    /// # Panics
    ///
    /// Panics if a line is already pushed back.
    pub fn push_back(&mut self, line: String) {
        self.pushback.put(line);
    }

    /// Consume a leading byte order mark if the stream starts with one.
    ///
    /// The mark may arrive split over several short reads. If the bytes
    /// collected turn out not to be a mark, they are joined with the rest
    /// of their physical line and pushed back, so nothing is lost.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the underlying reader fails.
    pub fn consume_bom(&mut self) -> Result<bool, WireError> {
        if !self.pushback.is_empty() {
            return Ok(false);
        }
        let mut seen = Vec::with_capacity(BOM.len());
        while seen.len() < BOM.len() {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            let Some(take) = text::bom_continuation(seen.len(), buf) else {
                break;
            };
            seen.extend_from_slice(&buf[..take]);
            self.reader.consume(take);
        }
        if seen == BOM {
            return Ok(true);
        }
        if !seen.is_empty() {
            self.reader.read_until(b'\n', &mut seen)?;
            self.line += 1;
            self.pushback.put(text::decode_line(seen, self.line));
        }
        Ok(false)
    }

    /// Look at the next byte without consuming it. `None` at end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the underlying reader fails.
    pub fn peek_byte(&mut self) -> Result<Option<u8>, WireError> {
        if let Some(line) = self.pushback.peek() {
            return Ok(line.as_bytes().first().copied());
        }
        Ok(self.reader.fill_buf()?.first().copied())
    }

    /// Give back the underlying reader. Any pushed-back line is dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
