/// One-slot lookahead buffer for a single logical line.
///
/// Header scanning has to read the first link line before it can tell
/// the header is over; the fixed-width record assembler has to read the
/// first line of the next record before it can tell the current one is
/// complete. Both hand that line back through this slot.
///
/// ```text
///   ┌──────────────┐  put(line)   ┌──────────────┐
///   │    Empty     │ ───────────▶ │  Holding(l)  │
///   │              │ ◀─────────── │              │
///   └──────────────┘  take() → l  └──────────────┘
/// ```
///
/// At most one line is ever live. Putting a second line before the first
/// has been taken is a bug in the caller, and panics.
#[derive(Debug, Default)]
pub struct Pushback(Option<String>);

impl Pushback {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self(None)
    }

    /// Store a line to be returned by the next [`take`](Self::take).
    ///
    /// # Panics
    ///
    /// Panics if the slot already holds a line.
    pub fn put(&mut self, line: String) {
        assert!(
            self.0.is_none(),
            "pushback slot already holds a line; at most one line of lookahead is allowed"
        );
        self.0 = Some(line);
    }

    /// Remove and return the held line, leaving the slot empty.
    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    /// Borrow the held line without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
