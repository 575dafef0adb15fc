//! Header scanning: the optional BOM and `#NAME: value` block before the
//! link records.
//!
//! ```text
//! <BOM>                  ← optional, consumed if present
//! #FORMAT: BEACON        ┐
//! #PREFIX: http://a/     ├ meta lines
//! #TARGET: http://b/     ┘
//!                        ┐ one or more blank lines end the header
//!                        ┘
//! src|dst                ← first link line, handed back via pushback
//! ```
//!
//! [`MetaScanner`] is fed one raw line at a time and reports when the
//! header is over. It does no I/O, so the blocking and async readers both
//! drive it.

use std::io::BufRead;

use beacon_types::MetaField;
use beacon_wire::LineCursor;
use beacon_wire::text::{drop_line_break, is_blank, trim_left_space};

use crate::error::LineError;

/// Parse the text of a meta line after its leading `'#'`.
///
/// The name runs over `A`-`Z` up to the first `':'`, space, or tab. The
/// value is everything after that separator with leading spaces and tabs
/// trimmed; later separators are part of the value.
///
/// # Errors
///
/// - [`LineError::InvalidMetaChar`] for any other character in the name.
/// - [`LineError::MetaMissingName`] if the separator comes first.
/// - [`LineError::MetaMissingValue`] if there is no separator.
pub fn split_meta(text: &str) -> Result<MetaField, LineError> {
    for (i, ch) in text.char_indices() {
        match ch {
            'A'..='Z' => {}
            ':' | ' ' | '\t' if i == 0 => {
                return Err(LineError::MetaMissingName {
                    line: format!("#{text}"),
                });
            }
            ':' | ' ' | '\t' => {
                let value = trim_left_space(&text[i + 1..]);
                return Ok(MetaField::new(&text[..i], value));
            }
            _ => {
                return Err(LineError::InvalidMetaChar {
                    ch,
                    line: format!("#{text}"),
                });
            }
        }
    }
    Err(LineError::MetaMissingValue {
        line: format!("#{text}"),
    })
}

/// Outcome of feeding one line to the [`MetaScanner`].
#[derive(Debug, PartialEq, Eq)]
pub enum Scan {
    /// Header still open; feed the next line.
    More,
    /// Header finished. `pushback` is the first line that belongs to the
    /// link records, if one was read.
    Done { pushback: Option<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    /// Reading `#` lines.
    Fields,
    /// Saw the terminating blank line; skipping any further blanks.
    Blanks,
}

/// Line-fed header state machine.
///
/// The caller has already checked that the stream starts with `'#'`
/// (after any BOM). Lines are fed raw; a line handed back through
/// [`Scan::Done`] keeps its terminator so the link decoders see it
/// exactly as read.
#[derive(Debug)]
pub struct MetaScanner {
    fields: Vec<MetaField>,
    state: ScanState,
}

impl Default for MetaScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            state: ScanState::Fields,
        }
    }

    /// Feed the next raw line of the header.
    ///
    /// # Errors
    ///
    /// Returns the [`split_meta`] error for a malformed `#` line. Fields
    /// parsed before the error stay available via
    /// [`into_fields`](Self::into_fields).
    pub fn feed(&mut self, raw: String) -> Result<Scan, LineError> {
        let line = drop_line_break(&raw);
        match self.state {
            ScanState::Fields if is_blank(line) => {
                self.state = ScanState::Blanks;
                Ok(Scan::More)
            }
            ScanState::Fields if !line.starts_with('#') => {
                Ok(Scan::Done { pushback: Some(raw) })
            }
            ScanState::Fields => {
                self.fields.push(split_meta(&line[1..])?);
                Ok(Scan::More)
            }
            ScanState::Blanks if is_blank(line) => Ok(Scan::More),
            ScanState::Blanks => Ok(Scan::Done { pushback: Some(raw) }),
        }
    }

    /// Meta fields collected so far, in file order.
    #[must_use]
    pub fn fields(&self) -> &[MetaField] {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<MetaField> {
        self.fields
    }
}

/// Run header scanning to completion over a blocking cursor.
///
/// Consumes a leading BOM, returns immediately when the stream is empty or
/// does not start with `'#'`, and otherwise feeds lines to `scanner` until
/// it is done or the stream ends. End-of-stream is not an error.
///
/// # Errors
///
/// Returns a malformed meta line or a reader failure.
pub fn scan<R: BufRead>(
    cursor: &mut LineCursor<R>,
    scanner: &mut MetaScanner,
) -> Result<(), LineError> {
    cursor.consume_bom()?;
    if cursor.peek_byte()? != Some(b'#') {
        return Ok(());
    }
    while let Some(raw) = cursor.next_line_raw()? {
        if let Scan::Done { pushback } = scanner.feed(raw)? {
            if let Some(line) = pushback {
                cursor.push_back(line);
            }
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(input: &str) -> (Result<(), LineError>, Vec<MetaField>, LineCursor<&[u8]>) {
        let mut cursor = LineCursor::new(input.as_bytes());
        let mut scanner = MetaScanner::new();
        let result = scan(&mut cursor, &mut scanner);
        (result, scanner.into_fields(), cursor)
    }

    #[test]
    fn split_meta_colon_separator() {
        let field = split_meta("PREFIX: http://example.org/").unwrap();
        assert_eq!(field, MetaField::new("PREFIX", "http://example.org/"));
    }

    #[test]
    fn split_meta_space_and_tab_separators() {
        assert_eq!(
            split_meta("NAME value").unwrap(),
            MetaField::new("NAME", "value")
        );
        assert_eq!(
            split_meta("NAME\t \tvalue").unwrap(),
            MetaField::new("NAME", "value")
        );
    }

    #[test]
    fn split_meta_keeps_later_separators_in_value() {
        let field = split_meta("DESCRIPTION: a: b\tc ").unwrap();
        assert_eq!(field.value, "a: b\tc ");
    }

    #[test]
    fn split_meta_empty_value_is_allowed() {
        assert_eq!(split_meta("NAME:").unwrap(), MetaField::new("NAME", ""));
    }

    #[test]
    fn split_meta_rejects_lowercase() {
        let err = split_meta("Name: x").unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidMetaChar { ch: 'a', ref line } if line == "#Name: x"
        ));
    }

    #[test]
    fn split_meta_rejects_missing_separator() {
        assert!(matches!(
            split_meta("NAME").unwrap_err(),
            LineError::MetaMissingValue { .. }
        ));
    }

    #[test]
    fn split_meta_rejects_empty_name() {
        assert!(matches!(
            split_meta(": value").unwrap_err(),
            LineError::MetaMissingName { .. }
        ));
    }

    #[test]
    fn scanner_stops_on_non_hash_line_and_hands_it_back() {
        let mut scanner = MetaScanner::new();
        assert_eq!(scanner.feed("#A: 1\n".into()).unwrap(), Scan::More);
        assert_eq!(
            scanner.feed("x|y\r\n".into()).unwrap(),
            Scan::Done {
                pushback: Some("x|y\r\n".into())
            }
        );
        assert_eq!(scanner.fields(), &[MetaField::new("A", "1")]);
    }

    #[test]
    fn scanner_skips_blank_run_after_header() {
        let mut scanner = MetaScanner::new();
        assert_eq!(scanner.feed("#A: 1\n".into()).unwrap(), Scan::More);
        assert_eq!(scanner.feed("\n".into()).unwrap(), Scan::More);
        assert_eq!(scanner.feed(" \t\r\n".into()).unwrap(), Scan::More);
        assert_eq!(
            scanner.feed("#not-meta\n".into()).unwrap(),
            Scan::Done {
                pushback: Some("#not-meta\n".into())
            }
        );
    }

    #[test]
    fn scan_without_header_reads_nothing() {
        let (result, fields, mut cursor) = scan_str("a|b\n");
        result.unwrap();
        assert!(fields.is_empty());
        assert_eq!(cursor.line(), 0);
        assert_eq!(cursor.next_line().unwrap().as_deref(), Some("a|b"));
    }

    #[test]
    fn scan_empty_stream() {
        let (result, fields, _) = scan_str("");
        result.unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn scan_bom_then_header() {
        let (result, fields, _) = scan_str("\u{FEFF}#NAME: value\n\n");
        result.unwrap();
        assert_eq!(fields, vec![MetaField::new("NAME", "value")]);
    }

    #[test]
    fn scan_bom_without_header_leaves_first_line() {
        let (result, fields, mut cursor) = scan_str("\u{FEFF}ab|x\n");
        result.unwrap();
        assert!(fields.is_empty());
        assert_eq!(cursor.next_line().unwrap().as_deref(), Some("ab|x"));
    }

    #[test]
    fn scan_header_ending_at_eof() {
        let (result, fields, mut cursor) = scan_str("#A: 1\n#B 2");
        result.unwrap();
        assert_eq!(
            fields,
            vec![MetaField::new("A", "1"), MetaField::new("B", "2")]
        );
        assert_eq!(cursor.next_line().unwrap(), None);
    }

    #[test]
    fn scan_pushes_back_first_link_line_raw() {
        let (result, fields, mut cursor) = scan_str("#A: 1\n\n\nab|x\r\nlong\n");
        result.unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(cursor.line(), 4);
        assert_eq!(cursor.next_line_raw().unwrap().as_deref(), Some("ab|x\r\n"));
    }

    #[test]
    fn scan_malformed_meta_keeps_earlier_fields() {
        let (result, fields, cursor) = scan_str("#A: 1\n#b: 2\n");
        assert!(matches!(
            result.unwrap_err(),
            LineError::InvalidMetaChar { ch: 'b', .. }
        ));
        assert_eq!(fields, vec![MetaField::new("A", "1")]);
        assert_eq!(cursor.line(), 2);
    }
}
