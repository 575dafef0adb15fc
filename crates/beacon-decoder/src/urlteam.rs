//! Link records in the URLTeam dialect.
//!
//! There is never an annotation. With variable-width shortcodes the first
//! `'|'` splits source from target and the target runs to the end of the
//! line. With fixed-width shortcodes the `'|'` must sit at offset `w`,
//! and a target may continue over following physical lines:
//!
//! ```text
//!   ab|http://x.com/     ← record start: '|' at offset 2
//!   long                 ← continuation, appended with its line break
//!   cd|http://y.com/     ← next record start, pushed back
//!
//!   Link { source: "ab", target: "http://x.com/\nlong" }
//! ```
//!
//! Only the line break of the final appended line is stripped; earlier ones
//! stay in the target as literal characters.

use std::io::BufRead;

use beacon_types::Link;
use beacon_wire::LineCursor;
use beacon_wire::text::{drop_line_break, strip_line_break};

use crate::error::LineError;

/// Split a variable-width record line on its first `'|'`.
///
/// # Errors
///
/// Returns [`LineError::MissingSeparator`] if the line has no `'|'`.
pub fn split_variable(raw: &str) -> Result<Link, LineError> {
    let Some(i) = raw.find('|') else {
        return Err(LineError::MissingSeparator {
            line: drop_line_break(raw).to_owned(),
        });
    };
    Ok(Link::new(&raw[..i], drop_line_break(&raw[i + 1..])))
}

/// Whether `raw` starts a fixed-width record, i.e. has `'|'` at byte
/// offset `width`.
#[must_use]
pub fn is_record_start(raw: &str, width: usize) -> bool {
    raw.as_bytes().get(width) == Some(&b'|')
}

/// A fixed-width record being assembled from one or more physical lines.
#[derive(Debug)]
pub struct FixedRecord {
    width: usize,
    source: String,
    target: String,
}

impl FixedRecord {
    /// Begin a record from its first raw line.
    ///
    /// # Errors
    ///
    /// - [`LineError::ShortcodeWidth`] if the line has a `'|'`, but not at
    ///   offset `width`.
    /// - [`LineError::MissingSeparator`] if the line has no `'|'` at all.
    pub fn start(raw: String, width: usize) -> Result<Self, LineError> {
        if !is_record_start(&raw, width) {
            let line = drop_line_break(&raw).to_owned();
            return Err(if raw.contains('|') {
                LineError::ShortcodeWidth { width, line }
            } else {
                LineError::MissingSeparator { line }
            });
        }
        // The byte at `width` is ASCII '|', so both slice points are
        // char boundaries.
        let target = raw[width + 1..].to_owned();
        let mut source = raw;
        source.truncate(width);
        Ok(Self {
            width,
            source,
            target,
        })
    }

    /// Offer the next raw line.
    ///
    /// A continuation line is appended verbatim and `None` is returned. A
    /// line that starts the next record is handed back untouched.
    pub fn absorb(&mut self, raw: String) -> Option<String> {
        if is_record_start(&raw, self.width) {
            return Some(raw);
        }
        self.target.push_str(&raw);
        None
    }

    /// Finish the record, stripping the last line break exactly once.
    #[must_use]
    pub fn finish(self) -> Link {
        let mut target = self.target;
        strip_line_break(&mut target);
        Link::new(self.source, target)
    }
}

/// Read the next variable-width record. `Ok(None)` at end-of-stream.
///
/// # Errors
///
/// Returns a malformed line or a reader failure.
pub fn read_variable<R: BufRead>(
    cursor: &mut LineCursor<R>,
) -> Result<Option<Link>, LineError> {
    cursor
        .next_line_raw()?
        .map(|raw| split_variable(&raw))
        .transpose()
}

/// Read the next fixed-width record, absorbing continuation lines.
/// `Ok(None)` at end-of-stream.
///
/// # Errors
///
/// Returns a malformed first line or a reader failure.
pub fn read_fixed<R: BufRead>(
    cursor: &mut LineCursor<R>,
    width: usize,
) -> Result<Option<Link>, LineError> {
    let Some(first) = cursor.next_line_raw()? else {
        return Ok(None);
    };
    let mut record = FixedRecord::start(first, width)?;
    while let Some(raw) = cursor.next_line_raw()? {
        if let Some(next) = record.absorb(raw) {
            cursor.push_back(next);
            break;
        }
    }
    Ok(Some(record.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_links(input: &str, width: usize) -> Vec<Link> {
        let mut cursor = LineCursor::new(input.as_bytes());
        let mut links = Vec::new();
        while let Some(link) = read_fixed(&mut cursor, width).unwrap() {
            links.push(link);
        }
        links
    }

    #[test]
    fn variable_splits_on_first_bar() {
        assert_eq!(
            split_variable("abc|http://x/?a|b\r\n").unwrap(),
            Link::new("abc", "http://x/?a|b")
        );
    }

    #[test]
    fn variable_allows_empty_target() {
        assert_eq!(split_variable("abc|\n").unwrap(), Link::new("abc", ""));
    }

    #[test]
    fn variable_missing_separator() {
        let err = split_variable("noseparatorhere\n").unwrap_err();
        assert!(matches!(
            err,
            LineError::MissingSeparator { ref line } if line == "noseparatorhere"
        ));
    }

    #[test]
    fn record_start_needs_bar_at_width() {
        assert!(is_record_start("ab|x", 2));
        assert!(!is_record_start("abc|x", 2));
        assert!(!is_record_start("ab", 2));
        assert!(!is_record_start("\n", 2));
    }

    #[test]
    fn fixed_width_continuation() {
        let links = fixed_links("ab|http://x.com/\nlong\ncd|http://y.com/\n", 2);
        assert_eq!(
            links,
            vec![
                Link::new("ab", "http://x.com/\nlong"),
                Link::new("cd", "http://y.com/"),
            ]
        );
    }

    #[test]
    fn fixed_width_keeps_crlf_inside_target() {
        let links = fixed_links("ab|one\r\ntwo\r\nthree\r\n", 2);
        assert_eq!(links, vec![Link::new("ab", "one\r\ntwo\r\nthree")]);
    }

    #[test]
    fn fixed_width_blank_continuation_lines() {
        let links = fixed_links("ab|x\n\n\n", 2);
        assert_eq!(links, vec![Link::new("ab", "x\n\n")]);
    }

    #[test]
    fn fixed_width_last_line_without_terminator() {
        let links = fixed_links("ab|x\ncd|y", 2);
        assert_eq!(links, vec![Link::new("ab", "x"), Link::new("cd", "y")]);
    }

    #[test]
    fn fixed_width_wrong_width() {
        let mut cursor = LineCursor::new(&b"abc|http://x/\n"[..]);
        let err = read_fixed(&mut cursor, 2).unwrap_err();
        assert!(matches!(err, LineError::ShortcodeWidth { width: 2, .. }));
    }

    #[test]
    fn fixed_width_bar_before_width() {
        let mut cursor = LineCursor::new(&b"a|x\n"[..]);
        let err = read_fixed(&mut cursor, 2).unwrap_err();
        assert!(matches!(
            err,
            LineError::ShortcodeWidth { width: 2, ref line } if line == "a|x"
        ));
    }

    #[test]
    fn fixed_width_missing_separator() {
        let mut cursor = LineCursor::new(&b"a\n"[..]);
        let err = read_fixed(&mut cursor, 2).unwrap_err();
        assert!(matches!(err, LineError::MissingSeparator { .. }));
    }

    #[test]
    fn fixed_width_multibyte_target() {
        let links = fixed_links("ab|http://x/ü\nç\n", 2);
        assert_eq!(links, vec![Link::new("ab", "http://x/ü\nç")]);
    }
}
