//! Link lines in the generic (draft RFC) dialect.
//!
//! ```text
//! ┌──────────────────────┬────────┬────────────┬────────┐
//! │ Line                 │ source │ annotation │ target │
//! ├──────────────────────┼────────┼────────────┼────────┤
//! │ a                    │ a      │            │        │
//! │ a|t                  │ a      │            │ t      │
//! │ a|n|t                │ a      │ n          │ t      │
//! │ a|n|t|x              │ error: too many bar separators │
//! └──────────────────────┴────────────────────────────────┘
//! ```
//!
//! The two-field form is ambiguous in the draft: `a|x` could also be read
//! as source plus annotation with an empty target. This decoder always
//! reads the second field as the target.

use std::io::BufRead;

use beacon_types::Link;
use beacon_wire::LineCursor;

use crate::error::LineError;

/// Split one RFC link line (terminator already stripped) into a [`Link`].
///
/// # Errors
///
/// Returns [`LineError::TooManySeparators`] if the line has more than two
/// `'|'` characters.
pub fn parse_line(line: &str) -> Result<Link, LineError> {
    let mut parts = line.splitn(4, '|');
    let source = parts.next().unwrap_or_default();
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Ok(Link::new(source, "")),
        (Some(target), None, _) => Ok(Link::new(source, target)),
        (Some(annotation), Some(target), None) => Ok(Link::annotated(source, annotation, target)),
        (Some(_), Some(_), Some(_)) => Err(LineError::TooManySeparators {
            line: line.to_owned(),
        }),
    }
}

/// Read the next RFC link. `Ok(None)` at end-of-stream.
///
/// # Errors
///
/// Returns a malformed line or a reader failure.
pub fn read_link<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<Option<Link>, LineError> {
    cursor.next_line()?.map(|line| parse_line(&line)).transpose()
}
