use std::io::BufRead;

use beacon_types::{Dialect, Link, MetaField};
use beacon_wire::LineCursor;
use tracing::{debug, trace};

use crate::error::{DecodeError, LineError};
use crate::header::{self, MetaScanner};
use crate::{rfc, urlteam};

/// Where the reader is in the dump.
///
/// ```text
///   Header → Links → Done
/// ```
///
/// `Header` means the header has not been scanned yet. Any error, and
/// end-of-stream, moves the reader to `Done`; it never resynchronizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReaderState {
    Header,
    Links,
    Done,
}

/// Blocking, single-pass BEACON dump reader.
///
/// Reads the optional header on demand, then yields one [`Link`] per call
/// to [`read`](Self::read). Memory use is one pushed-back line plus the
/// reader's own buffer, and for fixed-width URLTeam dumps the physical
/// lines of the record being assembled.
///
/// ```text
///   BufRead ─▶ LineCursor ─▶ header::scan ─▶ meta()
///                          └▶ rfc / urlteam ─▶ read()
/// ```
///
/// # Example
///
/// ```rust
/// use beacon_decoder::BeaconReader;
/// use beacon_types::Link;
///
/// let dump = "#FORMAT: BEACON\n\nsrc|note|http://t/\n";
/// let mut reader = BeaconReader::rfc(dump.as_bytes());
///
/// assert_eq!(reader.meta().unwrap()[0].value, "BEACON");
/// assert_eq!(
///     reader.read().unwrap(),
///     Some(Link::annotated("src", "note", "http://t/"))
/// );
/// assert_eq!(reader.read().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct BeaconReader<R> {
    cursor: LineCursor<R>,
    dialect: Dialect,
    meta: Vec<MetaField>,
    state: ReaderState,
}

impl<R: BufRead> BeaconReader<R> {
    #[must_use]
    pub fn new(reader: R, dialect: Dialect) -> Self {
        Self {
            cursor: LineCursor::new(reader),
            dialect,
            meta: Vec::new(),
            state: ReaderState::Header,
        }
    }

    /// Reader for the generic RFC dialect.
    #[must_use]
    pub fn rfc(reader: R) -> Self {
        Self::new(reader, Dialect::Rfc)
    }

    /// Reader for URLTeam dumps. A `shortcode_len` of 0 means variable
    /// width.
    #[must_use]
    pub fn url_team(reader: R, shortcode_len: usize) -> Self {
        Self::new(reader, Dialect::url_team(shortcode_len))
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Number of physical lines read so far.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.cursor.line()
    }

    /// Header meta fields, in file order.
    ///
    /// The first call scans the header; later calls return the same fields
    /// without touching the stream. [`read`](Self::read) calls this itself
    /// if it has not run yet.
    ///
    /// # Errors
    ///
    /// Returns a malformed meta line or a reader failure. Fields parsed
    /// before the failure remain available from later calls.
    pub fn meta(&mut self) -> Result<&[MetaField], DecodeError> {
        if self.state == ReaderState::Header {
            let mut scanner = MetaScanner::new();
            let result = header::scan(&mut self.cursor, &mut scanner);
            self.meta = scanner.into_fields();
            if let Err(kind) = result {
                return Err(self.fail(kind));
            }
            self.state = ReaderState::Links;
            debug!(
                fields = self.meta.len(),
                line = self.cursor.line(),
                "scanned dump header"
            );
        }
        Ok(&self.meta)
    }

    /// Next link, or `Ok(None)` at end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns a malformed header or link line, or a reader failure,
    /// tagged with the line number. After an error the reader is finished
    /// and further calls return `Ok(None)`.
    pub fn read(&mut self) -> Result<Option<Link>, DecodeError> {
        self.meta()?;
        if self.state == ReaderState::Done {
            return Ok(None);
        }
        let result = match self.dialect {
            Dialect::Rfc => rfc::read_link(&mut self.cursor),
            Dialect::UrlTeam {
                shortcode_len: None,
            } => urlteam::read_variable(&mut self.cursor),
            Dialect::UrlTeam {
                shortcode_len: Some(width),
            } => urlteam::read_fixed(&mut self.cursor, width.get()),
        };
        match result {
            Ok(Some(link)) => {
                trace!(line = self.cursor.line(), source = %link.source, "decoded link");
                Ok(Some(link))
            }
            Ok(None) => {
                self.state = ReaderState::Done;
                Ok(None)
            }
            Err(kind) => Err(self.fail(kind)),
        }
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }

    /// Finish the reader and pin `kind` to the current line.
    fn fail(&mut self, kind: LineError) -> DecodeError {
        self.state = ReaderState::Done;
        DecodeError::at(self.cursor.line(), kind)
    }
}

/// Iterates links until end-of-stream or the first error.
impl<R: BufRead> Iterator for BeaconReader<R> {
    type Item = Result<Link, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}

impl<R: BufRead> std::iter::FusedIterator for BeaconReader<R> {}
