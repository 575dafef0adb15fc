use beacon_types::{Dialect, Link, MetaField};
use beacon_wire::Pushback;
use beacon_wire::text::{self, BOM};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, trace};

use crate::error::{DecodeError, LineError};
use crate::header::{MetaScanner, Scan};
use crate::{rfc, urlteam};

/// Async counterpart of [`beacon_wire::LineCursor`].
///
/// Same contract: raw or stripped lines, one line of pushback, a 1-based
/// counter that pushed-back lines do not advance.
#[derive(Debug)]
struct AsyncLineCursor<R> {
    reader: R,
    pushback: Pushback,
    line: u64,
}

impl<R: AsyncBufRead + Unpin> AsyncLineCursor<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pushback: Pushback::new(),
            line: 0,
        }
    }

    async fn next_line_raw(&mut self) -> Result<Option<String>, LineError> {
        if let Some(line) = self.pushback.take() {
            return Ok(Some(line));
        }
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes).await? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(text::decode_line(bytes, self.line)))
    }

    async fn next_line(&mut self) -> Result<Option<String>, LineError> {
        Ok(self.next_line_raw().await?.map(|mut line| {
            text::strip_line_break(&mut line);
            line
        }))
    }

    /// Same contract as [`LineCursor::consume_bom`](beacon_wire::LineCursor::consume_bom):
    /// a mark split over short reads is still consumed, and a prefix that
    /// is not a mark is pushed back with the rest of its line.
    async fn consume_bom(&mut self) -> Result<bool, LineError> {
        if !self.pushback.is_empty() {
            return Ok(false);
        }
        let mut seen = Vec::with_capacity(BOM.len());
        while seen.len() < BOM.len() {
            let buf = self.reader.fill_buf().await?;
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
            self.reader.read_until(b'\n', &mut seen).await?;
            self.line += 1;
            self.pushback.put(text::decode_line(seen, self.line));
        }
        Ok(false)
    }

    async fn peek_byte(&mut self) -> Result<Option<u8>, LineError> {
        if let Some(line) = self.pushback.peek() {
            return Ok(line.as_bytes().first().copied());
        }
        Ok(self.reader.fill_buf().await?.first().copied())
    }
}

/// Where the streaming decoder is in the dump.
///
/// ```text
///   ReadHeader → ReadLinks → Done
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    ReadHeader,
    ReadLinks,
    Done,
}

/// Asynchronous streaming decoder: yields links one at a time from any
/// `AsyncBufRead` without buffering the dump.
///
/// Decodes exactly like [`BeaconReader`](crate::BeaconReader), driving the
/// same header scanner and link parsers; only the line source differs.
/// Backpressure is natural: the next line is read only when the caller
/// awaits the next link.
///
/// # Example
///
/// ```rust,no_run
/// use beacon_decoder::StreamingDecoder;
/// use beacon_types::Dialect;
/// use tokio::io::AsyncBufRead;
///
/// async fn count_links(reader: impl AsyncBufRead + Unpin) -> usize {
///     let mut stream = StreamingDecoder::new(reader, Dialect::url_team(6));
///     let mut count = 0;
///     while let Some(result) = stream.next().await {
///         let link = result.unwrap();
///         println!("{link}");
///         count += 1;
///     }
///     count
/// }
/// ```
#[derive(Debug)]
pub struct StreamingDecoder<R> {
    cursor: AsyncLineCursor<R>,
    dialect: Dialect,
    meta: Vec<MetaField>,
    state: StreamState,
}

impl<R: AsyncBufRead + Unpin> StreamingDecoder<R> {
    /// Create a decoder over `reader`. Nothing is read until the first
    /// call to [`meta`](Self::meta) or [`next`](Self::next).
    #[must_use]
    pub fn new(reader: R, dialect: Dialect) -> Self {
        Self {
            cursor: AsyncLineCursor::new(reader),
            dialect,
            meta: Vec::new(),
            state: StreamState::ReadHeader,
        }
    }

    /// Number of physical lines read so far.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.cursor.line
    }

    /// Header meta fields; scanned on first call, cached afterwards.
    ///
    /// # Errors
    ///
    /// Returns a malformed meta line or a reader failure.
    pub async fn meta(&mut self) -> Result<&[MetaField], DecodeError> {
        if self.state == StreamState::ReadHeader {
            let mut scanner = MetaScanner::new();
            let result = self.scan_header(&mut scanner).await;
            self.meta = scanner.into_fields();
            if let Err(kind) = result {
                return Err(self.fail(kind));
            }
            self.state = StreamState::ReadLinks;
            debug!(
                fields = self.meta.len(),
                line = self.cursor.line,
                "scanned dump header"
            );
        }
        Ok(&self.meta)
    }

    /// Read the next link.
    ///
    /// Returns `Some(Ok(link))` per record, `None` at end-of-stream (and
    /// after any error), or `Some(Err(_))` tagged with the line number.
    pub async fn next(&mut self) -> Option<Result<Link, DecodeError>> {
        if let Err(err) = self.meta().await {
            return Some(Err(err));
        }
        if self.state == StreamState::Done {
            return None;
        }
        let result = match self.dialect {
            Dialect::Rfc => self.read_rfc().await,
            Dialect::UrlTeam {
                shortcode_len: None,
            } => self.read_variable().await,
            Dialect::UrlTeam {
                shortcode_len: Some(width),
            } => self.read_fixed(width.get()).await,
        };
        match result {
            Ok(Some(link)) => {
                trace!(line = self.cursor.line, source = %link.source, "decoded link");
                Some(Ok(link))
            }
            Ok(None) => {
                self.state = StreamState::Done;
                None
            }
            Err(kind) => Some(Err(self.fail(kind))),
        }
    }

    async fn scan_header(&mut self, scanner: &mut MetaScanner) -> Result<(), LineError> {
        self.cursor.consume_bom().await?;
        if self.cursor.peek_byte().await? != Some(b'#') {
            return Ok(());
        }
        while let Some(raw) = self.cursor.next_line_raw().await? {
            if let Scan::Done { pushback } = scanner.feed(raw)? {
                if let Some(line) = pushback {
                    self.cursor.pushback.put(line);
                }
                break;
            }
        }
        Ok(())
    }

    async fn read_rfc(&mut self) -> Result<Option<Link>, LineError> {
        self.cursor
            .next_line()
            .await?
            .map(|line| rfc::parse_line(&line))
            .transpose()
    }

    async fn read_variable(&mut self) -> Result<Option<Link>, LineError> {
        self.cursor
            .next_line_raw()
            .await?
            .map(|raw| urlteam::split_variable(&raw))
            .transpose()
    }

    async fn read_fixed(&mut self, width: usize) -> Result<Option<Link>, LineError> {
        let Some(first) = self.cursor.next_line_raw().await? else {
            return Ok(None);
        };
        let mut record = urlteam::FixedRecord::start(first, width)?;
        while let Some(raw) = self.cursor.next_line_raw().await? {
            if let Some(next) = record.absorb(raw) {
                self.cursor.pushback.put(next);
                break;
            }
        }
        Ok(Some(record.finish()))
    }

    fn fail(&mut self, kind: LineError) -> DecodeError {
        self.state = StreamState::Done;
        DecodeError::at(self.cursor.line, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(input: &'static str, dialect: Dialect) -> (Vec<MetaField>, Vec<Link>) {
        let reader = tokio::io::BufReader::new(std::io::Cursor::new(input.as_bytes()));
        let mut stream = StreamingDecoder::new(reader, dialect);
        let meta = stream.meta().await.unwrap().to_vec();
        let mut links = Vec::new();
        while let Some(result) = stream.next().await {
            links.push(result.unwrap());
        }
        (meta, links)
    }

    #[tokio::test]
    async fn streaming_reads_header_then_links() {
        let (meta, links) =
            collect("\u{FEFF}#NAME: value\n\na|n|t\nb|u\n", Dialect::Rfc).await;
        assert_eq!(meta, vec![MetaField::new("NAME", "value")]);
        assert_eq!(
            links,
            vec![Link::annotated("a", "n", "t"), Link::new("b", "u")]
        );
    }

    #[tokio::test]
    async fn streaming_fixed_width_continuation() {
        let (meta, links) = collect(
            "ab|http://x.com/\nlong\ncd|http://y.com/\n",
            Dialect::url_team(2),
        )
        .await;
        assert!(meta.is_empty());
        assert_eq!(
            links,
            vec![
                Link::new("ab", "http://x.com/\nlong"),
                Link::new("cd", "http://y.com/"),
            ]
        );
    }

    #[tokio::test]
    async fn streaming_variable_width() {
        let (_, links) = collect("abc|http://x/|y\r\n", Dialect::url_team(0)).await;
        assert_eq!(links, vec![Link::new("abc", "http://x/|y")]);
    }

    #[tokio::test]
    async fn streaming_error_is_line_tagged_and_final() {
        let reader = tokio::io::BufReader::new(std::io::Cursor::new(&b"a|b\na|b|c|d\nx|y\n"[..]));
        let mut stream = StreamingDecoder::new(reader, Dialect::Rfc);
        assert!(stream.next().await.unwrap().is_ok());
        let err = stream.next().await.unwrap().unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn streaming_bom_split_over_short_reads() {
        for capacity in [1, 2] {
            let input = &b"\xEF\xBB\xBF#NAME: value\n\nab|x\n"[..];
            let reader = tokio::io::BufReader::with_capacity(capacity, input);
            let mut stream = StreamingDecoder::new(reader, Dialect::Rfc);
            assert_eq!(
                stream.meta().await.unwrap(),
                &[MetaField::new("NAME", "value")]
            );
            assert_eq!(stream.next().await.unwrap().unwrap(), Link::new("ab", "x"));
            assert!(stream.next().await.is_none());
        }
    }

    #[tokio::test]
    async fn streaming_bom_prefix_that_is_not_a_bom_is_kept() {
        let input = "\u{FEFE}ab|x\n".as_bytes();
        let reader = tokio::io::BufReader::with_capacity(1, input);
        let mut stream = StreamingDecoder::new(reader, Dialect::Rfc);
        assert!(stream.meta().await.unwrap().is_empty());
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            Link::new("\u{FEFE}ab", "x")
        );
        assert_eq!(stream.line(), 1);
    }

    #[tokio::test]
    async fn streaming_empty_input() {
        let (meta, links) = collect("", Dialect::Rfc).await;
        assert!(meta.is_empty());
        assert!(links.is_empty());
    }
}
