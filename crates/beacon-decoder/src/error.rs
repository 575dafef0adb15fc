use beacon_wire::WireError;

/// What went wrong on a line, without saying which line.
///
/// The decoding strategies return this; the reader facades attach the
/// line number by wrapping it in a [`DecodeError`]. End-of-stream is never
/// an error at either level.
///
/// ```text
///   LineError
///   ├── InvalidMetaChar     ← non A-Z character before the meta separator
///   ├── MetaMissingName     ← meta line starts with the separator
///   ├── MetaMissingValue    ← meta line has no separator at all
///   ├── TooManySeparators   ← RFC link line with four or more fields
///   ├── MissingSeparator    ← URLTeam link line without any '|'
///   ├── ShortcodeWidth      ← URLTeam '|' present but not at the fixed width
///   └── Wire(WireError)     ← the underlying reader failed
/// ```
///
/// Offending lines are carried with their terminator stripped.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("invalid character {ch:?} in meta field: {line:?}")]
    InvalidMetaChar { ch: char, line: String },

    /// The line starts `#:`, `# ` or `#\t`, leaving an empty field name.
    #[error("meta line missing field name: {line:?}")]
    MetaMissingName { line: String },

    #[error("meta line missing value: {line:?}")]
    MetaMissingValue { line: String },

    #[error("link line has too many bar separators: {line:?}")]
    TooManySeparators { line: String },

    #[error("link line missing bar separator: {line:?}")]
    MissingSeparator { line: String },

    /// The line has a `'|'`, just not at offset `width`.
    #[error("shortcode not {width} characters: {line:?}")]
    ShortcodeWidth { width: usize, line: String },

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl From<std::io::Error> for LineError {
    fn from(err: std::io::Error) -> Self {
        Self::Wire(WireError::Io(err))
    }
}

/// A [`LineError`] pinned to the line it happened on.
///
/// Displays as `beacon: line N: <cause>`. This is the only error type the
/// public readers return.
#[derive(Debug, thiserror::Error)]
#[error("beacon: line {line}: {kind}")]
pub struct DecodeError {
    line: u64,
    kind: LineError,
}

impl DecodeError {
    /// Attach a line number to a cause.
    #[must_use]
    pub fn at(line: u64, kind: LineError) -> Self {
        Self { line, kind }
    }

    /// 1-based number of the last physical line read when the error arose.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    #[must_use]
    pub fn kind(&self) -> &LineError {
        &self.kind
    }

    #[must_use]
    pub fn into_kind(self) -> LineError {
        self.kind
    }

    /// Whether the underlying reader failed, as opposed to malformed input.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self.kind, LineError::Wire(_))
    }
}
