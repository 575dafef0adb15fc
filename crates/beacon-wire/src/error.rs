/// Errors raised while pulling lines off the underlying byte stream.
///
/// The line cursor has no grammar of its own, so the only thing that can
/// go wrong at this layer is the source itself failing. End-of-stream is
/// not an error here: the cursor reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// I/O error from the underlying reader, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
