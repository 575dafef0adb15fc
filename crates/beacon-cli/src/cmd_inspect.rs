/// Implementation of `beacon inspect`.
///
/// Streams a dump and prints its header meta fields followed by its links
/// in rendered form, one record per output line.
///
/// # Output format
///
/// ```text
/// #FORMAT: BEACON
/// #PREFIX: http://example.org/
/// src|http://t/
/// src|note|http://u/
/// ab|http://x.com/\nlong
/// ```
///
/// Line breaks embedded in multi-line targets are printed as `\n` / `\r`
/// escapes so every record stays on one line.
use std::borrow::Cow;
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use beacon_types::Dialect;

use crate::{InspectArgs, open_dump};

/// Run the `beacon inspect` command.
///
/// # Errors
///
/// Returns an error if the dump cannot be opened, a line is malformed, or
/// stdout cannot be written.
pub fn run(args: &InspectArgs, dialect: Dialect) -> Result<()> {
    let mut reader = open_dump(&args.file, dialect)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let meta = reader
        .meta()
        .with_context(|| format!("failed to read header of {}", args.file.display()))?;
    for field in meta {
        writeln!(out, "{}", one_line(&field.to_string())).context("cannot write to stdout")?;
    }
    if args.meta_only {
        return Ok(());
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    for link in reader.take(limit) {
        let link = link.with_context(|| format!("failed to decode {}", args.file.display()))?;
        writeln!(out, "{}", one_line(&link.to_string())).context("cannot write to stdout")?;
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Escape CR and LF so a rendered record fits on one output line.
fn one_line(rendered: &str) -> Cow<'_, str> {
    if rendered.contains(['\n', '\r']) {
        Cow::Owned(rendered.replace('\r', "\\r").replace('\n', "\\n"))
    } else {
        Cow::Borrowed(rendered)
    }
}
