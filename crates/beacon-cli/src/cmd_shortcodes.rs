/// Implementation of `beacon shortcodes`.
///
/// Prints every distinct link source once, ordered shortest first and
/// lexicographically within a length. For URLTeam dumps this is the list
/// of shortcodes the dump resolves, in the order shortener enumerations
/// use.
///
/// ```text
/// a
/// b
/// ab
/// zz
/// abc
/// ```
use std::cmp::Ordering;
use std::collections::HashSet;
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use beacon_types::{Dialect, Link};

use crate::{ShortcodesArgs, open_dump};

/// Run the `beacon shortcodes` command.
///
/// # Errors
///
/// Returns an error if the dump cannot be opened or fails to decode.
pub fn run(args: &ShortcodesArgs, dialect: Dialect) -> Result<()> {
    let reader = open_dump(&args.file, dialect)?;
    let shortcodes = distinct_sources(reader)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for code in &shortcodes {
        writeln!(out, "{code}").context("cannot write to stdout")?;
    }
    tracing::debug!(count = shortcodes.len(), "listed shortcodes");
    Ok(())
}

/// Distinct sources, sorted with [`shortcode_order`].
///
/// # Errors
///
/// Passes through the first decode error.
pub fn distinct_sources<E>(links: impl IntoIterator<Item = Result<Link, E>>) -> Result<Vec<String>, E> {
    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for link in links {
        let link = link?;
        if seen.insert(link.source.clone()) {
            codes.push(link.source);
        }
    }
    codes.sort_by(|a, b| shortcode_order(a, b));
    Ok(codes)
}

/// Shorter shortcodes first; equal lengths compare lexicographically.
#[must_use]
pub fn shortcode_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
