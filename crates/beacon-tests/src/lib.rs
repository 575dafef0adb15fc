//! Shared fixtures for the BEACON integration tests and benches.
//!
//! Golden dumps live in `tests/golden/` and are committed as-is; the
//! synthetic generators build larger dumps in memory for benchmarks.

use std::fmt::Write as _;
use std::path::Path;

use beacon_decoder::{BeaconReader, DecodeError};
use beacon_types::{Dialect, Link, MetaField};

/// Read `tests/golden/<name>`.
///
/// # Panics
///
/// Panics if the fixture is missing.
#[must_use]
pub fn golden(name: &str) -> Vec<u8> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest_dir.join("tests/golden").join(name);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Decode a whole in-memory dump with the blocking reader.
///
/// # Errors
///
/// Returns the first decode error.
pub fn decode_all(
    input: &[u8],
    dialect: Dialect,
) -> Result<(Vec<MetaField>, Vec<Link>), DecodeError> {
    let mut reader = BeaconReader::new(input, dialect);
    let meta = reader.meta()?.to_vec();
    let links = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((meta, links))
}

/// Render meta fields and links the way `beacon inspect` prints them,
/// without the escaping: one rendered record per line, no trailing newline.
#[must_use]
pub fn render(meta: &[MetaField], links: &[Link]) -> String {
    meta.iter()
        .map(ToString::to_string)
        .chain(links.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}

/// RFC dump with a small header and `n` links, every third one annotated.
#[must_use]
pub fn synthetic_rfc(n: usize) -> String {
    let mut out = String::from("#FORMAT: BEACON\n#PREFIX: http://example.org/\n\n");
    for i in 0..n {
        if i % 3 == 0 {
            let _ = writeln!(out, "id{i}|seen {i} times|http://target.example/{i}");
        } else {
            let _ = writeln!(out, "id{i}|http://target.example/{i}");
        }
    }
    out
}

/// Fixed-width URLTeam dump with `n` records; every fifth target spans
/// two physical lines.
#[must_use]
pub fn synthetic_urlteam(n: usize, width: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let code = format!("{i:0>width$}");
        let code = &code[code.len() - width..];
        if i % 5 == 0 {
            let _ = writeln!(out, "{code}|http://long.example/{i}?q=");
            let _ = writeln!(out, "continued-{i}");
        } else {
            let _ = writeln!(out, "{code}|http://short.example/{i}");
        }
    }
    out
}
