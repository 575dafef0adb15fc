/// Implementation of `beacon stats`.
///
/// Streams a dump and prints a summary of its shape.
///
/// # Example output
///
/// ```text
/// File:    dumps/tinyurl.txt
/// Dialect: urlteam (shortcode width 6)
/// Meta:    2 fields
///
/// Links                 1200
/// ──────────────────────────────
/// with annotation          0
/// empty target             3
/// multi-line target       14
/// distinct sources      1197
/// ```
///
/// `--json` prints the same numbers as one JSON object. Counting distinct
/// sources keeps one copy of every source in memory.
use std::collections::HashSet;

use anyhow::{Context, Result};
use beacon_types::{Dialect, Link};
use serde::Serialize;

use crate::{StatsArgs, open_dump};

/// Counters gathered over one pass of the dump.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DumpStats {
    pub meta_fields: usize,
    pub links: usize,
    pub annotated: usize,
    pub empty_targets: usize,
    pub multiline_targets: usize,
    pub distinct_sources: usize,
}

impl DumpStats {
    /// Tally `links` on top of a header of `meta_fields` fields.
    ///
    /// # Errors
    ///
    /// Passes through the first decode error from the iterator.
    pub fn collect<E>(
        meta_fields: usize,
        links: impl IntoIterator<Item = Result<Link, E>>,
    ) -> Result<Self, E> {
        let mut stats = Self {
            meta_fields,
            ..Self::default()
        };
        let mut sources = HashSet::new();
        for link in links {
            let link = link?;
            stats.links += 1;
            stats.annotated += usize::from(link.has_annotation());
            stats.empty_targets += usize::from(link.target.is_empty());
            stats.multiline_targets += usize::from(link.is_multiline());
            sources.insert(link.source);
        }
        stats.distinct_sources = sources.len();
        Ok(stats)
    }
}

/// Run the `beacon stats` command.
///
/// # Errors
///
/// Returns an error if the dump cannot be opened or fails to decode.
pub fn run(args: &StatsArgs, dialect: Dialect) -> Result<()> {
    let mut reader = open_dump(&args.file, dialect)?;
    let meta_fields = reader
        .meta()
        .with_context(|| format!("failed to read header of {}", args.file.display()))?
        .len();
    let stats = DumpStats::collect(meta_fields, reader)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&stats).context("cannot serialise stats")?;
        println!("{json}");
        return Ok(());
    }

    // ── Print report ──────────────────────────────────────────────────────────

    println!("File:    {}", args.file.display());
    println!("Dialect: {}", dialect_label(dialect));
    println!("Meta:    {} fields", stats.meta_fields);
    println!();

    let sep = "─".repeat(30);
    println!("{:<20}{:>10}", "Links", stats.links);
    println!("{sep}");
    println!("{:<20}{:>10}", "with annotation", stats.annotated);
    println!("{:<20}{:>10}", "empty target", stats.empty_targets);
    println!("{:<20}{:>10}", "multi-line target", stats.multiline_targets);
    println!("{:<20}{:>10}", "distinct sources", stats.distinct_sources);

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn dialect_label(dialect: Dialect) -> String {
    match (dialect, dialect.fixed_width()) {
        (Dialect::Rfc, _) => "rfc".to_string(),
        (Dialect::UrlTeam { .. }, Some(w)) => format!("urlteam (shortcode width {w})"),
        (Dialect::UrlTeam { .. }, None) => "urlteam (variable width)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_counts_link_shapes() {
        let links = vec![
            Ok::<_, ()>(Link::new("ab", "http://x/\nmore")),
            Ok(Link::annotated("ab", "note", "http://y/")),
            Ok(Link::new("cd", "")),
        ];
        let stats = DumpStats::collect(2, links).unwrap();
        assert_eq!(
            stats,
            DumpStats {
                meta_fields: 2,
                links: 3,
                annotated: 1,
                empty_targets: 1,
                multiline_targets: 1,
                distinct_sources: 2,
            }
        );
    }

    #[test]
    fn collect_stops_at_first_error() {
        let links = vec![Ok(Link::new("a", "b")), Err("boom"), Ok(Link::new("c", "d"))];
        assert_eq!(DumpStats::collect(0, links), Err("boom"));
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(DumpStats::default()).unwrap();
        assert_eq!(json["multiline_targets"], 0);
        assert_eq!(json["distinct_sources"], 0);
    }

    #[test]
    fn dialect_labels() {
        assert_eq!(dialect_label(Dialect::Rfc), "rfc");
        assert_eq!(dialect_label(Dialect::url_team(6)), "urlteam (shortcode width 6)");
        assert_eq!(dialect_label(Dialect::url_team(0)), "urlteam (variable width)");
    }
}
