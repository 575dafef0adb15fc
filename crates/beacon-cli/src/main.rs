/// BEACON command-line tool: inspect, validate, and summarise BEACON link
/// dumps in either the RFC or the URLTeam dialect.
///
/// # Command overview
///
/// ```text
/// beacon [OPTIONS] <COMMAND>
///
/// Commands:
///   inspect     Print meta fields and links, one per line
///   validate    Decode the whole dump and report the first error
///   stats       Print link counts and shape statistics
///   shortcodes  Print distinct sources, shortest first
///   help        Print help information
///
/// Global options:
///   --dialect <rfc|urlteam>   Dump dialect (default: rfc)
///   --shortcode-len <N>       Fixed URLTeam shortcode width, 0 = variable
///   -v, --verbose             Debug-level logging on stderr
///   -h, --help                Print help
///   -V, --version             Print version
/// ```
///
/// `-` as the file argument reads the dump from stdin. Dumps are always
/// streamed, never loaded whole.
///
/// # Exit codes
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Success                                      |
/// | 1    | Error (I/O failure, malformed line, etc.)    |
///
/// All error details and log output go to stderr so stdout can be piped
/// cleanly.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use beacon_decoder::BeaconReader;
use beacon_types::Dialect;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_shortcodes;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The BEACON link dump command-line tool.
#[derive(Parser)]
#[command(name = "beacon", version, about = "BEACON link dump CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dump dialect.
    #[arg(long, value_enum, default_value_t = DialectArg::Rfc, global = true)]
    dialect: DialectArg,

    /// Fixed shortcode width for URLTeam dumps; 0 splits on the first `|`.
    #[arg(long, default_value_t = 0, global = true)]
    shortcode_len: usize,
}

/// `--dialect` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// Generic draft-RFC dialect: `source[|annotation]|target`.
    Rfc,
    /// URLTeam dialect: `shortcode|target`, no annotation.
    Urlteam,
}

impl Cli {
    fn dialect(&self) -> Dialect {
        match self.dialect {
            DialectArg::Rfc => Dialect::Rfc,
            DialectArg::Urlteam => Dialect::url_team(self.shortcode_len),
        }
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print meta fields and links, one per line.
    Inspect(InspectArgs),
    /// Decode the whole dump and report the first error, if any.
    Validate(ValidateArgs),
    /// Print link counts and shape statistics.
    Stats(StatsArgs),
    /// Print distinct sources, shortest first.
    Shortcodes(ShortcodesArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `beacon inspect`.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                           │
/// ├─────────────┼──────────────────────────────────────────────────┤
/// │ --limit N   │ Stop after N links                               │
/// │ --meta-only │ Print the header meta fields and no links        │
/// └─────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Dump file to read, or `-` for stdin.
    pub file: PathBuf,

    /// Stop after this many links.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print only the header meta fields.
    #[arg(long)]
    pub meta_only: bool,
}

/// Arguments for `beacon validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Dump file to validate, or `-` for stdin.
    pub file: PathBuf,
}

/// Arguments for `beacon stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Dump file to analyse, or `-` for stdin.
    pub file: PathBuf,

    /// Print the statistics as a JSON object.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `beacon shortcodes`.
#[derive(clap::Args)]
pub struct ShortcodesArgs {
    /// Dump file to read, or `-` for stdin.
    pub file: PathBuf,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Open `path` (or stdin for `-`) as a streaming dump reader.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_dump(path: &Path, dialect: Dialect) -> Result<BeaconReader<Box<dyn BufRead>>> {
    let reader: Box<dyn BufRead> = if path == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        Box::new(BufReader::new(file))
    };
    tracing::debug!(path = %path.display(), ?dialect, "opened dump");
    Ok(BeaconReader::new(reader, dialect))
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let dialect = cli.dialect();

    let result = match &cli.command {
        Commands::Inspect(args) => cmd_inspect::run(args, dialect),
        Commands::Validate(args) => cmd_validate::run(args, dialect),
        Commands::Stats(args) => cmd_stats::run(args, dialect),
        Commands::Shortcodes(args) => cmd_shortcodes::run(args, dialect),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn dialect_flags_map_to_dialect() {
        let cli = Cli::parse_from(["beacon", "--dialect", "urlteam", "--shortcode-len", "6", "stats", "x"]);
        assert_eq!(cli.dialect(), Dialect::url_team(6));

        let cli = Cli::parse_from(["beacon", "validate", "x", "--dialect", "urlteam"]);
        assert_eq!(cli.dialect(), Dialect::UrlTeam { shortcode_len: None });

        let cli = Cli::parse_from(["beacon", "inspect", "x"]);
        assert_eq!(cli.dialect(), Dialect::Rfc);
    }
}
