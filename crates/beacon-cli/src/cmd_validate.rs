/// Implementation of `beacon validate`.
///
/// Decodes the entire dump and reports either a series of success
/// checkmarks (`✓`) or the first error (`✗`). The command exits with code
/// 0 on a clean dump and code 1 on any error (the dispatcher in `main.rs`
/// turns `Err` into exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Header: 3 meta fields
/// ✓ Links: 1200 links decoded
/// ✓ Lines: 1204 lines read
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: beacon: line 17: link line has too many bar separators: "a|b|c|d"
/// ```
///
/// Decoding stops at the first malformed line; the format has no way to
/// resynchronize, so later lines are not checked.
use anyhow::{Result, anyhow};
use beacon_types::Dialect;

use crate::{ValidateArgs, open_dump};

/// Run the `beacon validate` command.
///
/// # Errors
///
/// Returns an error if the dump cannot be opened or any line fails to
/// decode.
pub fn run(args: &ValidateArgs, dialect: Dialect) -> Result<()> {
    let mut reader = open_dump(&args.file, dialect)?;

    let meta_count = match reader.meta() {
        Ok(meta) => meta.len(),
        Err(e) => {
            println!("✗ Error: {e}");
            return Err(anyhow!("validation failed"));
        }
    };
    println!("✓ Header: {meta_count} meta field{}", plural(meta_count));

    let mut links = 0usize;
    loop {
        match reader.read() {
            Ok(Some(_)) => links += 1,
            Ok(None) => break,
            Err(e) => {
                println!("✗ Error: {e}");
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!("✓ Links: {links} link{} decoded", plural(links));
    println!("✓ Lines: {} lines read", reader.line());
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
