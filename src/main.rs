//! CLI entry point for brand pattern generation

use brandpattern::io::cli::{Cli, PatternRunner};
use clap::Parser;

// Allow print for reporting the written artifact paths
#[allow(clippy::print_stdout)]
fn main() -> brandpattern::Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let mut runner = PatternRunner::new(cli);
    let written = runner.run()?;
    if !quiet {
        for path in written {
            println!("{}", path.display());
        }
    }
    Ok(())
}
