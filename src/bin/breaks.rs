//! Natural Breaks Binary
//!
//! Classifies numbers read from a file or stdin.

use clap::Parser;
use jenks::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    jenks::log(args.level());
    args.run()
}
