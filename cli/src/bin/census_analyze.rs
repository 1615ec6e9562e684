//! census-analyze
//!
//! ```bash
//! census-analyze districts.txt states.bin        # every line
//! census-analyze districts.txt states.bin 500    # first 500 lines
//! ```
//!
//! - RUST_LOG - Logging level (optional, default: warn)

use clap::Parser;

use census_cli::{init_logging, run_analyze, AnalyzeArgs};

fn main() -> anyhow::Result<()> {
    let args = AnalyzeArgs::parse();
    init_logging(args.verbose);

    let snapshot = run_analyze(&args)?;
    if args.telemetry {
        eprintln!("{}", snapshot.to_json()?);
    }
    Ok(())
}
