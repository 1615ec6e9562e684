//! census-report
//!
//! ```bash
//! census-report states.bin                  # full table
//! census-report states.bin 10 --format json # first 10 records as JSON lines
//! ```
//!
//! - RUST_LOG - Logging level (optional, default: warn)

use std::io;

use clap::Parser;

use census_cli::{init_logging, run_report, ReportArgs};

fn main() -> anyhow::Result<()> {
    let args = ReportArgs::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let snapshot = run_report(&args, &mut out)?;
    if args.telemetry {
        eprintln!("{}", snapshot.to_json()?);
    }
    Ok(())
}
