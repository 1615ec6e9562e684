//! census-cli
//!
//! Argument parsing, logging setup and the two run loops behind the
//! `census-analyze` and `census-report` binaries.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use census_core::aggregate::ReadLimit;
use census_core::io::{aggregate_source, open_aggregate, write_sink, InputSource, OutputSink};
use census_core::report::{render_report, ReportFormat};
use census_core::telemetry::{Stage, TelemetrySnapshot, TelemetryTimer};

/// Aggregate district child-poverty lines into a per-state binary file
#[derive(Parser, Debug, Clone)]
#[command(name = "census-analyze", version)]
pub struct AnalyzeArgs {
    /// Fixed-width district input file
    pub input: PathBuf,

    /// Binary aggregate file to create
    pub output: PathBuf,

    /// Input lines to read (all when omitted; zero or negative reads none)
    #[arg(allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print run telemetry as JSON on stderr
    #[arg(long)]
    pub telemetry: bool,
}

/// Print a per-state child-poverty report from a binary aggregate file
#[derive(Parser, Debug, Clone)]
#[command(name = "census-report", version)]
pub struct ReportArgs {
    /// Binary aggregate file written by census-analyze
    pub input: PathBuf,

    /// Records to print (all when omitted; zero or negative prints headings only)
    #[arg(allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: ReportFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print run telemetry as JSON on stderr
    #[arg(long)]
    pub telemetry: bool,
}

/// Install the stderr logger. `RUST_LOG` wins over the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Read, aggregate and write. Returns the run's telemetry.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<TelemetrySnapshot> {
    let mut timer = TelemetryTimer::new();
    let limit = ReadLimit::from(args.limit);

    let agg = timer.time(Stage::Aggregate, || {
        aggregate_source(InputSource::File(args.input.clone()), limit)
    })?;

    let mut counters = agg.counters().clone();
    let records = agg.into_records();

    let bytes = timer.time(Stage::Write, || {
        write_sink(OutputSink::File(args.output.clone()), &records, &mut counters)
    })?;
    timer.finish();

    info!(
        "{} states, {} bytes -> {}",
        records.len(),
        bytes,
        args.output.display()
    );
    Ok(TelemetrySnapshot::from(&counters, &timer))
}

/// Decode and render to `out`. Returns the run's telemetry; decoded records
/// and leftover bytes are in its counters.
pub fn run_report<W: Write>(args: &ReportArgs, out: &mut W) -> Result<TelemetrySnapshot> {
    let mut timer = TelemetryTimer::new();
    let mut reader = open_aggregate(&args.input, ReadLimit::from(args.limit))?;

    let rows = timer.time(Stage::Report, || {
        render_report(out, &args.input, &mut reader, args.format)
    })?;
    timer.finish();

    let counters = reader.counters();
    if counters.trailing_bytes > 0 {
        warn!(
            "{} ends with {} bytes that do not form a whole record",
            args.input.display(),
            counters.trailing_bytes
        );
    }

    info!("rendered {rows} records from {}", args.input.display());
    Ok(TelemetrySnapshot::from(counters, &timer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arg_definitions_are_consistent() {
        AnalyzeArgs::command().debug_assert();
        ReportArgs::command().debug_assert();
    }

    #[test]
    fn negative_limit_is_accepted() {
        let args = AnalyzeArgs::try_parse_from(["census-analyze", "in.txt", "out.bin", "-3"]).unwrap();
        assert_eq!(args.limit, Some(-3));
        assert_eq!(ReadLimit::from(args.limit), ReadLimit::At(0));
    }

    #[test]
    fn output_path_is_required() {
        assert!(AnalyzeArgs::try_parse_from(["census-analyze", "in.txt"]).is_err());
    }

    #[test]
    fn report_format_defaults_to_table() {
        let args = ReportArgs::try_parse_from(["census-report", "agg.bin"]).unwrap();
        assert_eq!(args.format, ReportFormat::Table);
        assert_eq!(args.limit, None);

        let args = ReportArgs::try_parse_from(["census-report", "agg.bin", "5", "--format", "json"]).unwrap();
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(args.limit, Some(5));
        assert!(!args.telemetry);

        let args = ReportArgs::try_parse_from(["census-report", "agg.bin", "--telemetry"]).unwrap();
        assert!(args.telemetry);
    }
}
