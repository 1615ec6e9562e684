//! report.rs
//! Tabular (and JSON lines) rendering of decoded aggregate records.
//!
//! Design notes:
//! - The table layout is fixed: five columns separated by two spaces, counts
//!   grouped by thousands, percentage to two decimals.
//! - Rendering pulls records lazily; a decode error mid-stream aborts the
//!   report after the rows already written.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::codec::{CodecError, DecodedRecord};
use crate::types::CensusError;

pub const HEADINGS: &str = "State  Population  Child Population  Child Poverty Population  % Child Poverty";
pub const RULE: &str     = "-----  ----------  ----------------  ------------------------  ---------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    /// One JSON object per record per line.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other} (expected table or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Table => "table",
            ReportFormat::Json => "json",
        })
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: i32) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One table row (no trailing newline).
pub fn format_row(r: &DecodedRecord) -> String {
    format!(
        "   {:02}  {:>10}  {:>16}  {:>24}  {:>15.2}",
        r.state_code,
        group_thousands(r.total_population),
        group_thousands(r.child_population),
        group_thousands(r.child_poverty_population),
        r.child_poverty_percentage
    )
}

/// File line, column headings and rule.
pub fn write_headings<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    writeln!(out)?;
    writeln!(out, "File: {}", shown.display())?;
    writeln!(out)?;
    writeln!(out, "{HEADINGS}")?;
    writeln!(out, "{RULE}")
}

/// Render every record from `records` into `out`. Returns the row count.
pub fn render_report<W, I>(
    out: &mut W,
    path: &Path,
    records: I,
    format: ReportFormat,
) -> Result<usize, CensusError>
where
    W: Write,
    I: IntoIterator<Item = Result<DecodedRecord, CodecError>>,
{
    if format == ReportFormat::Table {
        write_headings(out, path)?;
    }

    let mut rows = 0;
    for record in records {
        let record = record?;
        match format {
            ReportFormat::Table => writeln!(out, "{}", format_row(&record))?,
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: i32, total: i32, child: i32, poverty: i32, pct: f64) -> DecodedRecord {
        DecodedRecord {
            state_code: state,
            total_population: total,
            child_population: child,
            child_poverty_population: poverty,
            child_poverty_percentage: pct,
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(31754), "31,754");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1234), "-1,234");
        assert_eq!(group_thousands(i32::MIN), "-2,147,483,648");
    }

    #[test]
    fn row_matches_column_layout() {
        let r = row(1, 31754, 6475, 733, 100.0 * 733.0 / 6475.0);
        let line = format_row(&r);
        assert_eq!(
            line,
            "   01      31,754             6,475                       733            11.32"
        );
        assert_eq!(line.len(), 3 + HEADINGS.len() - "State".len() + 2);
    }

    #[test]
    fn nan_percentage_renders() {
        let line = format_row(&row(9, 10, 0, 0, f64::NAN));
        assert!(line.ends_with("NaN"));
    }

    #[test]
    fn table_report_has_headings_then_rows() {
        let mut out = Vec::new();
        let rows = vec![Ok(row(1, 10, 5, 1, 20.0)), Ok(row(2, 20, 10, 1, 10.0))];
        let n = render_report(&mut out, Path::new("agg.bin"), rows, ReportFormat::Table).unwrap();
        assert_eq!(n, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("File: ") && lines[1].ends_with("agg.bin"));
        assert_eq!(lines[3], HEADINGS);
        assert_eq!(lines[4], RULE);
        assert!(lines[5].starts_with("   01"));
        assert!(lines[6].ends_with("10.00"));
    }

    #[test]
    fn json_report_is_one_object_per_line() {
        let mut out = Vec::new();
        let rows = vec![Ok(row(2, 10000, 2000, 100, 5.0))];
        render_report(&mut out, Path::new("agg.bin"), rows, ReportFormat::Json).unwrap();

        let text = String::from_utf8(out).unwrap();
        let v: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(v["state_code"], 2);
        assert_eq!(v["child_poverty_percentage"], 5.0);
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("csv".parse::<ReportFormat>().is_err());
    }
}
