// End-to-end checks over real files:
// district lines -> aggregate_file -> write_aggregate -> read_aggregate / render_report

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use census_core::aggregate::{AggregateError, ReadLimit};
    use census_core::io::{aggregate_file, open_aggregate, read_aggregate, write_aggregate};
    use census_core::parser::ParseError;
    use census_core::records::{RecordError, StateRecord};
    use census_core::report::{format_row, render_report, ReportFormat, HEADINGS, RULE};
    use census_core::types::CensusError;

    fn district_line(state: i32, total: i32, child: i32, poverty: i32) -> String {
        let mut line = format!("{state:02} 00190 Some School District");
        while line.len() < 82 {
            line.push(' ');
        }
        line.push_str(&format!("{total:>8} {child:>8} {poverty:>8} USSD13.txt 24NOV2014  "));
        line
    }

    fn write_input(dir: &Path, lines: &[String]) -> std::path::PathBuf {
        let path = dir.join("districts.txt");
        let mut body = lines.join("\n");
        body.push('\n');
        fs::write(&path, body).unwrap();
        path
    }

// # ✅ 1. Two states -> 56 bytes -> exact decode

    #[test]
    fn two_states_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[district_line(1, 31754, 6475, 733), district_line(2, 10000, 2000, 100)],
        );
        let output = dir.path().join("states.bin");

        let records = aggregate_file(&input, ReadLimit::All).unwrap();
        assert_eq!(records.len(), 2);

        let bytes = write_aggregate(&output, &records).unwrap();
        assert_eq!(bytes, 56);
        assert_eq!(fs::metadata(&output).unwrap().len(), 56);

        let decoded = read_aggregate(&output, ReadLimit::All).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(decoded[0].matches(&records[0], 1e-9));
        assert!(decoded[1].matches(&records[1], 1e-9));
        assert!((decoded[0].child_poverty_percentage - 11.3205).abs() < 1e-4);
        assert!((decoded[1].child_poverty_percentage - 5.0).abs() < 1e-12);
    }

// # ✅ 2. Districts of one state merge, first-seen order is kept

    #[test]
    fn districts_merge_in_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[
                district_line(5, 100, 50, 10),
                district_line(1, 200, 100, 20),
                district_line(5, 300, 150, 30),
            ],
        );

        let records = aggregate_file(&input, ReadLimit::All).unwrap();
        assert_eq!(
            records,
            vec![
                StateRecord::new(5, 400, 200, 40).unwrap(),
                StateRecord::new(1, 200, 100, 20).unwrap(),
            ]
        );
    }

// # ✅ 3. Line limits on both sides

    #[test]
    fn limits_bound_lines_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[
                district_line(1, 10, 5, 1),
                district_line(2, 10, 5, 1),
                district_line(3, 10, 5, 1),
            ],
        );
        let output = dir.path().join("states.bin");

        assert_eq!(aggregate_file(&input, ReadLimit::from(2i64)).unwrap().len(), 2);
        assert!(aggregate_file(&input, ReadLimit::from(0i64)).unwrap().is_empty());
        assert!(aggregate_file(&input, ReadLimit::from(-1i64)).unwrap().is_empty());

        let records = aggregate_file(&input, ReadLimit::All).unwrap();
        write_aggregate(&output, &records).unwrap();
        assert_eq!(read_aggregate(&output, ReadLimit::At(1)).unwrap().len(), 1);
        assert_eq!(read_aggregate(&output, ReadLimit::At(10)).unwrap().len(), 3);
    }

// # ✅ 4. Empty input -> empty file -> headings only

    #[test]
    fn empty_input_gives_empty_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        fs::write(&input, "").unwrap();
        let output = dir.path().join("states.bin");

        let records = aggregate_file(&input, ReadLimit::All).unwrap();
        assert!(records.is_empty());
        assert_eq!(write_aggregate(&output, &records).unwrap(), 0);
        assert_eq!(fs::metadata(&output).unwrap().len(), 0);

        let mut out = Vec::new();
        let reader = open_aggregate(&output, ReadLimit::All).unwrap();
        let rows = render_report(&mut out, &output, reader, ReportFormat::Table).unwrap();
        assert_eq!(rows, 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(&format!("{HEADINGS}\n{RULE}\n")));
    }

// # ✅ 5. Truncated aggregate stops cleanly

    #[test]
    fn truncated_aggregate_is_a_clean_stop() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("states.bin");
        let records = vec![
            StateRecord::new(1, 31754, 6475, 733).unwrap(),
            StateRecord::new(2, 10000, 2000, 100).unwrap(),
        ];
        write_aggregate(&output, &records).unwrap();

        let mut bytes = fs::read(&output).unwrap();
        bytes.truncate(40);
        fs::write(&output, &bytes).unwrap();

        let mut reader = open_aggregate(&output, ReadLimit::All).unwrap();
        assert!(reader.next().unwrap().unwrap().matches(&records[0], 1e-9));
        assert!(reader.next().is_none());
        assert_eq!(reader.counters().trailing_bytes, 12);
    }

// # ✅ 6. Table report from a real file

    #[test]
    fn table_report_matches_layout() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("states.bin");
        let records = vec![StateRecord::new(1, 31754, 6475, 733).unwrap()];
        write_aggregate(&output, &records).unwrap();

        let mut out = Vec::new();
        let reader = open_aggregate(&output, ReadLimit::All).unwrap();
        render_report(&mut out, &output, reader, ReportFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("File: "));
        assert!(lines[1].ends_with("states.bin"));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], HEADINGS);
        assert_eq!(lines[4], RULE);
        assert_eq!(
            lines[5],
            "   01      31,754             6,475                       733            11.32"
        );

        let decoded = read_aggregate(&output, ReadLimit::All).unwrap();
        assert_eq!(lines[5], format_row(&decoded[0]));
    }

// # ✅ 7. Fatal input errors carry the line number

    #[test]
    fn short_line_aborts_with_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            &[district_line(1, 10, 5, 1), "01 too short".to_string()],
        );

        match aggregate_file(&input, ReadLimit::All) {
            Err(CensusError::Aggregate(AggregateError::Parse { line, source })) => {
                assert_eq!(line, 2);
                assert!(matches!(source, ParseError::LineTooShort { .. }));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn containment_violation_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), &[district_line(1, 10, 50, 1)]);

        match aggregate_file(&input, ReadLimit::All) {
            Err(CensusError::Aggregate(AggregateError::Parse { line, source })) => {
                assert_eq!(line, 1);
                assert_eq!(
                    source,
                    ParseError::Record(RecordError::Containment { total: 10, child: 50, poverty: 1 })
                );
            }
            other => panic!("expected containment error, got {other:?}"),
        }
    }
}
