use crate::error::ReportError;
use crate::types::{CallRecord, RawRow};
use crate::util::parse_f64_safe;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of preamble lines the dialler writes before the header row.
const PREAMBLE_LINES: usize = 5;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub usable_rows: usize,
    pub parse_errors: usize,
}

/// Load a raw call-log export from `path`.
///
/// Only `.csv` files are accepted; anything else is
/// [`ReportError::UnsupportedFileType`]. The export starts with
/// [`PREAMBLE_LINES`] lines of report metadata which are skipped before
/// the header row. Rows that fail field-level parsing (missing agent,
/// missing timestamp, non-numeric or negative duration) are skipped and
/// counted in the returned [`LoadReport`].
pub fn load_export(path: &str) -> Result<(Vec<CallRecord>, LoadReport), ReportError> {
    let is_csv = Path::new(path)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(ReportError::UnsupportedFileType(path.to_string()));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    for _ in 0..PREAMBLE_LINES {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
    }

    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records: Vec<CallRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                parse_errors += 1;
                continue;
            }
        };

        let agent_username = match row.agent_username.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        let call_start = match row.call_start.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        let duration_secs = match parse_f64_safe(row.call_dur_full.as_deref()) {
            Some(v) if v >= 0.0 => v,
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        let dial_leg = row.dial_leg.unwrap_or_default().trim().to_string();

        records.push(CallRecord {
            agent_username,
            call_start,
            duration_secs,
            dial_leg,
        });
    }

    let report = LoadReport {
        total_rows,
        usable_rows: records.len(),
        parse_errors,
    };
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn write_export(name: &str, body: &str) -> String {
        let path = temp_path(name);
        // Five preamble lines, as the dialler writes them.
        let preamble = "Call Log Report\nSite: Test\nPeriod: March 2024\n\n\n";
        fs::write(&path, format!("{}{}", preamble, body)).unwrap();
        path
    }

    #[test]
    fn rejects_non_csv_extensions() {
        let err = load_export("export.xlsx").unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFileType(_)));
        let err = load_export("export").unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFileType(_)));
    }

    #[test]
    fn skips_preamble_and_reads_rows() {
        let path = write_export(
            "cc_report_loader_basic.csv",
            "Agent Username,Call Start DT,Call Dur Full,Dial Leg\n\
             alice,2024/03/01 09:00:00,70,agent\n\
             bob,2024/03/01 09:05:00,10,agent\n",
        );

        let (records, report) = load_export(&path).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.usable_rows, 2);
        assert_eq!(report.parse_errors, 0);
        assert_eq!(records[0].agent_username, "alice");
        assert_eq!(records[0].duration_secs, 70.0);
        assert_eq!(records[1].dial_leg, "agent");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn counts_rows_with_bad_fields_as_parse_errors() {
        let path = write_export(
            "cc_report_loader_errors.csv",
            "Agent Username,Call Start DT,Call Dur Full,Dial Leg\n\
             alice,2024/03/01 09:00:00,70,agent\n\
             ,2024/03/01 09:01:00,30,agent\n\
             bob,2024/03/01 09:02:00,not a number,agent\n\
             carol,2024/03/01 09:03:00,-5,agent\n",
        );

        let (records, report) = load_export(&path).unwrap();
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.usable_rows, 1);
        assert_eq!(report.parse_errors, 3);
        assert_eq!(records[0].agent_username, "alice");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn extra_columns_are_ignored() {
        let path = write_export(
            "cc_report_loader_extra.csv",
            "Call ID,Agent Username,Call Start DT,Call Dur Full,Dial Leg,Queue\n\
             1,alice,2024/03/01 09:00:00,70,agent,sales\n",
        );

        let (records, report) = load_export(&path).unwrap();
        assert_eq!(report.usable_rows, 1);
        assert_eq!(records[0].agent_username, "alice");

        fs::remove_file(&path).unwrap();
    }
}
