use crate::types::{AgentSummary, MetricKind, SummaryTable};
use crate::util::cell;
use std::error::Error;
use tabled::{builder::Builder, settings::Style};

/// Flatten one summary row into wide-table cells: agent id first, then
/// four metric cells per date. Empty-group averages render as `-`.
fn render_row(row: &AgentSummary) -> Vec<String> {
    let mut cells = vec![row.agent_id.clone()];
    for metrics in &row.per_date {
        for kind in MetricKind::ALL {
            cells.push(cell(metrics.value(kind)));
        }
    }
    cells
}

/// Write the full wide table as CSV. The column set depends on the
/// dates found in the input, so rows are written record-by-record
/// instead of through serde.
pub fn write_csv(path: &str, table: &SummaryTable) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.column_names())?;
    for row in &table.rows {
        wtr.write_record(render_row(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Print a Markdown-style preview of the first `max_rows` rows.
pub fn preview_table(table: &SummaryTable, max_rows: usize) {
    if table.rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(table.column_names());
    for row in table.rows.iter().take(max_rows) {
        builder.push_record(render_row(row));
    }
    let table_str = builder.build().with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Export filename derived from the table's last column name, the way
/// the report was always distributed: `cc_report_<last column>.csv`.
/// Column names contain `/`, `:` and spaces, so anything outside
/// `[A-Za-z0-9]` becomes `_`.
pub fn export_filename(table: &SummaryTable) -> String {
    let cols = table.column_names();
    let last = cols.last().map(String::as_str).unwrap_or("empty");
    let safe: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("cc_report_{}.csv", safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentSummary, DateMetrics, SummaryTable};
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn sample_table() -> SummaryTable {
        SummaryTable {
            dates: vec![NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()],
            rows: vec![
                AgentSummary {
                    agent_id: "alice".to_string(),
                    per_date: vec![DateMetrics {
                        calls_attempted: 2,
                        avg_duration_secs: Some(50),
                        connected_calls: 1,
                        avg_connected_duration_secs: Some(70),
                    }],
                },
                AgentSummary {
                    agent_id: "bob".to_string(),
                    per_date: vec![DateMetrics {
                        calls_attempted: 1,
                        avg_duration_secs: Some(10),
                        connected_calls: 0,
                        avg_connected_duration_secs: None,
                    }],
                },
            ],
        }
    }

    #[test]
    fn render_row_flattens_metrics_in_column_order() {
        let table = sample_table();
        assert_eq!(render_row(&table.rows[0]), vec!["alice", "2", "50", "1", "70"]);
        assert_eq!(render_row(&table.rows[1]), vec!["bob", "1", "10", "0", "-"]);
    }

    #[test]
    fn write_csv_emits_header_and_all_rows() {
        let path = format!(
            "{}/cc_report_output_test.csv",
            env::temp_dir().display()
        );
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Agent ID,"));
        assert!(lines[0].contains("01/03/2024: # CR"));
        assert!(lines[1].starts_with("alice,"));
        assert!(lines[2].ends_with(",-"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn export_filename_is_sanitized() {
        let name = export_filename(&sample_table());
        assert_eq!(name, "cc_report_01_03_2024__Avg_CR_Duration_s_.csv");
    }

    #[test]
    fn preview_table_does_not_panic_on_empty_table() {
        let table = SummaryTable {
            dates: vec![],
            rows: vec![],
        };
        preview_table(&table, 5);
    }
}
