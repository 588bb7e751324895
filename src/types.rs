use crate::util::format_date_dmy;
use chrono::NaiveDate;
use serde::Deserialize;

/// One CSV row as exported by the dialler, addressed by column name.
/// Exports carry more columns than these; the rest are ignored.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Agent Username")]
    pub agent_username: Option<String>,
    #[serde(rename = "Call Start DT")]
    pub call_start: Option<String>,
    #[serde(rename = "Call Dur Full")]
    pub call_dur_full: Option<String>,
    #[serde(rename = "Dial Leg")]
    pub dial_leg: Option<String>,
}

/// A cleaned call-leg record, one per row that survived loading.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub agent_username: String,
    /// Full start timestamp as exported; the first 10 characters are
    /// expected to be a `YYYY/MM/DD` calendar date.
    pub call_start: String,
    pub duration_secs: f64,
    /// Which side of the call this row represents (`"agent"`,
    /// `"customer"`, ...). Only agent legs count toward the report.
    pub dial_leg: String,
}

/// The four metrics reported per (agent, date) group, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    CallsAttempted,
    AvgDuration,
    ConnectedCalls,
    AvgConnectedDuration,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::CallsAttempted,
        MetricKind::AvgDuration,
        MetricKind::ConnectedCalls,
        MetricKind::AvgConnectedDuration,
    ];

    /// Column label suffix, appended to the `DD/MM/YYYY` date prefix.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::CallsAttempted => "# Calls Attempted",
            MetricKind::AvgDuration => "Avg Call Duration(s)",
            MetricKind::ConnectedCalls => "# CR",
            MetricKind::AvgConnectedDuration => "Avg CR Duration(s)",
        }
    }
}

/// Metrics for one (agent, date) cell group.
///
/// Averages are `None` when the denominator is zero: an agent with no
/// calls on a date has no average duration, and a group with no
/// connected calls has no CR average. `None` renders as `-`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateMetrics {
    pub calls_attempted: usize,
    pub avg_duration_secs: Option<i64>,
    pub connected_calls: usize,
    pub avg_connected_duration_secs: Option<i64>,
}

impl DateMetrics {
    pub fn value(&self, kind: MetricKind) -> Option<i64> {
        match kind {
            MetricKind::CallsAttempted => Some(self.calls_attempted as i64),
            MetricKind::AvgDuration => self.avg_duration_secs,
            MetricKind::ConnectedCalls => Some(self.connected_calls as i64),
            MetricKind::AvgConnectedDuration => self.avg_connected_duration_secs,
        }
    }
}

/// One report row; `per_date` is aligned index-for-index with
/// [`SummaryTable::dates`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSummary {
    pub agent_id: String,
    pub per_date: Vec<DateMetrics>,
}

/// The finished report in keyed form: the wide, column-named table is
/// only materialized at the preview/export boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    /// Distinct calendar dates in order of first appearance in the
    /// timestamp-sorted input.
    pub dates: Vec<NaiveDate>,
    /// One row per agent, sorted ascending by agent id.
    pub rows: Vec<AgentSummary>,
}

impl SummaryTable {
    /// Header row of the wide table: `Agent ID`, then four metric
    /// columns per date.
    pub fn column_names(&self) -> Vec<String> {
        let mut cols = vec!["Agent ID".to_string()];
        for d in &self.dates {
            for kind in MetricKind::ALL {
                cols.push(format!("{}: {}", format_date_dmy(*d), kind.label()));
            }
        }
        cols
    }
}
