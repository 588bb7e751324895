// The aggregation engine: call legs in, per-agent per-day summary out.
//
// Pure and synchronous; a failure at any step discards all work and the
// error is returned to the caller, never a partial table.
use crate::error::ReportError;
use crate::types::{AgentSummary, CallRecord, DateMetrics, SummaryTable};
use crate::util::{parse_call_date, round_avg};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Call legs longer than this many seconds count as connected ("CR").
/// Shorter legs are treated as abandoned / voicemail.
const CONNECTED_THRESHOLD_SECS: f64 = 59.0;

#[derive(Default)]
struct GroupAcc {
    calls: usize,
    total_secs: f64,
    connected: usize,
    connected_secs: f64,
}

/// Aggregate raw call records into a [`SummaryTable`].
///
/// Records are stable-sorted by their full start timestamp (the export
/// format makes lexicographic order chronological), filtered down to
/// agent-side legs, grouped by (agent, calendar date), and reduced to
/// four metrics per group. Every known agent gets a cell group for
/// every known date, even with zero calls there; averages over an empty
/// denominator come out as `None` rather than failing. Rows are sorted
/// ascending by agent id.
///
/// Any timestamp whose first 10 characters do not parse as `YYYY/MM/DD`
/// aborts the whole run with [`ReportError::MalformedTimestamp`].
pub fn generate_result(records: &[CallRecord]) -> Result<SummaryTable, ReportError> {
    // Deterministic basis for date-first-seen ordering; the stable sort
    // keeps input order for equal timestamps.
    let mut sorted: Vec<&CallRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.call_start.cmp(&b.call_start));

    // Only agent-side legs count toward agent performance. Other legs
    // are dropped without diagnostics.
    let legs = sorted.into_iter().filter(|r| r.dial_leg == "agent");

    // Each distinct timestamp prefix is parsed once.
    let mut date_cache: HashMap<&str, NaiveDate> = HashMap::new();

    let mut agents: Vec<String> = Vec::new();
    let mut agent_idx: HashMap<&str, usize> = HashMap::new();
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut date_idx: HashMap<NaiveDate, usize> = HashMap::new();

    // (agent index, date index) -> running totals, built in one pass.
    let mut groups: HashMap<(usize, usize), GroupAcc> = HashMap::new();

    for leg in legs {
        let prefix = leg
            .call_start
            .get(..10)
            .ok_or_else(|| ReportError::MalformedTimestamp(leg.call_start.clone()))?;
        let date = match date_cache.get(prefix) {
            Some(d) => *d,
            None => {
                let d = parse_call_date(&leg.call_start)
                    .ok_or_else(|| ReportError::MalformedTimestamp(leg.call_start.clone()))?;
                date_cache.insert(prefix, d);
                d
            }
        };

        let ai = *agent_idx
            .entry(leg.agent_username.as_str())
            .or_insert_with(|| {
                agents.push(leg.agent_username.clone());
                agents.len() - 1
            });
        let di = *date_idx.entry(date).or_insert_with(|| {
            dates.push(date);
            dates.len() - 1
        });

        let acc = groups.entry((ai, di)).or_default();
        acc.calls += 1;
        acc.total_secs += leg.duration_secs;
        if leg.duration_secs > CONNECTED_THRESHOLD_SECS {
            acc.connected += 1;
            acc.connected_secs += leg.duration_secs;
        }
    }

    // Materialize a full cell group for every (agent, date) pair.
    let mut rows: Vec<AgentSummary> = agents
        .iter()
        .enumerate()
        .map(|(ai, agent)| {
            let per_date = (0..dates.len())
                .map(|di| match groups.get(&(ai, di)) {
                    Some(acc) => DateMetrics {
                        calls_attempted: acc.calls,
                        avg_duration_secs: round_avg(acc.total_secs, acc.calls),
                        connected_calls: acc.connected,
                        avg_connected_duration_secs: round_avg(acc.connected_secs, acc.connected),
                    },
                    None => DateMetrics::default(),
                })
                .collect();
            AgentSummary {
                agent_id: agent.clone(),
                per_date,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));

    Ok(SummaryTable { dates, rows })
}
