// Terminal bar charts for the "Visualize Result" step.
//
// For each metric column, agents are ranked descending and drawn as
// horizontal bars colored along a green-to-red gradient: best rank
// green, worst rank red.
use crate::types::{MetricKind, SummaryTable};
use crate::util::format_date_dmy;

/// Width of the longest bar, in terminal cells.
const BAR_WIDTH: usize = 50;

const GRADIENT_START: (f64, f64, f64) = (0.0, 128.0, 0.0); // green
const GRADIENT_END: (f64, f64, f64) = (255.0, 0.0, 0.0); // red

/// RGB color for a given rank, linearly interpolated between the
/// gradient endpoints. A single bar gets the start color.
fn gradient(rank: usize, total: usize) -> (u8, u8, u8) {
    let t = if total <= 1 {
        0.0
    } else {
        rank as f64 / (total - 1) as f64
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    (
        lerp(GRADIENT_START.0, GRADIENT_END.0),
        lerp(GRADIENT_START.1, GRADIENT_END.1),
        lerp(GRADIENT_START.2, GRADIENT_END.2),
    )
}

/// Draw one ranked bar chart. `bars` must already be sorted descending;
/// `None` cells draw no bar, just the `-` sentinel.
fn render_chart(title: &str, bars: &[(String, Option<i64>)]) {
    println!("{}", title);
    let max = bars.iter().filter_map(|(_, v)| *v).max().unwrap_or(0);
    let label_width = bars.iter().map(|(a, _)| a.len()).max().unwrap_or(0);
    for (rank, (agent, value)) in bars.iter().enumerate() {
        match value {
            Some(v) => {
                let len = if max > 0 {
                    ((*v as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let (r, g, b) = gradient(rank, bars.len());
                println!(
                    "{:>width$}  \x1b[38;2;{};{};{}m{}\x1b[0m {}",
                    agent,
                    r,
                    g,
                    b,
                    "█".repeat(len),
                    v,
                    width = label_width
                );
            }
            None => println!("{:>width$}  -", agent, width = label_width),
        }
    }
    println!();
}

/// Render one chart per metric column, rows re-ranked by that column
/// descending. Ties keep the table's agent order; empty cells sink to
/// the bottom.
pub fn visualize(table: &SummaryTable) {
    for (di, date) in table.dates.iter().enumerate() {
        for kind in MetricKind::ALL {
            let column = format!("{}: {}", format_date_dmy(*date), kind.label());
            let mut bars: Vec<(String, Option<i64>)> = table
                .rows
                .iter()
                .map(|row| (row.agent_id.clone(), row.per_date[di].value(kind)))
                .collect();
            bars.sort_by(|a, b| b.1.cmp(&a.1));
            render_chart(&column, &bars);
        }
    }
}
