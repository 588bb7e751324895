// Entry point and high-level CLI flow.
//
// The Rust binary mirrors the flow of the original web app:
// - Option [1] loads a call-log export, printing diagnostics.
// - Option [2] aggregates it into the per-agent per-day summary,
//   previews the table, exports the full CSV, and optionally renders
//   the ranked bar charts.
// - After generating a report, the user can go back to the menu or
//   exit.
mod chart;
mod error;
mod loader;
mod output;
mod report;
mod types;
mod util;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::CallRecord;

// Simple in-memory app state so we only load the export once but can
// generate reports multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<CallRecord>>,
}

/// Print `prompt` and read a single trimmed line of input.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask a `Y/N` question until the user answers one of the two.
fn prompt_yes_no(prompt: &str) -> bool {
    loop {
        match read_line(prompt).to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load a call-log export.
///
/// On success, we store the `Vec<CallRecord>` in `APP_STATE` and print
/// a short textual summary of what happened.
fn handle_load() {
    let path = read_line("Path to call log export (csv): ");
    if path.is_empty() {
        println!("No path entered.\n");
        return;
    }
    match loader::load_export(&path) {
        Ok((data, load_report)) => {
            println!(
                "Processing export... ({} rows read, {} usable)",
                util::format_int(load_report.total_rows as i64),
                util::format_int(load_report.usable_rows as i64)
            );
            if load_report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse/validation errors.",
                    util::format_int(load_report.parse_errors as i64)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: aggregate, preview, export, and optionally chart.
fn handle_generate_report() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the export first (option 1).\n");
        return;
    };

    println!("Generating report...");
    let table = match report::generate_result(&data) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Report generation failed: {}\n", e);
            return;
        }
    };

    println!("Call Centre Performance Summary");
    println!("(One row per agent, four metrics per day)\n");
    output::preview_table(&table, 10);

    let file = output::export_filename(&table);
    if let Err(e) = output::write_csv(&file, &table) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", file);

    if prompt_yes_no("Visualize Result (Y/N): ") {
        println!();
        chart::visualize(&table);
    }
}

fn main() {
    loop {
        println!("Call Centre Performance Report");
        println!("[1] Load the file");
        println!("[2] Generate Report\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_report();
                if !prompt_yes_no("Back to Report Selection (Y/N): ") {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
