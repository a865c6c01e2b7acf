//! Wetterstat - Weather CSV Temperature Analysis
//!
//! Loads a weather observation CSV, detects the date and temperature columns,
//! cleans the values and compares July against May with a Welch t-test.

mod data;
mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;
use data::{clean, column_names, load_table, resolve_columns, CleanedSeries};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Fixed input file, expected next to the executable.
const INPUT_FILE_NAME: &str = "wetter.csv";

/// Calendar months compared by the analysis.
const JULY: u32 = 7;
const MAY: u32 = 5;

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    run(&default_input_path())
}

/// The whole pipeline, top to bottom. Every stage returns a `Result`; the
/// first failure aborts the run with its diagnostic.
fn run(csv_path: &Path) -> Result<()> {
    println!("Attempting to load: {}", csv_path.display());
    let df = load_table(csv_path)?;
    info!(rows = df.height(), "table loaded");

    println!("\nColumns in CSV: {:?}", column_names(&df));
    println!("\nFirst 5 rows (raw):");
    println!("{}", df.head(Some(5)));

    let resolved = resolve_columns(&df)?;
    println!("\nUsing date column: '{}'", resolved.date);
    println!("Using temperature column: '{}'", resolved.temperature);

    let series = clean(&df, &resolved.date, &resolved.temperature)?;
    info!(rows = series.len(), "cleaning complete");
    println!("\nAfter cleaning: rows = {}", series.len());
    print_cleaned_preview(&series, &resolved.date, &resolved.temperature);

    match stats::mean(&series.temperatures) {
        Some(overall) => println!(
            "\nOverall average temperature ({}): {:.3}",
            resolved.temperature, overall
        ),
        None => warn!("no rows survived cleaning; overall mean is undefined"),
    }

    let july = series.month_values(JULY);
    let may = series.month_values(MAY);
    report_month("July", stats::summarize_month(&july, JULY));
    report_month("May", stats::summarize_month(&may, MAY));

    match stats::welch_ttest(&july, &may) {
        Some(test) => {
            println!("\nT-test July vs May (Welch):");
            println!(
                " t = {:.4}, p = {}",
                test.statistic,
                format_significant(test.p_value, 4)
            );
            if test.is_significant() {
                println!(
                    " -> The difference in mean temperatures between July and May \
                     is statistically significant (p < 0.05)."
                );
            } else {
                println!(" -> No statistically significant difference found (p >= 0.05).");
            }
        }
        None => {
            println!("\nNot enough data to run t-test (need >=2 observations in each month).")
        }
    }

    Ok(())
}

fn default_input_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(INPUT_FILE_NAME)
}

fn print_cleaned_preview(series: &CleanedSeries, date_col: &str, temp_col: &str) {
    println!("{date_col}  {temp_col}");
    for (date, temp) in series.dates.iter().zip(&series.temperatures).take(5) {
        println!("{date}  {temp}");
    }
}

fn report_month(label: &str, summary: stats::MonthlySummary) {
    match summary.mean {
        Some(mean) => println!(
            "Average temperature in {label}: {mean:.3} (n={})",
            summary.count
        ),
        None => warn!(month = summary.month, "no {} records found", label),
    }
}

/// Fixed number of significant digits in the style of `%g`: scientific
/// notation outside the readable range and no trailing zeros.
fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    if magnitude < -4 || magnitude >= digits as i32 {
        return format!("{value:.prec$e}", prec = digits - 1);
    }
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
