//! Column Resolver Module
//! Detects the date and temperature columns through an ordered strategy chain.

use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::cleaner::parse_date_lenient;
use super::loader::{column_names, numeric_columns};

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("could not detect a date column; columns were: {}", columns.join(", "))]
    DateColumnNotFound { columns: Vec<String> },
    #[error("could not detect a temperature column; columns were: {}", columns.join(", "))]
    TemperatureColumnNotFound { columns: Vec<String> },
}

/// Expected date column spellings, tried before content inspection.
const DATE_CANDIDATES: [&str; 5] = ["DATE", "Date", "date", "Datum", "datum"];

/// Expected temperature column spellings.
const TEMP_CANDIDATES: [&str; 9] = [
    "TAVG",
    "Tavg",
    "temp",
    "Temp",
    "TEMP",
    "Temperatur",
    "temperatur",
    "Temperature",
    "temperature",
];

/// Non-empty cells inspected per column when sniffing date content.
const SNIFF_SAMPLE_SIZE: usize = 10;

/// The two columns the pipeline operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub date: String,
    pub temperature: String,
}

pub fn resolve_columns(df: &DataFrame) -> Result<ResolvedColumns, ResolverError> {
    let date = resolve_date_column(df)?;
    let temperature = resolve_temperature_column(df)?;
    Ok(ResolvedColumns { date, temperature })
}

/// Candidate list, case-insensitive candidates, then content sniffing.
/// First match in declared column order wins at every stage.
pub fn resolve_date_column(df: &DataFrame) -> Result<String, ResolverError> {
    let columns = column_names(df);
    exact_match(&columns, &DATE_CANDIDATES)
        .or_else(|| case_insensitive_match(&columns, &DATE_CANDIDATES))
        .or_else(|| sniff_date_column(df))
        .ok_or(ResolverError::DateColumnNotFound { columns })
}

/// Candidate list, case-insensitive candidates, name substring, then the
/// first numeric column.
pub fn resolve_temperature_column(df: &DataFrame) -> Result<String, ResolverError> {
    let columns = column_names(df);
    exact_match(&columns, &TEMP_CANDIDATES)
        .or_else(|| case_insensitive_match(&columns, &TEMP_CANDIDATES))
        .or_else(|| name_substring_match(&columns, &["temp", "temper"]))
        .or_else(|| numeric_columns(df).into_iter().next())
        .ok_or(ResolverError::TemperatureColumnNotFound { columns })
}

fn exact_match(columns: &[String], candidates: &[&str]) -> Option<String> {
    columns
        .iter()
        .find(|c| candidates.contains(&c.as_str()))
        .cloned()
}

fn case_insensitive_match(columns: &[String], candidates: &[&str]) -> Option<String> {
    columns
        .iter()
        .find(|c| {
            let lowered = c.to_lowercase();
            candidates.iter().any(|cand| cand.to_lowercase() == lowered)
        })
        .cloned()
}

fn name_substring_match(columns: &[String], needles: &[&str]) -> Option<String> {
    columns
        .iter()
        .find(|c| {
            let lowered = c.to_lowercase();
            needles.iter().any(|needle| lowered.contains(needle))
        })
        .cloned()
}

/// First column whose sampled cells all parse as dates. Columns with no
/// non-empty cells are skipped.
fn sniff_date_column(df: &DataFrame) -> Option<String> {
    for col in df.get_columns() {
        let samples = sample_values(col, SNIFF_SAMPLE_SIZE);
        if !samples.is_empty() && samples.iter().all(|s| parse_date_lenient(s).is_some()) {
            debug!(column = %col.name(), "date column detected by content");
            return Some(col.name().to_string());
        }
    }
    None
}

/// Up to `limit` non-empty cells of a column, rendered as strings.
fn sample_values(col: &Column, limit: usize) -> Vec<String> {
    let mut samples = Vec::with_capacity(limit);
    for i in 0..col.len() {
        if samples.len() == limit {
            break;
        }
        let Ok(value) = col.get(i) else { continue };
        if value.is_null() {
            continue;
        }
        let rendered = value.to_string().trim_matches('"').to_string();
        if !rendered.trim().is_empty() {
            samples.push(rendered);
        }
    }
    samples
}
