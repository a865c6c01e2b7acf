//! Data Cleaner Module
//! Parses dates, normalizes decimal separators and drops unusable rows.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("failed to parse any dates from column '{column}'")]
    DateParseFailure { column: String },
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Date-only formats tried in order. Ambiguous slashed dates resolve
/// month-first; day-first is the fallback.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y%m%d",
];

/// Datetime formats whose date part is kept.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Days between 0001-01-01 (CE) and the Unix epoch.
const EPOCH_CE_DAYS: i32 = 719_163;

/// Lenient date parsing: first matching format wins, anything else is `None`.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Parallel date/temperature sequences left after the paired drop.
#[derive(Debug, Clone, Default)]
pub struct CleanedSeries {
    pub dates: Vec<NaiveDate>,
    pub temperatures: Vec<f64>,
}

impl CleanedSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Temperatures whose date falls in the given calendar month.
    pub fn month_values(&self, month: u32) -> Vec<f64> {
        self.dates
            .iter()
            .zip(&self.temperatures)
            .filter(|(date, _)| date.month() == month)
            .map(|(_, temp)| *temp)
            .collect()
    }
}

/// Produce the cleaned series for the two resolved columns.
///
/// A cell that fails to parse becomes a missing marker; a row is dropped when
/// either of its two markers is missing. Only a column where every date fails
/// is fatal.
pub fn clean(df: &DataFrame, date_col: &str, temp_col: &str) -> Result<CleanedSeries, CleanerError> {
    let date_series = df.column(date_col)?;
    let mut parsed_dates = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let value = date_series.get(i)?;
        parsed_dates.push(cell_to_date(&value));
    }
    if parsed_dates.iter().all(Option::is_none) {
        return Err(CleanerError::DateParseFailure {
            column: date_col.to_string(),
        });
    }

    let temperatures = coerce_temperatures(df.column(temp_col)?)?;

    let mut series = CleanedSeries::default();
    for (date, temp) in parsed_dates.into_iter().zip(temperatures) {
        if let (Some(date), Some(temp)) = (date, temp) {
            series.dates.push(date);
            series.temperatures.push(temp);
        }
    }
    Ok(series)
}

fn cell_to_date(value: &AnyValue) -> Option<NaiveDate> {
    match value {
        AnyValue::Null => None,
        AnyValue::Date(days) => NaiveDate::from_num_days_from_ce_opt(days + EPOCH_CE_DAYS),
        AnyValue::String(s) => parse_date_lenient(s),
        AnyValue::StringOwned(s) => parse_date_lenient(s),
        other => parse_date_lenient(other.to_string().trim_matches('"')),
    }
}

/// Textual columns get comma decimal separators normalized before the numeric
/// parse; anything else is cast to Float64 wholesale.
fn coerce_temperatures(column: &Column) -> Result<Vec<Option<f64>>, CleanerError> {
    if column.dtype() == &DataType::String {
        let mut values = Vec::with_capacity(column.len());
        for i in 0..column.len() {
            let value = column.get(i)?;
            values.push(cell_to_number(&value));
        }
        return Ok(values);
    }

    let cast = column.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    Ok(ca.into_iter().map(|v| v.filter(|x| x.is_finite())).collect())
}

fn cell_to_number(value: &AnyValue) -> Option<f64> {
    if value.is_null() {
        return None;
    }
    let raw = value.to_string();
    let normalized = raw.trim_matches('"').trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn comma_decimal_is_normalized() {
        let df = df!(
            "DATE" => &["2021-05-01"],
            "TAVG" => &["21,5"],
        )
        .unwrap();

        let series = clean(&df, "DATE", "TAVG").unwrap();
        assert_eq!(series.temperatures, vec![21.5]);
    }

    #[test]
    fn valid_rows_survive_unchanged() {
        let df = df!(
            "DATE" => &["2021-05-01", "2021-05-02", "2021-07-01"],
            "TAVG" => &[10.5, 11.0, 21.5],
        )
        .unwrap();

        let series = clean(&df, "DATE", "TAVG").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.dates,
            vec![ymd(2021, 5, 1), ymd(2021, 5, 2), ymd(2021, 7, 1)]
        );
        assert_eq!(series.temperatures, vec![10.5, 11.0, 21.5]);
    }

    #[test]
    fn row_dropped_iff_either_field_fails() {
        let df = df!(
            "DATE" => &["2021-05-01", "not a date", "2021-05-03", "junk"],
            "TAVG" => &["10,0", "11,0", "oops", "x"],
        )
        .unwrap();

        let series = clean(&df, "DATE", "TAVG").unwrap();
        assert_eq!(series.dates, vec![ymd(2021, 5, 1)]);
        assert_eq!(series.temperatures, vec![10.0]);
    }

    #[test]
    fn all_dates_unparseable_is_fatal() {
        let df = df!(
            "DATE" => &["first", "second"],
            "TAVG" => &[1.0, 2.0],
        )
        .unwrap();

        let err = clean(&df, "DATE", "TAVG").unwrap_err();
        match err {
            CleanerError::DateParseFailure { column } => assert_eq!(column, "DATE"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn numeric_temperature_column_casts_directly() {
        let df = df!(
            "DATE" => &["2021-07-01", "2021-07-02"],
            "TAVG" => &[20i64, 22i64],
        )
        .unwrap();

        let series = clean(&df, "DATE", "TAVG").unwrap();
        assert_eq!(series.temperatures, vec![20.0, 22.0]);
    }

    #[test]
    fn lenient_parser_accepts_common_formats() {
        let expected = ymd(2021, 5, 1);
        for raw in [
            "2021-05-01",
            "2021/05/01",
            "5/1/2021",
            "01.05.2021",
            "20210501",
            "2021-05-01 12:30:00",
            "2021-05-01T12:30:00",
            "  2021-05-01  ",
        ] {
            assert_eq!(parse_date_lenient(raw), Some(expected), "failed on {raw}");
        }

        // Impossible as month-first, valid day-first.
        assert_eq!(parse_date_lenient("31/12/2021"), Some(ymd(2021, 12, 31)));

        assert_eq!(parse_date_lenient("banana"), None);
        assert_eq!(parse_date_lenient(""), None);
        assert_eq!(parse_date_lenient("2021-13-40"), None);
    }

    #[test]
    fn month_values_filters_by_calendar_month() {
        let series = CleanedSeries {
            dates: vec![ymd(2021, 5, 1), ymd(2021, 7, 1), ymd(2021, 7, 2)],
            temperatures: vec![10.0, 21.0, 23.0],
        };

        assert_eq!(series.month_values(7), vec![21.0, 23.0]);
        assert_eq!(series.month_values(5), vec![10.0]);
        assert!(series.month_values(1).is_empty());
    }
}
