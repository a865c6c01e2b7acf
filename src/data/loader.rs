//! CSV Loader Module
//! Reads the input table into a Polars DataFrame.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file not found at {0}")]
    MissingFile(PathBuf),
    #[error("failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Load a CSV file with Polars schema inference. No schema is assumed; the
/// columns are whatever the file declares.
pub fn load_table(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::MissingFile(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .finish()?
        .collect()?;

    Ok(df)
}

/// Column names in declared order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Columns with a numeric dtype, in declared order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
        .map(|col| col.name().to_string())
        .collect()
}
