//! Data module - CSV loading, column detection and cleaning

mod cleaner;
mod loader;
mod resolver;

pub use cleaner::{clean, CleanedSeries, CleanerError};
pub use loader::{column_names, load_table, LoaderError};
pub use resolver::{resolve_columns, ResolvedColumns, ResolverError};
