//! Statistics module - monthly aggregation and the Welch t-test

mod calculator;

pub use calculator::{mean, summarize_month, welch_ttest, MonthlySummary, TTestResult};
