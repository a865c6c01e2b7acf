//! Statistics Calculator Module
//! Descriptive statistics and Welch's t-test.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for the t-test.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Minimum observations per sample before the t-test runs.
pub const MIN_SAMPLES_FOR_TEST: usize = 2;

/// Arithmetic mean, undefined on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator). Caller guarantees n >= 2.
fn sample_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Count and mean for one calendar month subset.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: u32,
    pub count: usize,
    pub mean: Option<f64>,
}

pub fn summarize_month(values: &[f64], month: u32) -> MonthlySummary {
    MonthlySummary {
        month,
        count: values.len(),
        mean: mean(values),
    }
}

/// Outcome of a two-sample comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    pub p_value: f64,
}

impl TTestResult {
    pub fn is_significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_THRESHOLD
    }
}

/// Welch's t-test (independent samples, unequal variance).
///
/// Returns `None` when either sample is too small to test.
pub fn welch_ttest(sample_a: &[f64], sample_b: &[f64]) -> Option<TTestResult> {
    if sample_a.len() < MIN_SAMPLES_FOR_TEST || sample_b.len() < MIN_SAMPLES_FOR_TEST {
        return None;
    }

    let n1 = sample_a.len() as f64;
    let n2 = sample_b.len() as f64;
    let mean1 = mean(sample_a)?;
    let mean2 = mean(sample_b)?;
    let var1 = sample_variance(sample_a, mean1);
    let var2 = sample_variance(sample_b, mean2);

    let se = (var1 / n1 + var2 / n2).sqrt();
    if se == 0.0 {
        // Zero variance in both samples: the means either coincide or differ
        // exactly.
        let statistic = if mean1 == mean2 {
            0.0
        } else {
            f64::INFINITY * (mean1 - mean2).signum()
        };
        let p_value = if mean1 == mean2 { 1.0 } else { 0.0 };
        return Some(TTestResult { statistic, p_value });
    }

    let statistic = (mean1 - mean2) / se;

    // Welch-Satterthwaite degrees of freedom
    let df_num = (var1 / n1 + var2 / n2).powi(2);
    let df_denom = (var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0);
    let degrees = df_num / df_denom;

    // Two-tailed p-value from the t-distribution
    let dist = StudentsT::new(0.0, 1.0, degrees).ok()?;
    let p_value = 2.0 * (1.0 - dist.cdf(statistic.abs()));

    Some(TTestResult { statistic, p_value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_undefined() {
        assert!(mean(&[]).is_none());
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn monthly_summary_reports_count_and_mean() {
        let july = summarize_month(&[20.0, 22.0, 24.0], 7);
        assert_eq!(july.count, 3);
        assert_eq!(july.mean, Some(22.0));

        let may = summarize_month(&[10.0, 11.0, 12.0], 5);
        assert_eq!(may.count, 3);
        assert_eq!(may.mean, Some(11.0));

        let empty = summarize_month(&[], 5);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, None);
    }

    #[test]
    fn test_skipped_below_minimum_observations() {
        assert!(welch_ttest(&[20.0], &[10.0, 11.0, 12.0, 13.0, 14.0]).is_none());
        assert!(welch_ttest(&[20.0, 21.0], &[]).is_none());
    }

    #[test]
    fn clearly_separated_months_are_significant() {
        let result = welch_ttest(&[20.0, 22.0, 24.0], &[10.0, 11.0, 12.0]).unwrap();
        assert!(result.statistic > 0.0);
        assert!(result.p_value < 0.05);
        assert!(result.is_significant());
    }

    #[test]
    fn welch_statistic_matches_reference() {
        // var(july) = 4, var(may) = 1: t = 11 / sqrt(4/3 + 1/3)
        let result = welch_ttest(&[20.0, 22.0, 24.0], &[10.0, 11.0, 12.0]).unwrap();
        let expected = 11.0 / (5.0f64 / 3.0).sqrt();
        assert!((result.statistic - expected).abs() < 1e-9);
    }

    #[test]
    fn identical_samples_are_not_significant() {
        let result = welch_ttest(&[10.0, 11.0, 12.0], &[10.0, 11.0, 12.0]).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!(result.p_value > 0.9);
        assert!(!result.is_significant());
    }
}
