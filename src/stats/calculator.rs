//! Statistics Calculator Module
//! Handles descriptive statistics for numeric columns.

use crate::data::Dataset;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Summary of the number cells of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divisor = count).
    pub std_dev: f64,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    /// Returns `None` for an empty slice.
    pub fn compute_descriptive_stats(column: &str, values: &[f64]) -> Option<ColumnStats> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        Some(ColumnStats {
            column: column.to_string(),
            count: n,
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }

    /// Statistics over the number cells of `column`; text and missing cells
    /// are ignored. `None` when the column has no numbers.
    pub fn compute_column_stats(dataset: &Dataset, column: &str) -> Option<ColumnStats> {
        Self::compute_descriptive_stats(column, &dataset.numbers(column))
    }

    /// Statistics for every numeric column in parallel, in header order.
    /// Columns without numbers are left out.
    pub fn compute_all_stats(dataset: &Dataset) -> Vec<ColumnStats> {
        dataset
            .numeric_columns()
            .par_iter()
            .filter_map(|column| Self::compute_column_stats(dataset, column))
            .collect()
    }
}
