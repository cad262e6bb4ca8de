//! Bivariate Analysis Module
//! Pearson correlation and Welch's two-sample t-test between two columns.

use crate::data::Dataset;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Result of Welch's t-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TTestResult {
    pub t_stat: f64,
    pub mean1: f64,
    pub mean2: f64,
    pub n1: usize,
    pub n2: usize,
    /// Welch-Satterthwaite degrees of freedom; `None` when the standard error is zero.
    pub degrees_of_freedom: Option<f64>,
    /// Two-tailed p-value; `None` when the standard error is zero.
    pub p_value: Option<f64>,
    pub is_significant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
    Flat,
}

/// Verbal reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationStrength {
    pub strength: Strength,
    pub direction: Direction,
}

impl CorrelationStrength {
    /// |r| > 0.7 is strong, |r| > 0.3 moderate, anything else weak.
    pub fn classify(r: f64) -> Self {
        let strength = if r.abs() > 0.7 {
            Strength::Strong
        } else if r.abs() > 0.3 {
            Strength::Moderate
        } else {
            Strength::Weak
        };
        let direction = if r > 0.0 {
            Direction::Positive
        } else if r < 0.0 {
            Direction::Negative
        } else {
            Direction::Flat
        };
        Self {
            strength,
            direction,
        }
    }
}

/// Pearson coefficients for every pair of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` correlates `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Correlation and significance tests between columns.
pub struct BivariateAnalyzer;

impl BivariateAnalyzer {
    /// Pearson's r over row-aligned pairs. `None` with fewer than two pairs;
    /// `0` when either side has no variance.
    pub fn pearson_pairs(points: &[(f64, f64)]) -> Option<f64> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for &(x, y) in points {
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
            sum_yy += y * y;
        }

        let numerator = n * sum_xy - sum_x * sum_y;
        let denominator = ((n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y)).sqrt();

        // Rounding can push a constant column's variance slightly negative.
        if denominator == 0.0 || !denominator.is_finite() {
            return Some(0.0);
        }
        Some((numerator / denominator).clamp(-1.0, 1.0))
    }

    /// Pearson's r between two columns; rows missing either number are skipped.
    pub fn pearson(dataset: &Dataset, col_a: &str, col_b: &str) -> Option<f64> {
        Self::pearson_pairs(&dataset.paired_numbers(col_a, col_b))
    }

    /// Correlation of every numeric column against every other, in parallel.
    pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
        let columns = dataset.numeric_columns().to_vec();
        let values: Vec<Vec<Option<f64>>> = columns
            .par_iter()
            .map(|a| {
                columns
                    .iter()
                    .map(|b| Self::pearson(dataset, a, b))
                    .collect::<Vec<_>>()
            })
            .collect();

        CorrelationMatrix { columns, values }
    }

    /// Perform Welch's t-test (independent samples, unequal variance).
    pub fn welch_t_test_samples(
        sample1: &[f64],
        sample2: &[f64],
        significance_level: f64,
    ) -> Option<TTestResult> {
        let (n1, n2) = (sample1.len(), sample2.len());
        if n1 < 2 || n2 < 2 {
            return None;
        }
        let (n1f, n2f) = (n1 as f64, n2 as f64);

        let mean1 = sample1.iter().sum::<f64>() / n1f;
        let mean2 = sample2.iter().sum::<f64>() / n2f;

        let var1 = sample1.iter().map(|x| (x - mean1).powi(2)).sum::<f64>() / (n1f - 1.0);
        let var2 = sample2.iter().map(|x| (x - mean2).powi(2)).sum::<f64>() / (n2f - 1.0);

        let se = (var1 / n1f + var2 / n2f).sqrt();
        if se == 0.0 {
            return Some(TTestResult {
                t_stat: 0.0,
                mean1,
                mean2,
                n1,
                n2,
                degrees_of_freedom: None,
                p_value: None,
                is_significant: false,
            });
        }

        let t = (mean1 - mean2) / se;

        // Welch-Satterthwaite degrees of freedom
        let df_num = (var1 / n1f + var2 / n2f).powi(2);
        let df_denom = (var1 / n1f).powi(2) / (n1f - 1.0) + (var2 / n2f).powi(2) / (n2f - 1.0);
        let df = df_num / df_denom;

        // Two-tailed p-value using t-distribution
        let p_value = StudentsT::new(0.0, 1.0, df)
            .ok()
            .map(|dist| 2.0 * (1.0 - dist.cdf(t.abs())));

        Some(TTestResult {
            t_stat: t,
            mean1,
            mean2,
            n1,
            n2,
            degrees_of_freedom: Some(df),
            p_value,
            is_significant: p_value.is_some_and(|p| p <= significance_level),
        })
    }

    /// Welch's t-test between the number cells of two columns (unpaired).
    pub fn welch_t_test(dataset: &Dataset, col_a: &str, col_b: &str) -> Option<TTestResult> {
        Self::welch_t_test_with_level(dataset, col_a, col_b, SIGNIFICANCE_THRESHOLD)
    }

    pub fn welch_t_test_with_level(
        dataset: &Dataset,
        col_a: &str,
        col_b: &str,
        significance_level: f64,
    ) -> Option<TTestResult> {
        Self::welch_t_test_samples(
            &dataset.numbers(col_a),
            &dataset.numbers(col_b),
            significance_level,
        )
    }
}
