//! Regression Module
//! Single-predictor ordinary least squares with a straight-line forecast.

use super::bivariate::BivariateAnalyzer;
use crate::data::Dataset;
use serde::{Deserialize, Serialize};

/// Forecast points produced when the caller does not ask for a count.
pub const DEFAULT_FORECAST_STEPS: usize = 5;

/// One observed point with its fitted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    pub x: f64,
    /// Observed value.
    pub y: f64,
    pub predicted_y: f64,
}

/// Extrapolated point beyond the observed x range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    /// `y = {slope}x + {intercept}`, four decimals each.
    pub equation: String,
    /// Observations sorted ascending by x.
    pub predictions: Vec<PredictionPoint>,
    pub future_values: Vec<ForecastPoint>,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits straight lines to column pairs.
pub struct RegressionModel;

impl RegressionModel {
    /// Fit `y_col` against `x_col` over rows where both cells are numbers.
    /// `None` with fewer than two such rows.
    pub fn linear_regression(
        dataset: &Dataset,
        x_col: &str,
        y_col: &str,
        forecast_steps: usize,
    ) -> Option<RegressionResult> {
        Self::fit_points(dataset.paired_numbers(x_col, y_col), forecast_steps)
    }

    /// Closed-form OLS over `(x, y)` points.
    pub fn fit_points(mut points: Vec<(f64, f64)>, forecast_steps: usize) -> Option<RegressionResult> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for &(x, y) in &points {
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        let mut slope = (n * sum_xy - sum_x * sum_y) / denominator;
        // All x equal: no defined slope, fall back to a flat line through mean(y).
        if denominator == 0.0 || !slope.is_finite() {
            slope = 0.0;
        }
        let intercept = (sum_y - slope * sum_x) / n;

        let r = BivariateAnalyzer::pearson_pairs(&points).unwrap_or(0.0);
        let r2 = r * r;

        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let predictions = points
            .iter()
            .map(|&(x, y)| PredictionPoint {
                x,
                y,
                predicted_y: slope * x + intercept,
            })
            .collect();

        // Average spacing of the observed x values guesses the next x.
        let first_x = points[0].0;
        let last_x = points[points.len() - 1].0;
        let mut step = (last_x - first_x) / (n - 1.0);
        if step == 0.0 || !step.is_finite() {
            step = 1.0;
        }

        let future_values = (1..=forecast_steps)
            .map(|i| {
                let x = last_x + step * i as f64;
                ForecastPoint {
                    x,
                    y: slope * x + intercept,
                }
            })
            .collect();

        Some(RegressionResult {
            slope,
            intercept,
            r2,
            equation: format!("y = {slope:.4}x + {intercept:.4}"),
            predictions,
            future_values,
        })
    }
}
