//! Stats module - descriptive statistics, correlation, t-tests and regression

mod bivariate;
mod calculator;
mod regression;

pub use bivariate::{
    BivariateAnalyzer, CorrelationMatrix, CorrelationStrength, Direction, Strength, TTestResult,
    SIGNIFICANCE_THRESHOLD,
};
pub use calculator::{ColumnStats, StatsCalculator};
pub use regression::{
    ForecastPoint, PredictionPoint, RegressionModel, RegressionResult, DEFAULT_FORECAST_STEPS,
};
