//! Analytics Pro - tabular data ingestion & statistics core
//!
//! Parses CSV, spreadsheet and HTML tables into a typed [`Dataset`], then
//! computes descriptive statistics, correlation, Welch's t-test and simple
//! linear regression over its numeric columns.
//!
//! ```
//! use analytics_pro::data::parse_delimited;
//! use analytics_pro::stats::{RegressionModel, StatsCalculator};
//!
//! let ds = parse_delimited("demo.csv", "x,y\n1,2\n2,4\n3,6\n4,8\n").unwrap();
//! let stats = StatsCalculator::compute_column_stats(&ds, "y").unwrap();
//! assert_eq!(stats.mean, 5.0);
//!
//! let fit = RegressionModel::linear_regression(&ds, "x", "y", 1).unwrap();
//! assert_eq!(fit.equation, "y = 2.0000x + 0.0000");
//! ```

pub mod config;
pub mod data;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use data::{CellValue, DataLoader, Dataset, ParseError};
pub use stats::{ColumnStats, RegressionResult, TTestResult};
