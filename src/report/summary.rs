//! Summary Request Module
//! The narrative summary itself comes from an external generator; this module
//! prepares the payload handed to it.

use crate::data::Dataset;
use crate::stats::ColumnStats;
use serde::Serialize;
use serde_json::{Map, Value};

/// Rows of the dataset included as a sample.
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// External narrative generator.
pub trait SummaryGenerator {
    fn summarize(
        &self,
        dataset: &Dataset,
        stats: &[ColumnStats],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDigest {
    pub col: String,
    /// Mean rounded to two decimals.
    pub mean: String,
    pub max: f64,
    pub min: f64,
}

/// Everything a summary generator is told about a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub file_name: String,
    pub headers: Vec<String>,
    pub columns: Vec<ColumnDigest>,
    /// First rows keyed by header, keys in header order.
    pub sample: Vec<Map<String, Value>>,
}

impl SummaryRequest {
    pub fn build(dataset: &Dataset, stats: &[ColumnStats], sample_rows: usize) -> Self {
        let columns = stats
            .iter()
            .map(|s| ColumnDigest {
                col: s.column.clone(),
                mean: format!("{:.2}", s.mean),
                max: s.max,
                min: s.min,
            })
            .collect();

        let sample: Vec<Map<String, Value>> = dataset
            .rows()
            .iter()
            .take(sample_rows)
            .map(|row| {
                dataset
                    .headers()
                    .iter()
                    .zip(row.cells())
                    .map(|(h, cell)| (h.clone(), cell.to_json()))
                    .collect::<Map<String, Value>>()
            })
            .collect();

        Self {
            file_name: dataset.file_name().to_string(),
            headers: dataset.headers().to_vec(),
            columns,
            sample,
        }
    }

    /// Analyst prompt text for language-model backed generators.
    pub fn prompt(&self) -> Result<String, serde_json::Error> {
        let stats = serde_json::to_string_pretty(&self.columns)?;
        let sample = serde_json::to_string_pretty(&self.sample)?;

        Ok(format!(
            "Act as a Senior Data Analyst. I have a dataset named \"{name}\".\n\
             \n\
             Here are the columns: {headers}.\n\
             \n\
             Here are some calculated statistics for numeric columns:\n\
             {stats}\n\
             \n\
             Here is a sample of the first {n} rows:\n\
             {sample}\n\
             \n\
             Please provide a comprehensive analysis of this data.\n\
             1. Identify the likely nature of this dataset (what is it tracking?).\n\
             2. Point out any interesting trends or anomalies based on the statistics.\n\
             3. Suggest 3 key business questions this data could answer.\n\
             4. Format the output with clear headings and bullet points using Markdown.\n\
             \n\
             Keep the tone professional and insightful.\n",
            name = self.file_name,
            headers = self.headers.join(", "),
            n = self.sample.len(),
        ))
    }
}
