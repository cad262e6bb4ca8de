//! Placeholder Dataset Module
//! Document formats (PDF, Word, PowerPoint) are not extracted. A clearly
//! synthetic dataset stands in for them so the rest of the pipeline can run.

use super::cell::CellValue;
use super::dataset::{Dataset, DatasetBuilder, DatasetOrigin};
use super::loader::ParseError;
use chrono::{Days, NaiveDate};
use log::warn;

/// Rows generated for every placeholder.
pub const PLACEHOLDER_ROWS: usize = 50;

const DEPARTMENTS: [&str; 4] = ["HR", "IT", "Sales", "Marketing"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const CATEGORIES: [&str; 3] = ["Electronics", "Home", "Office"];

/// Document kinds that get a placeholder instead of real extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Pptx,
}

/// Build the deterministic placeholder for `file_name`.
///
/// Names mentioning `finance` or `budget` get a financial layout; everything
/// else gets a product inventory layout. The result is always marked
/// [`DatasetOrigin::Synthetic`].
pub fn synthetic_dataset(file_name: &str, kind: DocumentKind) -> Result<Dataset, ParseError> {
    warn!("{file_name}: {kind:?} content is not extracted, using a synthetic placeholder");

    let lower = file_name.to_lowercase();
    let financial = lower.contains("finance") || lower.contains("budget");

    let headers: &[&str] = if financial {
        &["Date", "Department", "Revenue", "Expenses", "Profit", "Region"]
    } else {
        &["ID", "Product", "Category", "Sales", "Rating", "Stock"]
    };

    let mut builder =
        DatasetBuilder::new(file_name, headers.iter().map(|h| h.to_string()).collect())?;

    for i in 0..PLACEHOLDER_ROWS {
        let row = if financial {
            financial_row(i)
        } else {
            product_row(i)
        };
        builder.push_cells(row);
    }

    Ok(builder.finish(DatasetOrigin::Synthetic))
}

fn financial_row(i: usize) -> Vec<CellValue> {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|start| start.checked_add_days(Days::new(i as u64)))
        .map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string()))
        .unwrap_or(CellValue::Missing);

    let revenue = 1000 + (i * 7919) % 10000;
    let expenses = 500 + (i * 4973) % 8000;
    let profit = revenue as f64 - expenses as f64;

    vec![
        date,
        CellValue::Text(DEPARTMENTS[(i * 3 + 1) % DEPARTMENTS.len()].to_string()),
        CellValue::Number(revenue as f64),
        CellValue::Number(expenses as f64),
        CellValue::Number(profit),
        CellValue::Text(REGIONS[(i * 5 + 2) % REGIONS.len()].to_string()),
    ]
}

fn product_row(i: usize) -> Vec<CellValue> {
    vec![
        CellValue::Number((1000 + i) as f64),
        CellValue::Text(format!("Item {i}")),
        CellValue::Text(CATEGORIES[(i * 2 + 1) % CATEGORIES.len()].to_string()),
        CellValue::Number(((i * 37) % 500) as f64),
        CellValue::Number(((i * 13) % 50) as f64 / 10.0),
        CellValue::Number(((i * 29) % 100) as f64),
    ]
}
