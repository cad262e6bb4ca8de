//! Dataset Module
//! The normalized table every reader produces, plus the builder that enforces
//! row length and numeric-column inference.

use super::cell::CellValue;
use super::loader::ParseError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a dataset's contents came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetOrigin {
    /// Parsed from the file content.
    Extracted,
    /// Generated placeholder for a format the parser does not read.
    Synthetic,
}

/// One data row, aligned to the dataset headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<CellValue>);

impl Row {
    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.0.get(index)
    }
}

/// Normalized, immutable table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    file_name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
    numeric_columns: Vec<String>,
    origin: DatasetOrigin,
    dropped_rows: usize,
}

impl Dataset {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Numeric columns, in header order.
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn origin(&self) -> DatasetOrigin {
        self.origin
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == DatasetOrigin::Synthetic
    }

    /// Rows discarded because their field count did not match the headers.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == column)
    }

    /// Cell at `row` for the named column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// All cells of a column in row order. Empty for unknown columns.
    pub fn column_cells(&self, column: &str) -> Vec<&CellValue> {
        match self.column_index(column) {
            Some(idx) => self.rows.iter().filter_map(|r| r.get(idx)).collect(),
            None => Vec::new(),
        }
    }

    /// Number cells of a column, ignoring text and missing cells.
    pub fn numbers(&self, column: &str) -> Vec<f64> {
        self.column_cells(column)
            .into_iter()
            .filter_map(CellValue::as_number)
            .collect()
    }

    /// Row-aligned pairs where both cells are numbers.
    pub fn paired_numbers(&self, x_column: &str, y_column: &str) -> Vec<(f64, f64)> {
        let (Some(xi), Some(yi)) = (self.column_index(x_column), self.column_index(y_column))
        else {
            return Vec::new();
        };

        self.rows
            .iter()
            .filter_map(|row| {
                let x = row.get(xi)?.as_number()?;
                let y = row.get(yi)?.as_number()?;
                Some((x, y))
            })
            .collect()
    }
}

/// Accumulates rows for a dataset, dropping rows of the wrong width and
/// narrowing the numeric-column candidates as cells arrive.
pub struct DatasetBuilder {
    file_name: String,
    headers: Vec<String>,
    numeric_candidates: Vec<bool>,
    rows: Vec<Row>,
    dropped_rows: usize,
}

impl DatasetBuilder {
    /// Start a dataset. Fails with [`ParseError::NoHeaders`] when the header
    /// row has no named column.
    pub fn new(file_name: &str, headers: Vec<String>) -> Result<Self, ParseError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ParseError::NoHeaders);
        }

        let headers = dedupe_headers(headers);
        let numeric_candidates = vec![true; headers.len()];

        Ok(Self {
            file_name: file_name.to_string(),
            headers,
            numeric_candidates,
            rows: Vec::new(),
            dropped_rows: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Push a row of typed cells. Returns `false` (and counts the drop) when
    /// the width does not match the headers.
    pub fn push_cells(&mut self, cells: Vec<CellValue>) -> bool {
        if cells.len() != self.headers.len() {
            debug!(
                "{}: dropping row with {} fields (expected {})",
                self.file_name,
                cells.len(),
                self.headers.len()
            );
            self.dropped_rows += 1;
            return false;
        }

        for (candidate, cell) in self.numeric_candidates.iter_mut().zip(&cells) {
            if let CellValue::Text(_) = cell {
                *candidate = false;
            }
        }

        self.rows.push(Row(cells));
        true
    }

    /// Push a row of raw text fields, classifying each one.
    pub fn push_fields<S: AsRef<str>>(&mut self, fields: &[S]) -> bool {
        let cells = fields.iter().map(|f| CellValue::parse(f.as_ref())).collect();
        self.push_cells(cells)
    }

    pub fn finish(self, origin: DatasetOrigin) -> Dataset {
        let numeric_columns = self
            .headers
            .iter()
            .zip(&self.numeric_candidates)
            .filter(|(_, &numeric)| numeric)
            .map(|(h, _)| h.clone())
            .collect();

        Dataset {
            file_name: self.file_name,
            headers: self.headers,
            rows: self.rows,
            numeric_columns,
            origin,
            dropped_rows: self.dropped_rows,
        }
    }
}

/// Make header names unique by suffixing repeats with ` (2)`, ` (3)`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        let mut n = 2;
        while seen.contains(&name) {
            name = format!("{header} ({n})");
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }

    out
}
