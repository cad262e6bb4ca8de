//! Data Processor Module
//! Row filtering, sorting and delimited export over a dataset.

use super::cell::CellValue;
use super::dataset::Dataset;
use super::delimited::quote_field;
use std::cmp::Ordering;
use std::path::Path;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Filter and sort settings for a table view.
#[derive(Debug, Clone, Default)]
pub struct RowView {
    /// (column, needle) pairs; blank needles are ignored.
    pub filters: Vec<(String, String)>,
    pub sort: Option<(String, SortDirection)>,
}

/// Handles row selection and export operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Indices of rows whose cells contain every non-blank needle
    /// (case-insensitive). Missing cells read as empty text.
    pub fn filter_rows(dataset: &Dataset, filters: &[(String, String)]) -> Vec<usize> {
        let active: Vec<(usize, String)> = filters
            .iter()
            .filter(|(_, needle)| !needle.trim().is_empty())
            .filter_map(|(column, needle)| {
                dataset
                    .column_index(column)
                    .map(|idx| (idx, needle.to_lowercase()))
            })
            .collect();

        // A filter on an unknown column matches nothing.
        let unknown = filters
            .iter()
            .any(|(c, n)| !n.trim().is_empty() && dataset.column_index(c).is_none());
        if unknown {
            return Vec::new();
        }

        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                active.iter().all(|(idx, needle)| {
                    row.get(*idx)
                        .map(|cell| cell.to_string().to_lowercase().contains(needle.as_str()))
                        .unwrap_or(false)
                })
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Stable sort of `indices` by one column. Missing cells go last in
    /// either direction.
    pub fn sort_rows(
        dataset: &Dataset,
        indices: &mut [usize],
        column: &str,
        direction: SortDirection,
    ) {
        let Some(idx) = dataset.column_index(column) else {
            return;
        };
        let rows = dataset.rows();
        // Out-of-range indices sort with the missing cells.
        let key = |i: usize| {
            rows.get(i)
                .and_then(|row| row.get(idx))
                .filter(|cell| !cell.is_missing())
        };

        indices.sort_by(|&a, &b| match (key(a), key(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(va), Some(vb)) => match direction {
                SortDirection::Ascending => va.total_cmp(vb),
                SortDirection::Descending => vb.total_cmp(va),
            },
        });
    }

    /// Apply a view: filter, then sort.
    pub fn process(dataset: &Dataset, view: &RowView) -> Vec<usize> {
        let mut indices = Self::filter_rows(dataset, &view.filters);
        if let Some((column, direction)) = &view.sort {
            Self::sort_rows(dataset, &mut indices, column, *direction);
        }
        indices
    }

    /// Delimited text for the selected rows, headers first. Fields holding a
    /// comma, quote or newline are quoted with inner quotes doubled. In a
    /// single-column table a missing cell is written as `""` so the line is
    /// not blank.
    pub fn export_delimited(dataset: &Dataset, indices: &[usize]) -> String {
        let mut lines = Vec::with_capacity(indices.len() + 1);
        lines.push(
            dataset
                .headers()
                .iter()
                .map(|h| quote_field(h))
                .collect::<Vec<_>>()
                .join(","),
        );

        for &i in indices {
            if let Some(row) = dataset.rows().get(i) {
                let line = match row.cells() {
                    [CellValue::Missing] => "\"\"".to_string(),
                    cells => cells
                        .iter()
                        .map(|cell| quote_field(&cell.to_string()))
                        .collect::<Vec<_>>()
                        .join(","),
                };
                lines.push(line);
            }
        }

        lines.join("\n")
    }

    /// Export every row in original order.
    pub fn export_all(dataset: &Dataset) -> String {
        let indices: Vec<usize> = (0..dataset.row_count()).collect();
        Self::export_delimited(dataset, &indices)
    }

    /// `report.xlsx` -> `report_export.csv`
    pub fn export_file_name(file_name: &str) -> String {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        format!("{stem}_export.csv")
    }
}
