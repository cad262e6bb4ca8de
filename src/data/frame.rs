//! DataFrame Bridge
//! Converts a [`Dataset`] into a Polars `DataFrame` for Polars-based consumers.

use super::cell::CellValue;
use super::dataset::Dataset;
use polars::prelude::*;

impl Dataset {
    /// Numeric columns become nullable `Float64`, all others nullable `String`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .headers()
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let cells = self.rows().iter().map(|row| row.get(idx));
                if self.is_numeric(header) {
                    let values: Vec<Option<f64>> =
                        cells.map(|c| c.and_then(CellValue::as_number)).collect();
                    Column::new(header.as_str().into(), values)
                } else {
                    let values: Vec<Option<String>> = cells
                        .map(|c| match c {
                            Some(CellValue::Missing) | None => None,
                            Some(cell) => Some(cell.to_string()),
                        })
                        .collect();
                    Column::new(header.as_str().into(), values)
                }
            })
            .collect();

        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use crate::data::delimited::parse_delimited;
    use polars::prelude::*;

    #[test]
    fn numeric_columns_become_float64() {
        let ds = parse_delimited("t.csv", "x,label\n1,a\n,b\n3.5,7\n").unwrap();
        let df = ds.to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 2);

        let x = df.column("x").unwrap().as_materialized_series();
        assert_eq!(x.dtype(), &DataType::Float64);
        assert_eq!(x.null_count(), 1);
        assert_eq!(x.f64().unwrap().get(2), Some(3.5));

        let label = df.column("label").unwrap().as_materialized_series();
        assert_eq!(label.dtype(), &DataType::String);
        assert_eq!(label.str().unwrap().get(2), Some("7"));
    }
}
