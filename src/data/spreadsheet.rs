//! Spreadsheet Reader
//! Reads the first worksheet of an `.xlsx` / `.xls` workbook as a grid.

use super::cell::CellValue;
use super::dataset::{Dataset, DatasetBuilder, DatasetOrigin};
use super::loader::ParseError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// Parse workbook bytes. Only the first sheet is read; formulas, styles and
/// other sheets are ignored.
pub fn parse_spreadsheet(file_name: &str, bytes: &[u8]) -> Result<Dataset, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Spreadsheet(e.to_string()))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ParseError::Empty)?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| ParseError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(ParseError::Empty)?;
    let headers = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut builder = DatasetBuilder::new(file_name, headers)?;
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
        if cells.iter().all(CellValue::is_missing) {
            continue;
        }
        builder.push_cells(cells);
    }

    Ok(builder.finish(DatasetOrigin::Extracted))
}

/// Typed numbers stay numbers; strings go through the text classifier.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::from_number(*f),
        Data::String(s) => CellValue::parse(s),
        Data::Empty => CellValue::Missing,
        Data::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::parse(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_cells_map_to_values() {
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_value(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(cell_value(&Data::String(" 7 ".into())), CellValue::Number(7.0));
        assert_eq!(cell_value(&Data::String("abc".into())), CellValue::Text("abc".into()));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Text("true".into()));
        assert_eq!(cell_value(&Data::Empty), CellValue::Missing);
    }

    fn workbook() -> Vec<u8> {
        let mut book = rust_xlsxwriter::Workbook::new();

        let sheet = book.add_worksheet();
        sheet.write_string(0, 0, "Region").unwrap();
        sheet.write_string(0, 1, "Sales").unwrap();
        sheet.write_string(0, 2, "Units").unwrap();
        sheet.write_string(1, 0, "North").unwrap();
        sheet.write_number(1, 1, 120.0).unwrap();
        sheet.write_number(1, 2, 3.0).unwrap();
        // row 2 left empty
        sheet.write_string(3, 0, "South").unwrap();
        sheet.write_number(3, 1, 95.5).unwrap();
        sheet.write_string(3, 2, "n/a").unwrap();
        sheet.write_string(4, 0, "East").unwrap();
        sheet.write_string(4, 1, " 40 ").unwrap();
        sheet.write_number(4, 2, 7.0).unwrap();

        let other = book.add_worksheet();
        other.set_name("Archive").unwrap();
        other.write_string(0, 0, "Ignored").unwrap();
        other.write_number(1, 0, 1.0).unwrap();

        book.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_first_sheet_of_a_workbook() {
        let ds = parse_spreadsheet("sales.xlsx", &workbook()).unwrap();
        assert_eq!(ds.file_name(), "sales.xlsx");
        assert_eq!(ds.headers(), &["Region", "Sales", "Units"]);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.dropped_rows(), 0);
        assert_eq!(ds.numeric_columns(), &["Sales".to_string()]);
        assert_eq!(ds.numbers("Sales"), vec![120.0, 95.5, 40.0]);
        assert_eq!(ds.cell(1, "Units"), Some(&CellValue::Text("n/a".into())));
    }

    #[test]
    fn workbook_bytes_are_detected_without_extension() {
        let bytes = workbook();
        assert_eq!(
            crate::data::FileFormat::detect("upload.bin", &bytes),
            crate::data::FileFormat::Spreadsheet
        );
        let ds = crate::data::parse_bytes("upload.bin", &bytes).unwrap();
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    fn garbage_bytes_are_a_spreadsheet_error() {
        let err = parse_spreadsheet("broken.xlsx", b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, ParseError::Spreadsheet(_)));
    }

    #[test]
    fn empty_bytes_are_empty() {
        assert!(matches!(parse_spreadsheet("e.xlsx", b""), Err(ParseError::Empty)));
    }
}
