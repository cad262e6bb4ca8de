//! Property tests for the delimited reader and exporter.

use analytics_pro::data::{parse_delimited, CellValue, DataProcessor};
use proptest::prelude::*;

/// Text that never satisfies the number grammar and survives trimming.
fn text_cell() -> impl Strategy<Value = CellValue> {
    "[A-Za-z][A-Za-z ,\"]{0,8}[A-Za-z]".prop_map(CellValue::Text)
}

fn number_cell() -> impl Strategy<Value = CellValue> {
    (-1.0e6..1.0e6f64).prop_map(CellValue::Number)
}

fn any_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![number_cell(), text_cell(), Just(CellValue::Missing)]
}

/// Distinct header names, some holding commas, and a grid of cells matching
/// their width. One-column tables are included.
fn table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<CellValue>>)> {
    let names = prop::collection::btree_set("[A-Za-z][A-Za-z0-9_ ,]{0,6}[A-Za-z0-9]", 1..6);
    names.prop_flat_map(|names| {
        let headers: Vec<String> = names.into_iter().collect();
        let width = headers.len();
        let rows = prop::collection::vec(prop::collection::vec(any_cell(), width), 1..12);
        (Just(headers), rows)
    })
}

fn render(headers: &[String], rows: &[Vec<CellValue>]) -> String {
    let quoted: Vec<String> = headers.iter().map(|h| format!("\"{h}\"")).collect();
    let mut text = quoted.join(",");
    for row in rows {
        text.push('\n');
        let fields: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                CellValue::Text(s) => format!("\"{}\"", s.replace('"', "\"\"")),
                CellValue::Missing if row.len() == 1 => "\"\"".to_string(),
                other => other.to_string(),
            })
            .collect();
        text.push_str(&fields.join(","));
    }
    text
}

proptest! {
    #[test]
    fn parsing_is_idempotent((headers, rows) in table()) {
        let text = render(&headers, &rows);
        let first = parse_delimited("p.csv", &text).unwrap();
        let second = parse_delimited("p.csv", &text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn export_then_reparse_keeps_shape((headers, rows) in table()) {
        let original = parse_delimited("p.csv", &render(&headers, &rows)).unwrap();
        let exported = DataProcessor::export_all(&original);
        let reparsed = parse_delimited("p.csv", &exported).unwrap();

        prop_assert_eq!(reparsed.headers(), original.headers());
        prop_assert_eq!(reparsed.numeric_columns(), original.numeric_columns());
        prop_assert_eq!(reparsed.rows(), original.rows());
    }

    #[test]
    fn every_line_is_kept_or_counted(
        width in 1usize..5,
        lines in prop::collection::vec(prop::collection::vec("[a-z0-9]{1,3}", 1..7), 0..20),
    ) {
        let headers: Vec<String> = (0..width).map(|i| format!("h{i}")).collect();
        let mut text = headers.join(",");
        for fields in &lines {
            text.push('\n');
            text.push_str(&fields.join(","));
        }

        let ds = parse_delimited("r.csv", &text).unwrap();
        prop_assert_eq!(ds.headers().len(), width);
        prop_assert!(ds.row_count() <= lines.len());
        prop_assert_eq!(ds.row_count() + ds.dropped_rows(), lines.len());
        prop_assert!(ds.rows().iter().all(|r| r.cells().len() == width));
    }

    #[test]
    fn one_text_cell_removes_the_column(
        numbers in prop::collection::vec(-1000i32..1000, 1..10),
        poison_at in any::<prop::sample::Index>(),
    ) {
        let at = poison_at.index(numbers.len());
        let mut text = String::from("value,other");
        for (i, n) in numbers.iter().enumerate() {
            if i == at {
                text.push_str(&format!("\n{n}abc,{n}"));
            } else {
                text.push_str(&format!("\n{n},{n}"));
            }
        }

        let ds = parse_delimited("n.csv", &text).unwrap();
        prop_assert!(!ds.is_numeric("value"));
        prop_assert!(ds.is_numeric("other"));
    }
}
