//! HTML Table Reader
//! Reads the first `<table>` of an HTML document as a grid.

use super::dataset::{Dataset, DatasetBuilder, DatasetOrigin};
use super::loader::ParseError;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Html(e.to_string()))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse the first table of `text`.
///
/// Headers come from every `<th>` in the table; without any, the first row's
/// `<td>` cells are used (blank ones named `Col {i}`). All rows after the
/// first are data rows, and only their `<td>` cells count.
pub fn parse_html_table(file_name: &str, text: &str) -> Result<Dataset, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let document = Html::parse_document(text);
    let table_sel = selector("table")?;
    let th_sel = selector("th")?;
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let table = document.select(&table_sel).next().ok_or(ParseError::NoTable)?;
    let rows: Vec<ElementRef<'_>> = table.select(&tr_sel).collect();

    let mut headers: Vec<String> = table.select(&th_sel).map(cell_text).collect();
    if headers.is_empty() {
        if let Some(first) = rows.first() {
            headers = first
                .select(&td_sel)
                .enumerate()
                .map(|(i, td)| {
                    let text = cell_text(td);
                    if text.is_empty() {
                        format!("Col {i}")
                    } else {
                        text
                    }
                })
                .collect();
        }
    }

    let mut builder = DatasetBuilder::new(file_name, headers)?;
    for tr in rows.iter().skip(1) {
        let fields: Vec<String> = tr.select(&td_sel).map(cell_text).collect();
        builder.push_fields(&fields);
    }

    Ok(builder.finish(DatasetOrigin::Extracted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;

    const TABLE: &str = r#"
        <html><body>
          <p>Quarterly numbers</p>
          <table>
            <tr><th>Quarter</th><th>Revenue</th></tr>
            <tr><td>Q1</td><td> 1200 </td></tr>
            <tr><td>Q2</td><td>1350.5</td></tr>
            <tr><td>Q3</td></tr>
          </table>
        </body></html>"#;

    #[test]
    fn reads_th_headers_and_td_rows() {
        let ds = parse_html_table("report.html", TABLE).unwrap();
        assert_eq!(ds.headers(), &["Quarter", "Revenue"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.dropped_rows(), 1);
        assert_eq!(ds.numeric_columns(), &["Revenue".to_string()]);
        assert_eq!(ds.cell(1, "Revenue"), Some(&CellValue::Number(1350.5)));
    }

    #[test]
    fn falls_back_to_first_row_cells_for_headers() {
        let html = "<table><tr><td>x</td><td></td></tr><tr><td>1</td><td>2</td></tr></table>";
        let ds = parse_html_table("t.html", html).unwrap();
        assert_eq!(ds.headers(), &["x", "Col 1"]);
        assert_eq!(ds.row_count(), 1);
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = parse_html_table("t.html", "<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, ParseError::NoTable));
    }

    #[test]
    fn empty_table_has_no_headers() {
        let err = parse_html_table("t.html", "<table></table>").unwrap_err();
        assert!(matches!(err, ParseError::NoHeaders));
    }
}
