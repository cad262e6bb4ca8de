//! Delimited Text Reader
//! Line-oriented, comma separated input with quote-aware field splitting.

use super::dataset::{Dataset, DatasetBuilder, DatasetOrigin};
use super::loader::ParseError;
use log::debug;

/// Parse comma separated text into a [`Dataset`].
///
/// Blank lines are skipped. The first remaining line holds the headers; data
/// lines whose field count differs from the header count are dropped.
pub fn parse_delimited(file_name: &str, text: &str) -> Result<Dataset, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(ParseError::Empty)?;
    let mut builder = DatasetBuilder::new(file_name, split_header(header_line))?;

    for line in lines {
        builder.push_fields(&tokenize_line(line));
    }

    let dataset = builder.finish(DatasetOrigin::Extracted);
    debug!(
        "{file_name}: {} rows kept, {} dropped",
        dataset.row_count(),
        dataset.dropped_rows()
    );
    Ok(dataset)
}

/// Header names, split with the same quote rules as data lines so a quoted
/// `"Revenue, USD"` stays one header.
pub fn split_header(line: &str) -> Vec<String> {
    tokenize_line(line)
}

/// Split one data line into fields.
///
/// A field is either a double-quoted run, in which commas are literal and
/// `""` stands for one quote, or an unquoted run up to the next comma.
/// Whitespace around a field is dropped. Every comma opens a new field, so
/// `1,,3` yields three fields.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(c) = chars.next() {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        break;
                    }
                } else {
                    field.push(c);
                }
            }
            // Anything between the closing quote and the next comma is kept as-is.
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                field.push(c);
                chars.next();
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                field.push(c);
                chars.next();
            }
        }

        let trimmed = field.trim_end().len();
        field.truncate(trimmed);
        fields.push(field);

        if chars.next().is_none() {
            break;
        }
    }

    fields
}

/// Quote a field for export when it contains a comma, quote or newline.
pub fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;

    #[test]
    fn tokenizes_quoted_and_plain_fields() {
        assert_eq!(tokenize_line("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(
            tokenize_line(r#""Smith, John",42,"x""y""#),
            vec!["Smith, John", "42", "x\"y"]
        );
        assert_eq!(tokenize_line("1,,3"), vec!["1", "", "3"]);
        assert_eq!(tokenize_line("1,2,"), vec!["1", "2", ""]);
        assert_eq!(tokenize_line("New York,NY"), vec!["New York", "NY"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(tokenize_line(r#"1,"open, field"#), vec!["1", "open, field"]);
    }

    #[test]
    fn headers_are_trimmed_and_unquoted() {
        assert_eq!(split_header(r#" "id" , name,"score""#), vec!["id", "name", "score"]);
    }

    #[test]
    fn quoted_header_keeps_its_comma() {
        let ds = parse_delimited("h.csv", "\"Revenue, USD\",q\n10,a\n").unwrap();
        assert_eq!(ds.headers(), &["Revenue, USD", "q"]);
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.numeric_columns(), &["Revenue, USD".to_string()]);
    }

    #[test]
    fn parses_basic_file() {
        let text = "Date,Sales,Region\r\n1,100,North\r\n\r\n2,150,South\n";
        let ds = parse_delimited("demo.csv", text).unwrap();
        assert_eq!(ds.headers(), &["Date", "Sales", "Region"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.numeric_columns(), &["Date".to_string(), "Sales".to_string()]);
        assert_eq!(ds.cell(1, "Region"), Some(&CellValue::Text("South".into())));
    }

    #[test]
    fn ragged_rows_are_dropped_and_counted() {
        let text = "a,b\n1,2\n3\n4,5,6\n7,8\n";
        let ds = parse_delimited("r.csv", text).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.dropped_rows(), 2);
    }

    #[test]
    fn partial_numbers_are_text() {
        let ds = parse_delimited("p.csv", "v\n12\n12abc\n").unwrap();
        assert!(ds.numeric_columns().is_empty());
        assert_eq!(ds.cell(1, "v"), Some(&CellValue::Text("12abc".into())));
    }

    #[test]
    fn quoted_numbers_are_numbers() {
        let ds = parse_delimited("q.csv", "v\n\"1,5\"\n\"2\"\n").unwrap();
        assert_eq!(ds.cell(1, "v"), Some(&CellValue::Number(2.0)));
        assert_eq!(ds.cell(0, "v"), Some(&CellValue::Text("1,5".into())));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse_delimited("e.csv", ""), Err(ParseError::Empty)));
        assert!(matches!(parse_delimited("e.csv", "\n \r\n"), Err(ParseError::Empty)));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let ds = parse_delimited("h.csv", "a,b\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.numeric_columns().len(), 2);
    }

    #[test]
    fn quote_field_escapes_when_needed() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("two\nlines"), "\"two\nlines\"");
    }
}
