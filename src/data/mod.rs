//! Data module - file parsing, the dataset model and row processing

mod cell;
mod dataset;
mod delimited;
mod frame;
mod html;
mod loader;
mod placeholder;
mod processor;
mod spreadsheet;

pub use cell::{parse_number, CellValue};
pub use dataset::{Dataset, DatasetBuilder, DatasetOrigin, Row};
pub use delimited::{parse_delimited, tokenize_line};
pub use html::parse_html_table;
pub use loader::{
    parse_bytes, parse_reader, DataLoader, FileFormat, ParseError, SAMPLE_CSV, SAMPLE_FILE_NAME,
};
pub use placeholder::{synthetic_dataset, DocumentKind};
pub use processor::{DataProcessor, RowView, SortDirection};
pub use spreadsheet::parse_spreadsheet;
