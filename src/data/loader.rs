//! Data Loader Module
//! Picks a reader by file extension (or content sniffing) and turns raw file
//! content into a [`Dataset`].

use super::dataset::Dataset;
use super::delimited::parse_delimited;
use super::html::parse_html_table;
use super::placeholder::{synthetic_dataset, DocumentKind};
use super::spreadsheet::parse_spreadsheet;
use log::{debug, info};
use std::borrow::Cow;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in demo table.
pub const SAMPLE_FILE_NAME: &str = "demo_data.csv";
pub const SAMPLE_CSV: &str = "Date,Sales,Profit,Cost,Region\n\
1,100,20,80,North\n\
2,150,40,110,South\n\
3,200,80,120,East\n\
4,120,30,90,West\n\
5,300,100,200,North";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("File is empty")]
    Empty,
    #[error("No header row found")]
    NoHeaders,
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse spreadsheet: {0}")]
    Spreadsheet(String),
    #[error("No table found in HTML")]
    NoTable,
    #[error("Failed to read HTML table: {0}")]
    Html(String),
}

/// Reader selected for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Delimited,
    Spreadsheet,
    Html,
    /// Document formats answered with a synthetic placeholder.
    Document(DocumentKind),
}

const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

impl FileFormat {
    /// Format for a file extension, if it is one we know.
    pub fn from_extension(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Some(FileFormat::Delimited),
            "xlsx" | "xls" => Some(FileFormat::Spreadsheet),
            "html" | "htm" => Some(FileFormat::Html),
            "pdf" => Some(FileFormat::Document(DocumentKind::Pdf)),
            "docx" => Some(FileFormat::Document(DocumentKind::Docx)),
            "pptx" => Some(FileFormat::Document(DocumentKind::Pptx)),
            _ => None,
        }
    }

    /// Guess the format from leading bytes. Office files are ZIP containers
    /// and are told apart by their entry names.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            return Some(FileFormat::Document(DocumentKind::Pdf));
        }
        if bytes.starts_with(OLE2_MAGIC) {
            return Some(FileFormat::Spreadsheet);
        }
        if bytes.starts_with(ZIP_MAGIC) {
            return sniff_office_container(bytes);
        }

        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(4096)]).to_lowercase();
        if head.trim_start().starts_with('<') && head.contains("<table") {
            return Some(FileFormat::Html);
        }
        None
    }

    /// Extension first, then sniffing, then delimited text.
    pub fn detect(file_name: &str, bytes: &[u8]) -> Self {
        Self::from_extension(file_name)
            .or_else(|| Self::sniff(bytes))
            .unwrap_or(FileFormat::Delimited)
    }
}

fn sniff_office_container(bytes: &[u8]) -> Option<FileFormat> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).ok()?;
    let mut names = archive.file_names();
    names.find_map(|name| {
        if name.starts_with("xl/") {
            Some(FileFormat::Spreadsheet)
        } else if name.starts_with("word/") {
            Some(FileFormat::Document(DocumentKind::Docx))
        } else if name.starts_with("ppt/") {
            Some(FileFormat::Document(DocumentKind::Pptx))
        } else {
            None
        }
    })
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Parse in-memory file content. `file_name` selects the reader and is kept
/// on the resulting dataset.
pub fn parse_bytes(file_name: &str, bytes: &[u8]) -> Result<Dataset, ParseError> {
    let format = FileFormat::detect(file_name, bytes);
    debug!("{file_name}: reading as {format:?}");

    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let dataset = match format {
        FileFormat::Delimited => parse_delimited(file_name, &decode_text(bytes))?,
        FileFormat::Spreadsheet => parse_spreadsheet(file_name, bytes)?,
        FileFormat::Html => parse_html_table(file_name, &decode_text(bytes))?,
        FileFormat::Document(kind) => synthetic_dataset(file_name, kind)?,
    };

    info!(
        "Loaded {}: {} rows, {} columns ({} numeric)",
        dataset.file_name(),
        dataset.row_count(),
        dataset.headers().len(),
        dataset.numeric_columns().len()
    );
    Ok(dataset)
}

/// Parse from any reader with a single blocking read.
pub fn parse_reader<R: Read>(file_name: &str, mut reader: R) -> Result<Dataset, ParseError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_bytes(file_name, &bytes)
}

/// Handles dataset loading and keeps the current dataset.
pub struct DataLoader {
    dataset: Option<Dataset>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            dataset: None,
            file_path: None,
        }
    }

    /// Load a file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<&Dataset, ParseError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let dataset = parse_bytes(&file_name, &bytes)?;
        self.file_path = Some(path.to_path_buf());
        Ok(self.dataset.insert(dataset))
    }

    /// Load the built-in demo table.
    pub fn load_sample(&mut self) -> Result<&Dataset, ParseError> {
        let dataset = parse_delimited(SAMPLE_FILE_NAME, SAMPLE_CSV)?;
        self.file_path = None;
        Ok(self.dataset.insert(dataset))
    }

    /// Get list of column names from the loaded dataset.
    pub fn get_columns(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|ds| ds.headers().to_vec())
            .unwrap_or_default()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|ds| ds.numeric_columns().to_vec())
            .unwrap_or_default()
    }

    /// Get the number of rows in the dataset.
    pub fn get_row_count(&self) -> usize {
        self.dataset.as_ref().map(|ds| ds.row_count()).unwrap_or(0)
    }

    pub fn get_dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set dataset directly (used when parsing happened on another thread).
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
    }
}
