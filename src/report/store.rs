//! Report Store Module
//! Saved analysis reports and the stores that keep them.

use crate::stats::ColumnStats;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

pub type ReportId = Uuid;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Report store is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A report before the store assigns its id and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub file_name: String,
    pub summary: String,
    pub stats: Vec<ColumnStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub id: ReportId,
    pub file_name: String,
    pub date: DateTime<Utc>,
    pub summary: String,
    pub stats: Vec<ColumnStats>,
}

impl SavedReport {
    fn stamp(report: NewReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: report.file_name,
            date: Utc::now(),
            summary: report.summary,
            stats: report.stats,
        }
    }
}

/// Persistence seam for saved reports. Newest reports are listed first.
pub trait ReportStore {
    fn save(&mut self, report: NewReport) -> Result<SavedReport, ReportError>;
    fn list(&self) -> Result<Vec<SavedReport>, ReportError>;
    /// Deleting an unknown id is not an error.
    fn delete(&mut self, id: ReportId) -> Result<(), ReportError>;
}

#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: Vec<SavedReport>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn save(&mut self, report: NewReport) -> Result<SavedReport, ReportError> {
        let saved = SavedReport::stamp(report);
        self.reports.insert(0, saved.clone());
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedReport>, ReportError> {
        Ok(self.reports.clone())
    }

    fn delete(&mut self, id: ReportId) -> Result<(), ReportError> {
        self.reports.retain(|r| r.id != id);
        Ok(())
    }
}

/// Keeps every report in one JSON array file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileReportStore {
    path: PathBuf,
}

impl JsonFileReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, reports: &[SavedReport]) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(reports)?)?;
        debug!("Wrote {} reports to {}", reports.len(), self.path.display());
        Ok(())
    }
}

impl ReportStore for JsonFileReportStore {
    fn save(&mut self, report: NewReport) -> Result<SavedReport, ReportError> {
        let saved = SavedReport::stamp(report);
        let mut reports = self.list()?;
        reports.insert(0, saved.clone());
        self.write_all(&reports)?;
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedReport>, ReportError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn delete(&mut self, id: ReportId) -> Result<(), ReportError> {
        let mut reports = self.list()?;
        let before = reports.len();
        reports.retain(|r| r.id != id);
        if reports.len() != before {
            self.write_all(&reports)?;
        }
        Ok(())
    }
}
