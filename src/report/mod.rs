//! Report module - saved reports and the summary collaborator seam

mod store;
mod summary;

pub use store::{
    InMemoryReportStore, JsonFileReportStore, NewReport, ReportError, ReportId, ReportStore,
    SavedReport,
};
pub use summary::{ColumnDigest, SummaryGenerator, SummaryRequest, DEFAULT_SAMPLE_ROWS};
