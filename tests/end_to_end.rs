//! Load files from disk and run the full analysis chain over them.

use analytics_pro::data::{DataLoader, DataProcessor, ParseError, RowView, SortDirection};
use analytics_pro::report::{JsonFileReportStore, NewReport, ReportStore, SummaryRequest};
use analytics_pro::stats::{BivariateAnalyzer, RegressionModel, StatsCalculator};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_a_file_and_computes_every_statistic() {
    let file = csv_file("x,y,down,label\n1,2,5,a\n2,4,4,b\n3,6,3,c\n4,8,2,d\n5,10,1,e\n");
    let mut loader = DataLoader::new();
    let ds = loader.load_file(file.path()).unwrap();

    assert_eq!(ds.headers(), ["x", "y", "down", "label"]);
    assert_eq!(ds.numeric_columns(), ["x", "y", "down"]);

    let x = StatsCalculator::compute_column_stats(ds, "x").unwrap();
    assert_eq!((x.min, x.max, x.mean, x.median), (1.0, 5.0, 3.0, 3.0));
    assert!((x.std_dev - 2f64.sqrt()).abs() < 1e-12);

    assert!((BivariateAnalyzer::pearson(ds, "x", "y").unwrap() - 1.0).abs() < 1e-12);
    assert!((BivariateAnalyzer::pearson(ds, "x", "down").unwrap() + 1.0).abs() < 1e-12);

    let t = BivariateAnalyzer::welch_t_test(ds, "x", "down").unwrap();
    assert!(t.t_stat.abs() < 1e-12);
    assert!(!t.is_significant);

    let fit = RegressionModel::linear_regression(ds, "x", "y", 1).unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-12);
    assert!(fit.intercept.abs() < 1e-12);
    assert!((fit.r2 - 1.0).abs() < 1e-12);
    assert_eq!(fit.future_values.len(), 1);
    assert!((fit.future_values[0].x - 6.0).abs() < 1e-12);
    assert!((fit.future_values[0].y - 12.0).abs() < 1e-12);

    assert_eq!(loader.get_row_count(), 5);
    assert_eq!(loader.get_file_path().map(|p| p.as_path()), Some(file.path()));
}

#[test]
fn forecast_continues_past_the_last_x() {
    let file = csv_file("x,y\n1,2\n2,4\n3,6\n4,8\n");
    let mut loader = DataLoader::new();
    let ds = loader.load_file(file.path()).unwrap();

    let fit = RegressionModel::linear_regression(ds, "x", "y", 1).unwrap();
    assert!((fit.future_values[0].x - 5.0).abs() < 1e-12);
    assert!((fit.future_values[0].y - 10.0).abs() < 1e-12);
}

#[test]
fn empty_and_missing_files_fail() {
    let file = csv_file("  \n\n");
    let mut loader = DataLoader::new();
    assert!(matches!(loader.load_file(file.path()), Err(ParseError::Empty)));

    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(matches!(loader.load_file(&missing), Err(ParseError::Io(_))));
    assert!(loader.get_dataset().is_none());
}

#[test]
fn document_files_load_as_synthetic_data() {
    let mut file = tempfile::Builder::new()
        .prefix("budget_")
        .suffix(".pdf")
        .tempfile()
        .unwrap();
    file.write_all(b"%PDF-1.7\n").unwrap();

    let mut loader = DataLoader::new();
    let ds = loader.load_file(file.path()).unwrap();
    assert!(ds.is_synthetic());
    assert!(ds.headers().iter().any(|h| h == "Revenue"));
}

#[test]
fn filtered_export_written_to_disk_reloads() {
    let mut loader = DataLoader::new();
    let ds = loader.load_sample().unwrap().clone();

    let view = RowView {
        filters: vec![("Region".to_string(), "north".to_string())],
        sort: Some(("Sales".to_string(), SortDirection::Descending)),
    };
    let indices = DataProcessor::process(&ds, &view);
    assert!(!indices.is_empty());

    let dir = tempdir().unwrap();
    let out = dir.path().join(DataProcessor::export_file_name(ds.file_name()));
    std::fs::write(&out, DataProcessor::export_delimited(&ds, &indices)).unwrap();

    let reloaded = loader.load_file(&out).unwrap();
    assert_eq!(reloaded.file_name(), "demo_data_export.csv");
    assert_eq!(reloaded.headers(), ds.headers());
    assert_eq!(reloaded.row_count(), indices.len());
    assert!(reloaded
        .column_cells("Region")
        .iter()
        .all(|c| c.to_string().to_lowercase().contains("north")));

    let sales = reloaded.numbers("Sales");
    assert!(sales.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn reports_persist_across_store_instances() {
    let mut loader = DataLoader::new();
    let ds = loader.load_sample().unwrap();
    let stats = StatsCalculator::compute_all_stats(ds);
    let prompt = SummaryRequest::build(ds, &stats, 3).prompt().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("reports.json");

    let mut store = JsonFileReportStore::new(&path);
    assert!(store.list().unwrap().is_empty());

    let first = store
        .save(NewReport {
            file_name: ds.file_name().to_string(),
            summary: prompt,
            stats: stats.clone(),
        })
        .unwrap();
    let second = store
        .save(NewReport {
            file_name: "other.csv".to_string(),
            summary: "second".to_string(),
            stats: Vec::new(),
        })
        .unwrap();

    let mut reopened = JsonFileReportStore::new(&path);
    let listed = reopened.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
    assert_eq!(listed[1].date, first.date);

    reopened.delete(second.id).unwrap();
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    let columns: Vec<&str> = listed[0].stats.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(columns, ["Date", "Sales", "Profit", "Cost"]);
}
