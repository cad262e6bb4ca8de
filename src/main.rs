//! Analytics Pro - command line front-end
//!
//! Loads one file, then prints statistics, correlation, t-test and regression
//! results as text or JSON.

use analytics_pro::data::{DataLoader, DataProcessor, Dataset, RowView, SortDirection};
use analytics_pro::report::SummaryRequest;
use analytics_pro::stats::{
    BivariateAnalyzer, ColumnStats, CorrelationMatrix, CorrelationStrength, RegressionModel,
    RegressionResult, StatsCalculator, TTestResult,
};
use analytics_pro::AnalysisConfig;
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "analytics-pro", version, about = "Tabular data statistics & regression")]
struct Cli {
    /// File to analyze (.csv, .xlsx, .xls, .html; other text is read as CSV)
    #[arg(required_unless_present = "sample")]
    file: Option<PathBuf>,

    /// Use the built-in demo dataset instead of a file
    #[arg(long)]
    sample: bool,

    /// JSON file with analysis settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Descriptive statistics for every numeric column
    #[arg(long)]
    stats: bool,

    /// Pearson correlation between two columns
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    correlate: Option<Vec<String>>,

    /// Welch's t-test between two columns
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    ttest: Option<Vec<String>>,

    /// Linear regression of Y on X
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    regress: Option<Vec<String>>,

    /// Forecast steps for --regress (overrides the config file)
    #[arg(long)]
    forecast: Option<usize>,

    /// Correlation matrix over all numeric columns
    #[arg(long)]
    matrix: bool,

    /// Keep rows whose COL contains TEXT (repeatable)
    #[arg(long = "filter", value_name = "COL=TEXT")]
    filters: Vec<String>,

    /// Sort exported rows by this column
    #[arg(long, value_name = "COL")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Write the (filtered, sorted) rows as CSV to a file or directory
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print the analyst prompt for an external summary generator and exit
    #[arg(long)]
    prompt: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Correlation {
    columns: [String; 2],
    r: Option<f64>,
    strength: Option<CorrelationStrength>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    file_name: &'a str,
    synthetic: bool,
    rows: usize,
    dropped_rows: usize,
    headers: &'a [String],
    numeric_columns: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<Vec<ColumnStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation: Option<Correlation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    t_test: Option<Option<TTestResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    regression: Option<Option<RegressionResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_matrix: Option<CorrelationMatrix>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(steps) = cli.forecast {
        config.forecast_steps = steps;
    }

    let mut loader = DataLoader::new();
    let dataset = match (&cli.file, cli.sample) {
        (_, true) => loader.load_sample()?,
        (Some(path), false) => loader
            .load_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        (None, false) => bail!("no input file given"),
    };

    if cli.prompt {
        let stats = StatsCalculator::compute_all_stats(dataset);
        let request = SummaryRequest::build(dataset, &stats, config.preview_rows);
        println!("{}", request.prompt()?);
        return Ok(());
    }

    let output = analyze(dataset, &cli, &config)?;

    if let Some(target) = &cli.export {
        export(dataset, &cli, target)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output);
    }

    Ok(())
}

fn pair(values: &[String]) -> Result<(&str, &str)> {
    match values {
        [a, b] => Ok((a.as_str(), b.as_str())),
        _ => bail!("expected two column names"),
    }
}

fn require_column(dataset: &Dataset, column: &str) -> Result<()> {
    if dataset.column_index(column).is_none() {
        bail!(
            "unknown column '{column}' (available: {})",
            dataset.headers().join(", ")
        );
    }
    Ok(())
}

fn analyze<'a>(dataset: &'a Dataset, cli: &Cli, config: &AnalysisConfig) -> Result<Output<'a>> {
    let nothing_requested = !cli.stats
        && cli.correlate.is_none()
        && cli.ttest.is_none()
        && cli.regress.is_none()
        && !cli.matrix;

    let stats =
        (cli.stats || nothing_requested).then(|| StatsCalculator::compute_all_stats(dataset));

    let correlation = match &cli.correlate {
        Some(cols) => {
            let (a, b) = pair(cols)?;
            require_column(dataset, a)?;
            require_column(dataset, b)?;
            let r = BivariateAnalyzer::pearson(dataset, a, b);
            Some(Correlation {
                columns: [a.to_string(), b.to_string()],
                r,
                strength: r.map(CorrelationStrength::classify),
            })
        }
        None => None,
    };

    let t_test = match &cli.ttest {
        Some(cols) => {
            let (a, b) = pair(cols)?;
            require_column(dataset, a)?;
            require_column(dataset, b)?;
            Some(BivariateAnalyzer::welch_t_test_with_level(
                dataset,
                a,
                b,
                config.significance_level,
            ))
        }
        None => None,
    };

    let regression = match &cli.regress {
        Some(cols) => {
            let (x, y) = pair(cols)?;
            require_column(dataset, x)?;
            require_column(dataset, y)?;
            Some(RegressionModel::linear_regression(
                dataset,
                x,
                y,
                config.forecast_steps,
            ))
        }
        None => None,
    };

    let correlation_matrix = cli
        .matrix
        .then(|| BivariateAnalyzer::correlation_matrix(dataset));

    Ok(Output {
        file_name: dataset.file_name(),
        synthetic: dataset.is_synthetic(),
        rows: dataset.row_count(),
        dropped_rows: dataset.dropped_rows(),
        headers: dataset.headers(),
        numeric_columns: dataset.numeric_columns(),
        stats,
        correlation,
        t_test,
        regression,
        correlation_matrix,
    })
}

fn export(dataset: &Dataset, cli: &Cli, target: &Path) -> Result<()> {
    let mut filters = Vec::with_capacity(cli.filters.len());
    for filter in &cli.filters {
        let (column, needle) = filter
            .split_once('=')
            .with_context(|| format!("filter '{filter}' must look like COL=TEXT"))?;
        filters.push((column.to_string(), needle.to_string()));
    }

    let direction = if cli.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let view = RowView {
        filters,
        sort: cli.sort.clone().map(|column| (column, direction)),
    };

    let indices = DataProcessor::process(dataset, &view);
    let path = if target.is_dir() {
        target.join(DataProcessor::export_file_name(dataset.file_name()))
    } else {
        target.to_path_buf()
    };

    std::fs::write(&path, DataProcessor::export_delimited(dataset, &indices))
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Exported {} rows to {}", indices.len(), path.display());
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_else(|| "N/A".to_string())
}

fn print_text(output: &Output<'_>) {
    println!("{}", output.file_name);
    if output.synthetic {
        println!("  NOTE: synthetic placeholder data, not extracted from the file");
    }
    println!(
        "  {} rows ({} dropped), {} columns, numeric: {}",
        output.rows,
        output.dropped_rows,
        output.headers.len(),
        output.numeric_columns.join(", ")
    );

    if let Some(stats) = &output.stats {
        println!();
        println!(
            "{:<20} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "column", "count", "min", "max", "mean", "median", "std dev"
        );
        for s in stats {
            println!(
                "{:<20} {:>7} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                s.column, s.count, s.min, s.max, s.mean, s.median, s.std_dev
            );
        }
    }

    if let Some(c) = &output.correlation {
        println!();
        println!("Pearson r({}, {}) = {}", c.columns[0], c.columns[1], fmt_opt(c.r));
        if let Some(strength) = &c.strength {
            println!("  {:?} {:?} relationship", strength.strength, strength.direction);
        }
    }

    if let Some(t) = &output.t_test {
        println!();
        match t {
            Some(t) => {
                println!(
                    "Welch t = {:.4} (mean1 {:.3}, n1 {}; mean2 {:.3}, n2 {})",
                    t.t_stat, t.mean1, t.n1, t.mean2, t.n2
                );
                println!(
                    "  df = {}, p = {}, significant: {}",
                    fmt_opt(t.degrees_of_freedom),
                    fmt_opt(t.p_value),
                    t.is_significant
                );
            }
            None => println!("Welch t-test: N/A (need at least two numbers per column)"),
        }
    }

    if let Some(r) = &output.regression {
        println!();
        match r {
            Some(r) => {
                println!("{}  (r² = {:.4})", r.equation, r.r2);
                for f in &r.future_values {
                    println!("  forecast x = {:.4} -> y = {:.4}", f.x, f.y);
                }
            }
            None => println!("Regression: N/A (need at least two paired numbers)"),
        }
    }

    if let Some(m) = &output.correlation_matrix {
        println!();
        print!("{:<14}", "");
        for c in &m.columns {
            print!(" {c:>10.10}");
        }
        println!();
        for (name, row) in m.columns.iter().zip(&m.values) {
            print!("{name:<14.14}");
            for v in row {
                print!(" {:>10}", fmt_opt(*v));
            }
            println!();
        }
    }
}
