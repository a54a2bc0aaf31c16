//! Crime Analyzer - annual crime statistics CSV analysis
//!
//! Loads a fixed-schema CSV of yearly crime counts and renders a text report
//! answering a fixed set of statistical questions.

pub mod data;
pub mod files;
pub mod report;
pub mod stats;

pub use data::{CrimeRecord, DataLoader, Dataset, LoaderError};
pub use report::{EmptyPolicy, MotorTheftMode, OutputFormat, ReportBuilder, ReportError, ReportOptions};
pub use stats::{Answer, Question, StatsCalculator};

/// Load CSV text and render its report in one step.
pub fn analyze(csv_text: &str, options: ReportOptions) -> anyhow::Result<String> {
    let dataset = DataLoader::new().load_str(csv_text)?;
    Ok(ReportBuilder::new(options).build(&dataset)?)
}
