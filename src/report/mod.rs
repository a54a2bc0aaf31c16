//! Report module - rendering answers into the final report

mod builder;
mod options;

pub use builder::{ReportBuilder, ReportError, NOT_AVAILABLE};
pub use options::{EmptyPolicy, MotorTheftMode, OutputFormat, ReportOptions};
