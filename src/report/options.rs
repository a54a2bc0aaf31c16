//! Report options: how undefined aggregates and the motor-vehicle-theft
//! question are handled, and which output format is rendered.

use clap::ValueEnum;
use serde::Serialize;

/// What to do when an aggregate has no records to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmptyPolicy {
    /// Abort the whole report with an error.
    #[default]
    Fail,
    /// Render the undefined value as `N/A`.
    #[value(name = "na")]
    NotAvailable,
}

/// How the "year of highest number of motor vehicle thefts" is chosen.
///
/// `FirstRecord` reproduces the historical report, which printed the year of
/// the first record without looking at motor vehicle thefts at all. `Peak`
/// picks the record with the most motor vehicle thefts (earliest on ties).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotorTheftMode {
    #[default]
    FirstRecord,
    Peak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    pub empty_policy: EmptyPolicy,
    pub motor_theft: MotorTheftMode,
    pub format: OutputFormat,
}

impl ReportOptions {
    pub fn with_empty_policy(mut self, empty_policy: EmptyPolicy) -> Self {
        self.empty_policy = empty_policy;
        self
    }

    pub fn with_motor_theft(mut self, motor_theft: MotorTheftMode) -> Self {
        self.motor_theft = motor_theft;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
