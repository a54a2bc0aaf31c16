//! Crime Analyzer - command line entry point
//!
//! Usage: `crime_analyzer <crime_csv_file_path> <report_file_path>`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crime_analyzer::files;
use crime_analyzer::{
    analyze, EmptyPolicy, LoaderError, MotorTheftMode, OutputFormat, ReportError, ReportOptions,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Exit code for unreadable input or an unwritable report path.
const EXIT_IO: u8 = 1;
/// Exit code for malformed rows or undefined aggregates.
const EXIT_DATA: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "crime_analyzer")]
#[command(author, version, about = "Annual crime statistics report generator", long_about = None)]
struct Args {
    /// Crime statistics CSV file (header line + 11 integer columns per row)
    crime_csv: PathBuf,

    /// Report file to write
    report: PathBuf,

    /// What to do when a statistic has no data: fail, or print N/A
    #[arg(long, value_enum, default_value_t = EmptyPolicy::Fail)]
    on_empty: EmptyPolicy,

    /// How to pick the year of highest motor vehicle thefts
    #[arg(long, value_enum, default_value_t = MotorTheftMode::FirstRecord)]
    motor_theft: MotorTheftMode,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn report_options(&self) -> ReportOptions {
        ReportOptions::default()
            .with_empty_policy(self.on_empty)
            .with_motor_theft(self.motor_theft)
            .with_format(self.format)
    }
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => {
            println!("{} was successfully saved.", args.report.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    files::check_readable(&args.crime_csv)?;
    files::check_writable(&args.report)?;

    let csv_text = files::read_input(&args.crime_csv)?;
    let report = analyze(&csv_text, args.report_options())
        .with_context(|| format!("analyzing {}", args.crime_csv.display()))?;

    files::write_report(&args.report, &report)?;
    info!(report = %args.report.display(), "report saved");
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let data_error = err
        .chain()
        .any(|cause| cause.is::<LoaderError>() || cause.is::<ReportError>());
    if data_error {
        EXIT_DATA
    } else {
        EXIT_IO
    }
}
