//! Report Builder Module
//! Renders the calculator's answers into the final report text.
//!
//! Every answer is rendered to its own section string and the sections are
//! concatenated once, in question order. Floating point values use Rust's
//! `Display` for `f64`: the shortest digits that round-trip, no exponent, and
//! no fractional part for integral values (`15`, `0.25`, `20696.25`).

use std::fmt::Display;

use thiserror::Error;
use tracing::{info, warn};

use super::options::{EmptyPolicy, OutputFormat, ReportOptions};
use crate::data::CrimeRecord;
use crate::stats::{Answer, Question, StatsCalculator, YearRange};

/// Rendered in place of an undefined value under [`EmptyPolicy::NotAvailable`].
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("no data for {question}")]
    EmptySelection { question: &'static str },
    #[error("violent crime per capita rate for {year} is undefined: population is zero")]
    UndefinedRate { year: i64 },
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Builds the report for one dataset.
pub struct ReportBuilder {
    options: ReportOptions,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Answer every question and render the report in the configured format.
    pub fn build(&self, dataset: &[CrimeRecord]) -> Result<String, ReportError> {
        let answers = StatsCalculator::answer_all(dataset, self.options.motor_theft);
        for answer in &answers {
            self.check(answer)?;
        }

        let report = match self.options.format {
            OutputFormat::Text => self.render_text(&answers),
            OutputFormat::Json => serde_json::to_string_pretty(&answers)? + "\n",
        };
        info!(records = dataset.len(), bytes = report.len(), "report built");
        Ok(report)
    }

    /// Reject undefined values unless the policy allows a sentinel.
    fn check(&self, answer: &Answer) -> Result<(), ReportError> {
        if self.options.empty_policy == EmptyPolicy::NotAvailable {
            return Ok(());
        }

        let empty = || ReportError::EmptySelection {
            question: answer.question().name(),
        };
        match answer {
            Answer::Period { first_year: None, .. }
            | Answer::AverageMurders { average: None, .. }
            | Answer::MinimumThefts { minimum: None, .. }
            | Answer::MaximumThefts { maximum: None, .. }
            | Answer::MotorVehicleTheftYear { year: None, .. } => Err(empty()),
            Answer::ViolentCrimePerCapita { rates, .. } => {
                match rates.iter().find(|r| r.rate.is_none()) {
                    Some(undefined) => Err(ReportError::UndefinedRate {
                        year: undefined.year,
                    }),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    /// Render all answers as text, in the order given.
    pub fn render_text(&self, answers: &[Answer]) -> String {
        let sections: Vec<String> = answers.iter().map(|a| self.render_answer(a)).collect();
        sections.concat()
    }

    /// Render one answer as its report section.
    pub fn render_answer(&self, answer: &Answer) -> String {
        let question = answer.question();
        match answer {
            Answer::Period {
                first_year,
                last_year,
                years,
            } => format!(
                "Period: {} - {} ({years} years)\n\n",
                self.value(question, *first_year),
                self.value(question, *last_year),
            ),
            Answer::LowMurderYears { threshold, years } => format!(
                "Years murders per year < {threshold}: {}\n",
                join(years.iter().map(|y| y.to_string()))
            ),
            Answer::HighRobberyYears { threshold, entries } => format!(
                "Robberies per year > {threshold}: {}\n",
                join(entries.iter().map(|e| format!("{} = {}", e.year, e.value)))
            ),
            Answer::ViolentCrimePerCapita { year, rates } => {
                let mut section = format!("Violent crime per capita rate ({year}): ");
                if rates.is_empty() {
                    if self.options.empty_policy == EmptyPolicy::NotAvailable {
                        section.push_str(NOT_AVAILABLE);
                    }
                    section.push('\n');
                }
                for rate in rates {
                    section.push_str(&self.value(question, rate.rate));
                    section.push('\n');
                }
                section
            }
            Answer::AverageMurders { range, average } => format!(
                "Average murders per year ({}): {}\n",
                range.map(range_label).unwrap_or_else(|| "all years".to_string()),
                self.value(question, *average)
            ),
            Answer::MinimumThefts { range, minimum } => format!(
                "Minimum thefts per year ({}): {}\n",
                range_label(*range),
                self.value(question, *minimum)
            ),
            Answer::MaximumThefts { range, maximum } => format!(
                "Maximum thefts per year ({}): {}\n",
                range_label(*range),
                self.value(question, *maximum)
            ),
            Answer::MotorVehicleTheftYear { year, .. } => format!(
                "Year of highest number of motor vehicle thefts: {}\n",
                self.value(question, *year)
            ),
        }
    }

    fn value<T: Display>(&self, question: Question, value: Option<T>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => {
                warn!(question = question.name(), "no data, rendering N/A");
                NOT_AVAILABLE.to_string()
            }
        }
    }
}

fn range_label(range: YearRange) -> String {
    format!("{}-{}", range.start, range.end)
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MotorTheftMode;

    fn record(fields: [i64; 11]) -> CrimeRecord {
        CrimeRecord::from_fields(fields)
    }

    fn two_years() -> Vec<CrimeRecord> {
        vec![
            record([1995, 100, 10, 5, 1, 2, 1, 1, 1, 1, 1]),
            record([1996, 200, 20, 25, 2, 3, 2, 2, 2, 2, 2]),
        ]
    }

    fn lenient() -> ReportBuilder {
        ReportBuilder::new(ReportOptions::default().with_empty_policy(EmptyPolicy::NotAvailable))
    }

    // ==========================================================================
    // Text sections
    // ==========================================================================

    #[test]
    fn test_two_year_report_sections() {
        let report = lenient().build(&two_years()).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Period: 1995 - 1996 (2 years)");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Years murders per year < 15000: 1995, 1996");
        assert_eq!(lines[3], "Robberies per year > 500000: ");
        assert_eq!(lines[4], "Violent crime per capita rate (2010): N/A");
        assert_eq!(lines[5], "Average murders per year (all years): 15");
        assert_eq!(lines[6], "Average murders per year (1994-1997): 15");
        assert_eq!(lines[7], "Average murders per year (2010-2013): N/A");
        assert_eq!(lines[8], "Minimum thefts per year (1999-2004): N/A");
        assert_eq!(lines[9], "Maximum thefts per year (1999-2004): N/A");
        assert_eq!(lines[10], "Year of highest number of motor vehicle thefts: 1995");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_two_year_report_fails_on_empty_range_by_default() {
        let result = ReportBuilder::default().build(&two_years());

        match result {
            Err(ReportError::EmptySelection { question }) => {
                assert_eq!(question, "average murders (2010-2013)");
            }
            other => panic!("Expected EmptySelection, got {other:?}"),
        }
    }

    #[test]
    fn test_per_capita_single_2010_record() {
        let dataset = vec![record([2010, 1000, 250, 0, 0, 0, 0, 0, 0, 0, 0])];
        let report = lenient().build(&dataset).unwrap();

        assert!(report.contains("Violent crime per capita rate (2010): 0.25\n"));
        assert!(report.contains("Average murders per year (2010-2013): 0\n"));
    }

    #[test]
    fn test_per_capita_one_line_per_2010_record() {
        let dataset = vec![
            record([2010, 1000, 250, 0, 0, 0, 0, 0, 0, 0, 0]),
            record([2010, 1000, 500, 0, 0, 0, 0, 0, 0, 0, 0]),
        ];
        let report = lenient().build(&dataset).unwrap();

        assert!(report.contains("Violent crime per capita rate (2010): 0.25\n0.5\n"));
    }

    #[test]
    fn test_per_capita_missing_year_under_fail_policy() {
        let builder = ReportBuilder::default();
        let answer = StatsCalculator::answer(
            Question::ViolentCrimePerCapita,
            &two_years(),
            MotorTheftMode::FirstRecord,
        );

        assert!(builder.check(&answer).is_ok());
        assert_eq!(
            builder.render_answer(&answer),
            "Violent crime per capita rate (2010): \n"
        );
    }

    #[test]
    fn test_per_capita_zero_population() {
        let dataset = vec![record([2010, 0, 250, 0, 0, 0, 0, 0, 0, 0, 0])];

        assert!(matches!(
            ReportBuilder::default().build(&dataset),
            Err(ReportError::UndefinedRate { year: 2010 })
        ));
        let report = lenient().build(&dataset).unwrap();
        assert!(report.contains("Violent crime per capita rate (2010): N/A\n"));
    }

    #[test]
    fn test_high_robbery_pairs() {
        let dataset = vec![
            record([1994, 1, 1, 20_000, 0, 618_949, 0, 0, 0, 0, 0]),
            record([1995, 1, 1, 20_000, 0, 500_000, 0, 0, 0, 0, 0]),
            record([1996, 1, 1, 20_000, 0, 535_594, 0, 0, 0, 0, 0]),
        ];
        let report = lenient().build(&dataset).unwrap();

        assert!(report.contains("Years murders per year < 15000: \n"));
        assert!(report.contains("Robberies per year > 500000: 1994 = 618949, 1996 = 535594\n"));
    }

    #[test]
    fn test_fractional_average() {
        let dataset = vec![
            record([1994, 1, 1, 23_326, 0, 0, 0, 0, 0, 0, 0]),
            record([1995, 1, 1, 21_606, 0, 0, 0, 0, 0, 0, 0]),
            record([1996, 1, 1, 19_645, 0, 0, 0, 0, 0, 0, 0]),
            record([1997, 1, 1, 18_208, 0, 0, 0, 0, 0, 0, 0]),
        ];
        let report = lenient().build(&dataset).unwrap();

        assert!(report.contains("Average murders per year (1994-1997): 20696.25\n"));
    }

    #[test]
    fn test_average_of_huge_counts() {
        let dataset = vec![
            record([1995, 1, 1, 5_000_000_000_000_000_000, 0, 0, 0, 0, 0, 0, 0]),
            record([1996, 1, 1, 5_000_000_000_000_000_000, 0, 0, 0, 0, 0, 0, 0]),
        ];
        let report = lenient().build(&dataset).unwrap();

        assert!(report.contains("Average murders per year (all years): 5000000000000000000\n"));
    }

    // ==========================================================================
    // Empty dataset
    // ==========================================================================

    #[test]
    fn test_empty_dataset_fails_by_default() {
        assert!(matches!(
            ReportBuilder::default().build(&[]),
            Err(ReportError::EmptySelection { question: "period" })
        ));
    }

    #[test]
    fn test_empty_dataset_with_sentinel() {
        let report = lenient().build(&[]).unwrap();

        assert!(report.starts_with("Period: N/A - N/A (0 years)\n\n"));
        assert!(report.contains("Average murders per year (all years): N/A\n"));
        assert!(report.ends_with("Year of highest number of motor vehicle thefts: N/A\n"));
    }

    // ==========================================================================
    // Options
    // ==========================================================================

    #[test]
    fn test_peak_motor_theft_mode() {
        let dataset = vec![
            record([2010, 1, 1, 1, 0, 0, 0, 0, 0, 0, 100]),
            record([2011, 1, 1, 1, 0, 0, 0, 0, 0, 0, 300]),
        ];
        let builder = ReportBuilder::new(
            ReportOptions::default()
                .with_empty_policy(EmptyPolicy::NotAvailable)
                .with_motor_theft(MotorTheftMode::Peak),
        );

        let report = builder.build(&dataset).unwrap();
        assert!(report.ends_with("Year of highest number of motor vehicle thefts: 2011\n"));

        let literal = lenient().build(&dataset).unwrap();
        assert!(literal.ends_with("Year of highest number of motor vehicle thefts: 2010\n"));
    }

    #[test]
    fn test_json_format() {
        let builder = ReportBuilder::new(
            ReportOptions::default()
                .with_empty_policy(EmptyPolicy::NotAvailable)
                .with_format(OutputFormat::Json),
        );
        let report = builder.build(&two_years()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        let answers = value.as_array().unwrap();
        assert_eq!(answers.len(), Question::ALL.len());
        assert_eq!(answers[0]["question"], "period");
        assert_eq!(answers[0]["first_year"], 1995);
        assert_eq!(answers[0]["years"], 2);
        assert_eq!(answers[4]["average"], 15.0);
        assert!(answers[6]["average"].is_null());
        assert_eq!(answers[9]["mode"], "first-record");
    }

    #[test]
    fn test_deterministic_output() {
        let dataset = two_years();
        let first = lenient().build(&dataset).unwrap();
        let second = lenient().build(&dataset).unwrap();
        assert_eq!(first, second);
    }
}
