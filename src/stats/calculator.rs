//! Statistics Calculator Module
//! Answers the fixed set of report questions over a loaded dataset.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::data::CrimeRecord;
use crate::report::MotorTheftMode;

/// Murder counts strictly below this mark a low-murder year.
pub const LOW_MURDER_THRESHOLD: i64 = 15_000;
/// Robbery counts strictly above this mark a high-robbery year.
pub const HIGH_ROBBERY_THRESHOLD: i64 = 500_000;
/// Year whose violent crime per capita rate is reported.
pub const PER_CAPITA_YEAR: i64 = 2010;

/// Inclusive year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: i64,
    pub end: i64,
}

impl YearRange {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, record: &CrimeRecord) -> bool {
        record.in_years(self.start, self.end)
    }
}

pub const EARLY_MURDER_RANGE: YearRange = YearRange::new(1994, 1997);
pub const LATE_MURDER_RANGE: YearRange = YearRange::new(2010, 2013);
pub const THEFT_RANGE: YearRange = YearRange::new(1999, 2004);

/// The report questions, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Period,
    LowMurderYears,
    HighRobberyYears,
    ViolentCrimePerCapita,
    AverageMurdersAllYears,
    AverageMurdersEarly,
    AverageMurdersLate,
    MinimumThefts,
    MaximumThefts,
    MotorVehicleTheftYear,
}

impl Question {
    pub const ALL: [Question; 10] = [
        Question::Period,
        Question::LowMurderYears,
        Question::HighRobberyYears,
        Question::ViolentCrimePerCapita,
        Question::AverageMurdersAllYears,
        Question::AverageMurdersEarly,
        Question::AverageMurdersLate,
        Question::MinimumThefts,
        Question::MaximumThefts,
        Question::MotorVehicleTheftYear,
    ];

    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Question::Period => "period",
            Question::LowMurderYears => "low murder years",
            Question::HighRobberyYears => "high robbery years",
            Question::ViolentCrimePerCapita => "violent crime per capita rate",
            Question::AverageMurdersAllYears => "average murders (all years)",
            Question::AverageMurdersEarly => "average murders (1994-1997)",
            Question::AverageMurdersLate => "average murders (2010-2013)",
            Question::MinimumThefts => "minimum thefts (1999-2004)",
            Question::MaximumThefts => "maximum thefts (1999-2004)",
            Question::MotorVehicleTheftYear => "year of highest motor vehicle thefts",
        }
    }
}

/// A year paired with one of its counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearValue {
    pub year: i64,
    pub value: i64,
}

/// Per-capita rate of one matching record. `rate` is `None` when the
/// population is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRate {
    pub year: i64,
    pub rate: Option<f64>,
}

/// Typed answer to one [`Question`]. `None` marks an undefined value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "question", rename_all = "snake_case")]
pub enum Answer {
    Period {
        first_year: Option<i64>,
        last_year: Option<i64>,
        years: usize,
    },
    LowMurderYears {
        threshold: i64,
        years: Vec<i64>,
    },
    HighRobberyYears {
        threshold: i64,
        entries: Vec<YearValue>,
    },
    ViolentCrimePerCapita {
        year: i64,
        rates: Vec<YearRate>,
    },
    AverageMurders {
        range: Option<YearRange>,
        average: Option<f64>,
    },
    MinimumThefts {
        range: YearRange,
        minimum: Option<i64>,
    },
    MaximumThefts {
        range: YearRange,
        maximum: Option<i64>,
    },
    MotorVehicleTheftYear {
        mode: MotorTheftMode,
        year: Option<i64>,
    },
}

impl Answer {
    /// The question this answer belongs to.
    pub fn question(&self) -> Question {
        match self {
            Answer::Period { .. } => Question::Period,
            Answer::LowMurderYears { .. } => Question::LowMurderYears,
            Answer::HighRobberyYears { .. } => Question::HighRobberyYears,
            Answer::ViolentCrimePerCapita { .. } => Question::ViolentCrimePerCapita,
            Answer::AverageMurders { range: None, .. } => Question::AverageMurdersAllYears,
            Answer::AverageMurders { range: Some(r), .. } if *r == EARLY_MURDER_RANGE => {
                Question::AverageMurdersEarly
            }
            Answer::AverageMurders { .. } => Question::AverageMurdersLate,
            Answer::MinimumThefts { .. } => Question::MinimumThefts,
            Answer::MaximumThefts { .. } => Question::MaximumThefts,
            Answer::MotorVehicleTheftYear { .. } => Question::MotorVehicleTheftYear,
        }
    }
}

/// Stateless query functions over a dataset.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Answer a single question.
    pub fn answer(question: Question, dataset: &[CrimeRecord], motor_theft: MotorTheftMode) -> Answer {
        let answer = match question {
            Question::Period => Answer::Period {
                first_year: dataset.first().map(|r| r.year),
                last_year: dataset.last().map(|r| r.year),
                years: dataset.len(),
            },
            Question::LowMurderYears => Answer::LowMurderYears {
                threshold: LOW_MURDER_THRESHOLD,
                years: Self::low_murder_years(dataset),
            },
            Question::HighRobberyYears => Answer::HighRobberyYears {
                threshold: HIGH_ROBBERY_THRESHOLD,
                entries: Self::high_robbery_years(dataset),
            },
            Question::ViolentCrimePerCapita => Answer::ViolentCrimePerCapita {
                year: PER_CAPITA_YEAR,
                rates: Self::violent_crime_per_capita(dataset, PER_CAPITA_YEAR),
            },
            Question::AverageMurdersAllYears => Answer::AverageMurders {
                range: None,
                average: Self::mean(dataset.iter().map(|r| r.murder)),
            },
            Question::AverageMurdersEarly => Self::average_murders_in(dataset, EARLY_MURDER_RANGE),
            Question::AverageMurdersLate => Self::average_murders_in(dataset, LATE_MURDER_RANGE),
            Question::MinimumThefts => Answer::MinimumThefts {
                range: THEFT_RANGE,
                minimum: Self::thefts_in(dataset, THEFT_RANGE).min(),
            },
            Question::MaximumThefts => Answer::MaximumThefts {
                range: THEFT_RANGE,
                maximum: Self::thefts_in(dataset, THEFT_RANGE).max(),
            },
            Question::MotorVehicleTheftYear => Answer::MotorVehicleTheftYear {
                mode: motor_theft,
                year: Self::motor_vehicle_theft_year(dataset, motor_theft),
            },
        };

        debug!(question = question.name(), ?answer, "answered");
        answer
    }

    /// Answer every question in parallel, returned in [`Question::ALL`] order.
    pub fn answer_all(dataset: &[CrimeRecord], motor_theft: MotorTheftMode) -> Vec<Answer> {
        Question::ALL
            .par_iter()
            .map(|&question| Self::answer(question, dataset, motor_theft))
            .collect()
    }

    /// Years with strictly fewer murders than [`LOW_MURDER_THRESHOLD`].
    pub fn low_murder_years(dataset: &[CrimeRecord]) -> Vec<i64> {
        dataset
            .iter()
            .filter(|r| r.murder < LOW_MURDER_THRESHOLD)
            .map(|r| r.year)
            .collect()
    }

    /// Years with strictly more robberies than [`HIGH_ROBBERY_THRESHOLD`].
    pub fn high_robbery_years(dataset: &[CrimeRecord]) -> Vec<YearValue> {
        dataset
            .iter()
            .filter(|r| r.robbery > HIGH_ROBBERY_THRESHOLD)
            .map(|r| YearValue {
                year: r.year,
                value: r.robbery,
            })
            .collect()
    }

    /// Violent crime divided by population for every record of `year`.
    pub fn violent_crime_per_capita(dataset: &[CrimeRecord], year: i64) -> Vec<YearRate> {
        dataset
            .iter()
            .filter(|r| r.year == year)
            .map(|r| YearRate {
                year: r.year,
                rate: (r.population != 0).then(|| r.violent_crime as f64 / r.population as f64),
            })
            .collect()
    }

    fn average_murders_in(dataset: &[CrimeRecord], range: YearRange) -> Answer {
        Answer::AverageMurders {
            range: Some(range),
            average: Self::mean(
                dataset
                    .iter()
                    .filter(|r| range.contains(r))
                    .map(|r| r.murder),
            ),
        }
    }

    fn thefts_in(dataset: &[CrimeRecord], range: YearRange) -> impl Iterator<Item = i64> + '_ {
        dataset
            .iter()
            .filter(move |r| range.contains(r))
            .map(|r| r.theft)
    }

    /// Year reported for the motor vehicle theft question.
    pub fn motor_vehicle_theft_year(dataset: &[CrimeRecord], mode: MotorTheftMode) -> Option<i64> {
        match mode {
            MotorTheftMode::FirstRecord => dataset.first().map(|r| r.year),
            MotorTheftMode::Peak => dataset
                .iter()
                .fold(None::<&CrimeRecord>, |best, r| match best {
                    Some(b) if b.motor_vehicle_theft >= r.motor_vehicle_theft => Some(b),
                    _ => Some(r),
                })
                .map(|r| r.year),
        }
    }

    /// Arithmetic mean; `None` for an empty input. Summed in `i128` so any
    /// run of `i64` values fits.
    pub fn mean(values: impl Iterator<Item = i64>) -> Option<f64> {
        let (sum, count) = values.fold((0i128, 0usize), |(sum, count), v| {
            (sum + i128::from(v), count + 1)
        });
        if count == 0 {
            None
        } else {
            Some(sum as f64 / count as f64)
        }
    }
}
