//! Stats module - answers to the fixed report questions

mod calculator;

pub use calculator::{
    Answer, Question, StatsCalculator, YearRange, YearRate, YearValue, EARLY_MURDER_RANGE,
    HIGH_ROBBERY_THRESHOLD, LATE_MURDER_RANGE, LOW_MURDER_THRESHOLD, PER_CAPITA_YEAR, THEFT_RANGE,
};
