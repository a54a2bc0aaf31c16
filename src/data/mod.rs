//! Data module - CSV loading and crime records

mod loader;
mod record;

pub use loader::{DataLoader, LoaderError};
pub use record::{CrimeRecord, Dataset, FIELD_COUNT};
