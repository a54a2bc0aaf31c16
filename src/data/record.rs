//! Crime Record Module
//! One row of annual crime statistics with fixed positional fields.

/// Number of comma-separated fields every data row must carry.
pub const FIELD_COUNT: usize = 11;

/// One year's crime statistics, in CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrimeRecord {
    pub year: i64,
    pub population: i64,
    pub violent_crime: i64,
    pub murder: i64,
    pub rape: i64,
    pub robbery: i64,
    pub aggravated_assault: i64,
    pub property_crime: i64,
    pub burglary: i64,
    pub theft: i64,
    pub motor_vehicle_theft: i64,
}

/// All loaded records in file order. Never sorted, never mutated after load.
pub type Dataset = Vec<CrimeRecord>;

impl CrimeRecord {
    /// Build a record from exactly [`FIELD_COUNT`] positional values.
    pub fn from_fields(fields: [i64; FIELD_COUNT]) -> Self {
        let [
            year,
            population,
            violent_crime,
            murder,
            rape,
            robbery,
            aggravated_assault,
            property_crime,
            burglary,
            theft,
            motor_vehicle_theft,
        ] = fields;

        Self {
            year,
            population,
            violent_crime,
            murder,
            rape,
            robbery,
            aggravated_assault,
            property_crime,
            burglary,
            theft,
            motor_vehicle_theft,
        }
    }

    /// Check whether the record's year falls in `[start, end]`.
    pub fn in_years(&self, start: i64, end: i64) -> bool {
        self.year >= start && self.year <= end
    }
}
