// Data module for trip records and city datasets
// Author: Gabriel Demetrios Lafis

mod csv;

pub use csv::*;

use std::error::Error;
use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Column names as they appear in the city source files
pub mod columns {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    /// Columns every city source provides
    pub const REQUIRED: [&str; 6] = [
        START_TIME,
        END_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
}

/// Calendar month names, indexed by month number minus one
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Represents a supported city
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Look up a city by its identifier
    pub fn from_name(name: &str) -> Result<Self, DataError> {
        match name.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(DataError::UnknownCity(name.to_string())),
        }
    }

    /// Get the city identifier
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Get the source file name for the city
    pub fn source_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a single trip record
///
/// The time-based fields `month`, `day_of_week` and `hour` are derived from
/// the start time by the constructor and are therefore always present.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    month: u32,
    day_of_week: Weekday,
    hour: u32,
}

impl TripRecord {
    /// Create a new trip record, deriving the time-based fields from the start time
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration_seconds: f64,
        start_station: String,
        end_station: String,
        user_type: String,
    ) -> Self {
        TripRecord {
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time,
            duration_seconds,
            start_station,
            end_station,
            user_type,
            gender: None,
            birth_year: None,
        }
    }

    /// Set the gender recorded for the trip
    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    /// Set the rider birth year recorded for the trip
    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    /// Trip month (1 = January), derived from the start time
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Trip day of the week, derived from the start time
    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Trip start hour (0-23), derived from the start time
    pub fn hour(&self) -> u32 {
        self.hour
    }
}

/// Represents the column set of a city source
///
/// The optional columns (`Gender`, `Birth Year`) exist in some sources and
/// not in others, so column presence is captured once at load time instead
/// of being probed per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Create a new schema with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Schema { columns }
    }

    /// Create the schema shared by every city source, without optional columns
    pub fn required() -> Self {
        Schema::new(columns::REQUIRED.iter().map(|c| c.to_string()).collect())
    }

    /// Extend the schema with another column
    pub fn with_column(mut self, name: &str) -> Self {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        self
    }

    /// Check whether a column exists in the source
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Get the column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Represents an ordered collection of trip records for one city
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    city: City,
    schema: Schema,
    records: Vec<TripRecord>,
    skipped_rows: usize,
}

impl Dataset {
    /// Create a new empty dataset for a city
    pub fn new(city: City, schema: Schema) -> Self {
        Dataset {
            city,
            schema,
            records: Vec::new(),
            skipped_rows: 0,
        }
    }

    /// Add a record to the dataset
    pub fn add_record(&mut self, record: TripRecord) -> Result<(), DataError> {
        if record.gender.is_some() && !self.schema.has_column(columns::GENDER) {
            return Err(DataError::Schema(format!(
                "record carries a value for absent column '{}'",
                columns::GENDER
            )));
        }
        if record.birth_year.is_some() && !self.schema.has_column(columns::BIRTH_YEAR) {
            return Err(DataError::Schema(format!(
                "record carries a value for absent column '{}'",
                columns::BIRTH_YEAR
            )));
        }

        self.records.push(record);
        Ok(())
    }

    /// Get the city the dataset was loaded for
    pub fn city(&self) -> City {
        self.city
    }

    /// Get the dataset schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Check whether a column exists in the underlying source
    ///
    /// Column presence is a property of the source, not of the surviving
    /// rows: filtering removes rows, never columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.has_column(name)
    }

    /// Get the records in load order
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Get the number of records in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a reference to a record by index
    pub fn get_record(&self, index: usize) -> Option<&TripRecord> {
        self.records.get(index)
    }

    /// Number of malformed source rows excluded at load time
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub(crate) fn set_skipped_rows(&mut self, skipped_rows: usize) {
        self.skipped_rows = skipped_rows;
    }
}

/// Represents an error in the data module
#[derive(Debug)]
pub enum DataError {
    /// The requested city is not in the supported set
    UnknownCity(String),
    /// The backing source file could not be read
    SourceUnavailable(String, std::io::Error),
    /// The source header or a record conflicts with the expected column set
    Schema(String),
    /// The source could not be parsed
    Parse(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataError::UnknownCity(city) => write!(f, "Unknown city: '{}'", city),
            DataError::SourceUnavailable(path, err) => {
                write!(f, "Source unavailable: {}: {}", path, err)
            }
            DataError::Schema(msg) => write!(f, "Schema error: {}", msg),
            DataError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for DataError {}
