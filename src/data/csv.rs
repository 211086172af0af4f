// CSV data source for city trip files
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info, warn};

use super::{columns, City, DataError, Dataset, Schema, TripRecord};

/// Timestamp format shared by every city source file
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents a source of trip datasets
pub trait TripDataSource {
    /// Load the full dataset for a city identifier
    fn load(&self, city: &str) -> Result<Dataset, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// CSV-file backed trip data source
pub struct CsvTripSource {
    data_dir: PathBuf,
}

impl CsvTripSource {
    /// Create a new CSV source reading city files from the given directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        CsvTripSource {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve the source file path for a city
    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.source_file())
    }
}

impl TripDataSource for CsvTripSource {
    fn load(&self, city: &str) -> Result<Dataset, DataError> {
        let city = City::from_name(city)?;
        let path = self.path_for(city);

        let file = File::open(&path)
            .map_err(|err| DataError::SourceUnavailable(path.display().to_string(), err))?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| DataError::Parse(err.to_string()))?
            .clone();

        let indexes = ColumnIndexes::resolve(&headers, &path)?;

        // The schema records exactly which columns the source carries,
        // independent of how many rows survive parsing or filtering
        let schema = Schema::new(headers.iter().map(|h| h.to_string()).collect());
        let mut dataset = Dataset::new(city, schema);

        let mut skipped = 0usize;
        for result in csv_reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    debug!("skipping unreadable row: {}", err);
                    skipped += 1;
                    continue;
                }
            };

            match parse_record(&record, &indexes) {
                Ok(trip) => dataset.add_record(trip)?,
                Err(reason) => {
                    debug!("skipping malformed row: {}", reason);
                    skipped += 1;
                }
            }
        }

        dataset.set_skipped_rows(skipped);

        if skipped > 0 {
            warn!("{}: excluded {} malformed rows", city, skipped);
        }
        info!(
            "loaded {} records for {} from {}",
            dataset.len(),
            city,
            path.display()
        );

        Ok(dataset)
    }

    fn name(&self) -> &str {
        self.data_dir.to_str().unwrap_or("")
    }
}

/// Header positions of the known columns in one source file
struct ColumnIndexes {
    start_time: usize,
    end_time: usize,
    duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndexes {
    fn resolve(headers: &csv::StringRecord, path: &Path) -> Result<Self, DataError> {
        let required = |name: &str| -> Result<usize, DataError> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                DataError::Schema(format!(
                    "column '{}' missing from {}",
                    name,
                    path.display()
                ))
            })
        };
        let optional = |name: &str| headers.iter().position(|h| h == name);

        Ok(ColumnIndexes {
            start_time: required(columns::START_TIME)?,
            end_time: required(columns::END_TIME)?,
            duration: required(columns::TRIP_DURATION)?,
            start_station: required(columns::START_STATION)?,
            end_station: required(columns::END_STATION)?,
            user_type: required(columns::USER_TYPE)?,
            gender: optional(columns::GENDER),
            birth_year: optional(columns::BIRTH_YEAR),
        })
    }
}

/// Parse one CSV row into a trip record, or explain why the row is malformed
fn parse_record(record: &csv::StringRecord, indexes: &ColumnIndexes) -> Result<TripRecord, String> {
    let field = |index: usize| record.get(index).unwrap_or("").trim();

    let start_time = NaiveDateTime::parse_from_str(field(indexes.start_time), TIMESTAMP_FORMAT)
        .map_err(|err| format!("bad start time '{}': {}", field(indexes.start_time), err))?;
    let end_time = NaiveDateTime::parse_from_str(field(indexes.end_time), TIMESTAMP_FORMAT)
        .map_err(|err| format!("bad end time '{}': {}", field(indexes.end_time), err))?;

    let duration_seconds: f64 = field(indexes.duration)
        .parse()
        .map_err(|_| format!("non-numeric trip duration '{}'", field(indexes.duration)))?;
    if !duration_seconds.is_finite() || duration_seconds < 0.0 {
        return Err(format!("invalid trip duration {}", duration_seconds));
    }

    let start_station = field(indexes.start_station);
    if start_station.is_empty() {
        return Err("empty start station".to_string());
    }
    let end_station = field(indexes.end_station);
    if end_station.is_empty() {
        return Err("empty end station".to_string());
    }
    let user_type = field(indexes.user_type);
    if user_type.is_empty() {
        return Err("empty user type".to_string());
    }

    // A malformed value in an optional column costs the value, not the row
    let gender = indexes.gender.and_then(|index| {
        let value = field(index);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    });
    let birth_year = indexes
        .birth_year
        .and_then(|index| field(index).parse::<f64>().ok())
        .map(|year| year as i32);

    Ok(TripRecord::new(
        start_time,
        end_time,
        duration_seconds,
        start_station.to_string(),
        end_station.to_string(),
        user_type.to_string(),
    )
    .with_gender(gender)
    .with_birth_year(birth_year))
}
