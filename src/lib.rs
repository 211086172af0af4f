// Rust Bikeshare Analytics
// Author: Gabriel Demetrios Lafis

//! # Rust Bikeshare Analytics
//!
//! A bikeshare trip analytics engine written in Rust.
//!
//! ## Features
//!
//! - Loading city trip logs from CSV with time fields derived at load time
//! - Composable month and day-of-week filtering
//! - Travel time, station, trip duration and user statistics
//! - Deterministic mode computation with documented tie-breaks
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_bikeshare_analytics::{
//!     data::{City, Dataset, Schema, TripRecord},
//!     processing::{time_stats, DataProcessor, DaySelector, MonthSelector, TripFilter},
//! };
//!
//! // Build a small dataset in memory
//! let mut dataset = Dataset::new(City::Chicago, Schema::required());
//!
//! let start = NaiveDate::from_ymd_opt(2017, 3, 6).unwrap().and_hms_opt(8, 5, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2017, 3, 6).unwrap().and_hms_opt(8, 20, 0).unwrap();
//! dataset.add_record(TripRecord::new(
//!     start,
//!     end,
//!     900.0,
//!     "Clark St".to_string(),
//!     "State St".to_string(),
//!     "Subscriber".to_string(),
//! )).unwrap();
//!
//! // Narrow to March trips and compute travel time statistics
//! let filter = TripFilter::new(MonthSelector::parse("march").unwrap(), DaySelector::All);
//! let filtered = filter.process(&dataset).unwrap();
//! let stats = time_stats(&filtered).unwrap();
//!
//! assert_eq!(stats.common_month, 3);
//! assert_eq!(stats.common_day, "Monday");
//! ```

pub mod data;
pub mod processing;
pub mod utils;

// Re-export main types
pub use data::{City, CsvTripSource, Dataset, Schema, TripDataSource, TripRecord};
pub use processing::{DataProcessor, DaySelector, MonthSelector, Pipeline, TripFilter};
pub use utils::Config;
