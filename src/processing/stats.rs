// Statistical routines over a filtered dataset
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::ProcessingError;
use crate::data::{columns, Dataset, MONTH_NAMES, WEEKDAY_NAMES};

/// Separator joining start and end station into a trip key
const TRIP_SEPARATOR: &str = " to ";

/// Most frequent travel times for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Most common month number (1 = January)
    pub common_month: u32,
    /// Calendar name of the most common month
    pub common_month_name: String,
    /// Most common day of the week
    pub common_day: String,
    /// Most common start hour (0-23)
    pub common_hour: u32,
}

/// Most popular stations and trip for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub common_start_station: String,
    pub common_end_station: String,
    /// Most frequent start/end combination, formatted "start to end"
    pub common_trip: String,
    /// Number of trips matching the most frequent combination
    pub common_trip_count: usize,
}

/// Total and mean trip duration for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub total: DurationBreakdown,
    pub mean: DurationBreakdown,
}

/// Duration decomposed into whole hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    /// Decompose a duration in seconds, truncating any fractional part
    pub fn from_seconds(total_seconds: f64) -> Self {
        let whole = total_seconds as u64;
        let (minutes, seconds) = (whole / 60, whole % 60);
        let (hours, minutes) = (minutes / 60, minutes % 60);

        DurationBreakdown {
            hours,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, and {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// User demographics for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Trip counts per user type, ordered by descending count
    pub user_type_counts: Vec<(String, usize)>,
    /// Trip counts per gender, None when the city source has no gender column
    pub gender_counts: Option<Vec<(String, usize)>>,
    /// Birth year aggregates, None when the city source has no birth year column
    pub birth_year: Option<BirthYearStats>,
}

/// Birth year aggregates for a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Compute the most frequent month, day of week and start hour
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats, ProcessingError> {
    if dataset.is_empty() {
        return Err(ProcessingError::NoData);
    }

    let mut month_counts = [0usize; 12];
    let mut day_counts = [0usize; 7];
    let mut hour_counts = [0usize; 24];

    for record in dataset.records() {
        month_counts[(record.month() - 1) as usize] += 1;
        day_counts[record.day_of_week().num_days_from_monday() as usize] += 1;
        hour_counts[record.hour() as usize] += 1;
    }

    let month_index = mode_index(&month_counts).ok_or(ProcessingError::NoData)?;
    let day_index = mode_index(&day_counts).ok_or(ProcessingError::NoData)?;
    let hour = mode_index(&hour_counts).ok_or(ProcessingError::NoData)?;

    Ok(TimeStats {
        common_month: month_index as u32 + 1,
        common_month_name: MONTH_NAMES[month_index].to_string(),
        common_day: WEEKDAY_NAMES[day_index].to_string(),
        common_hour: hour as u32,
    })
}

/// Compute the most popular start station, end station and trip combination
pub fn station_stats(dataset: &Dataset) -> Result<StationStats, ProcessingError> {
    if dataset.is_empty() {
        return Err(ProcessingError::NoData);
    }

    let start = mode_str(dataset.records().iter().map(|r| r.start_station.as_str()))
        .ok_or(ProcessingError::NoData)?;
    let end = mode_str(dataset.records().iter().map(|r| r.end_station.as_str()))
        .ok_or(ProcessingError::NoData)?;

    let trips: Vec<String> = dataset
        .records()
        .iter()
        .map(|r| format!("{}{}{}", r.start_station, TRIP_SEPARATOR, r.end_station))
        .collect();
    let trip = mode_str(trips.iter().map(|t| t.as_str())).ok_or(ProcessingError::NoData)?;

    Ok(StationStats {
        common_start_station: start.0.to_string(),
        common_end_station: end.0.to_string(),
        common_trip: trip.0.to_string(),
        common_trip_count: trip.1,
    })
}

/// Compute total and mean trip duration with hour/minute/second breakdowns
pub fn trip_duration_stats(dataset: &Dataset) -> Result<DurationStats, ProcessingError> {
    if dataset.is_empty() {
        return Err(ProcessingError::NoData);
    }

    let total_seconds: f64 = dataset.records().iter().map(|r| r.duration_seconds).sum();
    let mean_seconds = total_seconds / dataset.len() as f64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total: DurationBreakdown::from_seconds(total_seconds),
        mean: DurationBreakdown::from_seconds(mean_seconds),
    })
}

/// Compute user type counts and, where the source provides the columns,
/// gender counts and birth year aggregates
pub fn user_stats(dataset: &Dataset) -> Result<UserStats, ProcessingError> {
    if dataset.is_empty() {
        return Err(ProcessingError::NoData);
    }

    let user_type_counts = frequency_table(dataset.records().iter().map(|r| r.user_type.as_str()));

    let gender_counts = if dataset.has_column(columns::GENDER) {
        Some(frequency_table(
            dataset.records().iter().filter_map(|r| r.gender.as_deref()),
        ))
    } else {
        None
    };

    let birth_year = if dataset.has_column(columns::BIRTH_YEAR) {
        let years: Vec<i32> = dataset.records().iter().filter_map(|r| r.birth_year).collect();

        // A present column with no usable values leaves min, max and mode undefined
        let earliest = *years.iter().min().ok_or(ProcessingError::NoData)?;
        let most_recent = *years.iter().max().ok_or(ProcessingError::NoData)?;
        let most_common = mode_year(&years).ok_or(ProcessingError::NoData)?;

        Some(BirthYearStats {
            earliest,
            most_recent,
            most_common,
        })
    } else {
        None
    };

    Ok(UserStats {
        user_type_counts,
        gender_counts,
        birth_year,
    })
}

/// Mode over values addressed by a small numeric index.
/// Ties resolve to the smallest index.
fn mode_index(counts: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (index, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        match best {
            Some(current) if counts[current] >= count => {}
            _ => best = Some(index),
        }
    }

    best
}

/// Mode over string values, with its count.
/// Ties resolve to the value seen first in row order.
fn mode_str<'a, I>(values: I) -> Option<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, value) in values.into_iter().enumerate() {
        let entry = counts.entry(value).or_insert((0, order));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, order_a)), (_, (count_b, order_b))| {
            count_a.cmp(count_b).then(order_b.cmp(order_a))
        })
        .map(|(value, (count, _))| (value, count))
}

/// Mode over birth years. Ties resolve to the smaller year.
fn mode_year(years: &[i32]) -> Option<i32> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for &year in years {
        *counts.entry(year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(year_a, count_a), (year_b, count_b)| {
            count_a.cmp(count_b).then(year_b.cmp(year_a))
        })
        .map(|(year, _)| year)
}

/// Frequency table ordered by descending count.
/// Ties resolve to the value seen first in row order.
fn frequency_table<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, value) in values.into_iter().enumerate() {
        let entry = counts.entry(value).or_insert((0, order));
        entry.0 += 1;
    }

    let mut table: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    table.sort_by(|(_, (count_a, order_a)), (_, (count_b, order_b))| {
        count_b.cmp(count_a).then(order_a.cmp(order_b))
    });

    table
        .into_iter()
        .map(|(value, (count, _))| (value.to_string(), count))
        .collect()
}
