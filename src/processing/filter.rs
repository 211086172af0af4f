// Filter operations narrowing a dataset by month and day of week
// Author: Gabriel Demetrios Lafis

use chrono::Weekday;
use log::debug;

use super::{DataProcessor, ProcessingError};
use crate::data::{Dataset, MONTH_NAMES, WEEKDAY_NAMES};

/// Months a dataset can be narrowed to (the sources cover January to June)
const SELECTABLE_MONTHS: usize = 6;

/// Weekday for each name in WEEKDAY_NAMES
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Month constraint for a trip filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSelector {
    /// Match all months
    All,
    /// Match one month by number (1 = January)
    Month(u32),
}

impl MonthSelector {
    /// Parse a selector from its external form: "all" or a month name
    /// from January to June, case-insensitive
    pub fn parse(input: &str) -> Result<Self, ProcessingError> {
        let normalized = input.trim();
        if normalized.eq_ignore_ascii_case("all") {
            return Ok(MonthSelector::All);
        }

        MONTH_NAMES[..SELECTABLE_MONTHS]
            .iter()
            .position(|name| name.eq_ignore_ascii_case(normalized))
            .map(|index| MonthSelector::Month(index as u32 + 1))
            .ok_or_else(|| ProcessingError::InvalidMonth(input.to_string()))
    }

    fn matches(&self, month: u32) -> bool {
        match self {
            MonthSelector::All => true,
            MonthSelector::Month(selected) => *selected == month,
        }
    }
}

/// Day-of-week constraint for a trip filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    /// Match all days
    All,
    /// Match one weekday
    Day(Weekday),
}

impl DaySelector {
    /// Parse a selector from its external form: "all" or a weekday name,
    /// case-insensitive
    pub fn parse(input: &str) -> Result<Self, ProcessingError> {
        let normalized = input.trim();
        if normalized.eq_ignore_ascii_case("all") {
            return Ok(DaySelector::All);
        }

        WEEKDAY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(normalized))
            .map(|index| DaySelector::Day(WEEKDAYS[index]))
            .ok_or_else(|| ProcessingError::InvalidDay(input.to_string()))
    }

    fn matches(&self, day: Weekday) -> bool {
        match self {
            DaySelector::All => true,
            DaySelector::Day(selected) => *selected == day,
        }
    }
}

/// Filter trips by month and day of week
pub struct TripFilter {
    name: String,
    month: MonthSelector,
    day: DaySelector,
}

impl TripFilter {
    /// Create a filter applying both a month and a day constraint
    pub fn new(month: MonthSelector, day: DaySelector) -> Self {
        TripFilter {
            name: "trip_filter".to_string(),
            month,
            day,
        }
    }

    /// Create a filter applying only a month constraint
    pub fn by_month(month: MonthSelector) -> Self {
        TripFilter {
            name: "month_filter".to_string(),
            month,
            day: DaySelector::All,
        }
    }

    /// Create a filter applying only a day constraint
    pub fn by_day(day: DaySelector) -> Self {
        TripFilter {
            name: "day_filter".to_string(),
            month: MonthSelector::All,
            day,
        }
    }
}

impl DataProcessor for TripFilter {
    fn process(&self, input: &Dataset) -> Result<Dataset, ProcessingError> {
        // New dataset, same city and column set: filtering removes rows, never columns
        let mut result = Dataset::new(input.city(), input.schema().clone());
        result.set_skipped_rows(input.skipped_rows());

        for record in input.records() {
            if self.month.matches(record.month()) && self.day.matches(record.day_of_week()) {
                result.add_record(record.clone())?;
            }
        }

        debug!("{} kept {} of {} records", self.name, result.len(), input.len());

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
