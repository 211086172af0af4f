// Pipeline tests
// Author: Gabriel Demetrios Lafis

use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};
use mockall::mock;

use rust_bikeshare_analytics::{
    data::{columns, City, DataError, Dataset, Schema, TripDataSource, TripRecord},
    processing::{
        station_stats, time_stats, trip_duration_stats, user_stats, DataProcessor, DaySelector,
        MonthSelector, Pipeline, ProcessingError, TripFilter,
    },
};

fn timestamp(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn trip(
    month: u32,
    day: u32,
    hour: u32,
    start: &str,
    end: &str,
    duration: f64,
    user_type: &str,
) -> TripRecord {
    let start_time = timestamp(month, day, hour);
    TripRecord::new(
        start_time,
        start_time + Duration::seconds(duration as i64),
        duration,
        start.to_string(),
        end.to_string(),
        user_type.to_string(),
    )
}

// Three March Mondays and one April Friday
fn sample_dataset() -> Dataset {
    let mut dataset = Dataset::new(City::Chicago, Schema::required());

    dataset
        .add_record(trip(3, 6, 8, "Clark St", "State St", 100.0, "Subscriber"))
        .unwrap();
    dataset
        .add_record(trip(3, 6, 8, "Clark St", "State St", 200.0, "Subscriber"))
        .unwrap();
    dataset
        .add_record(trip(3, 13, 9, "State St", "Clark St", 4000.0, "Customer"))
        .unwrap();
    dataset
        .add_record(trip(4, 7, 17, "Canal St", "State St", 300.0, "Subscriber"))
        .unwrap();

    dataset
}

#[test]
fn test_filter_all_is_identity() {
    let dataset = sample_dataset();
    let filter = TripFilter::new(MonthSelector::All, DaySelector::All);

    let result = filter.process(&dataset).unwrap();

    assert_eq!(result.len(), dataset.len());
    assert_eq!(result.records(), dataset.records());
    assert_eq!(result.schema(), dataset.schema());
}

#[test]
fn test_filter_by_month() {
    let dataset = sample_dataset();
    let filter = TripFilter::by_month(MonthSelector::parse("march").unwrap());

    let result = filter.process(&dataset).unwrap();

    assert_eq!(result.len(), 3);
    assert!(result.records().iter().all(|r| r.month() == 3));
}

#[test]
fn test_filter_by_day() {
    let dataset = sample_dataset();
    let filter = TripFilter::by_day(DaySelector::parse("MONDAY").unwrap());

    let result = filter.process(&dataset).unwrap();

    assert_eq!(result.len(), 3);
    assert!(result.records().iter().all(|r| r.day_of_week() == Weekday::Mon));
}

#[test]
fn test_month_and_day_filters_compose() {
    let dataset = sample_dataset();
    let month = MonthSelector::parse("march").unwrap();
    let day = DaySelector::parse("monday").unwrap();

    let combined = TripFilter::new(month, day).process(&dataset).unwrap();

    let chained = Pipeline::new("composed")
        .add(TripFilter::by_month(month))
        .add(TripFilter::by_day(day))
        .process(&dataset)
        .unwrap();

    assert_eq!(combined, chained);
}

#[test]
fn test_filter_is_idempotent() {
    let dataset = sample_dataset();
    let filter = TripFilter::new(
        MonthSelector::parse("march").unwrap(),
        DaySelector::parse("monday").unwrap(),
    );

    let once = filter.process(&dataset).unwrap();
    let twice = filter.process(&once).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_empty_result_is_a_dataset_not_an_error() {
    let dataset = sample_dataset();
    let filter = TripFilter::by_month(MonthSelector::parse("june").unwrap());

    let result = filter.process(&dataset).unwrap();

    assert!(result.is_empty());
    // Columns survive even when no rows do
    assert_eq!(result.schema(), dataset.schema());
}

#[test]
fn test_statistics_over_zero_rows_raise_no_data() {
    let dataset = sample_dataset();
    let empty = TripFilter::by_month(MonthSelector::parse("june").unwrap())
        .process(&dataset)
        .unwrap();

    assert!(matches!(time_stats(&empty), Err(ProcessingError::NoData)));
    assert!(matches!(station_stats(&empty), Err(ProcessingError::NoData)));
    assert!(matches!(
        trip_duration_stats(&empty),
        Err(ProcessingError::NoData)
    ));
    assert!(matches!(user_stats(&empty), Err(ProcessingError::NoData)));
}

#[test]
fn test_time_stats_most_common_values() {
    let dataset = sample_dataset();

    let stats = time_stats(&dataset).unwrap();

    assert_eq!(stats.common_month, 3);
    assert_eq!(stats.common_month_name, "March");
    assert_eq!(stats.common_day, "Monday");
    assert_eq!(stats.common_hour, 8);
}

#[test]
fn test_time_stats_month_tie_resolves_to_lower_month() {
    let mut dataset = Dataset::new(City::Chicago, Schema::required());
    dataset
        .add_record(trip(5, 2, 10, "Clark St", "State St", 60.0, "Subscriber"))
        .unwrap();
    dataset
        .add_record(trip(3, 6, 11, "Clark St", "State St", 60.0, "Subscriber"))
        .unwrap();

    let stats = time_stats(&dataset).unwrap();

    assert_eq!(stats.common_month, 3);
    assert_eq!(stats.common_month_name, "March");
}

#[test]
fn test_station_stats_trip_combination() {
    let dataset = sample_dataset();
    let march = TripFilter::by_month(MonthSelector::parse("march").unwrap())
        .process(&dataset)
        .unwrap();

    let stats = station_stats(&march).unwrap();

    assert_eq!(stats.common_start_station, "Clark St");
    assert_eq!(stats.common_end_station, "State St");
    assert_eq!(stats.common_trip, "Clark St to State St");
    assert_eq!(stats.common_trip_count, 2);
}

#[test]
fn test_duration_stats_breakdown() {
    let dataset = sample_dataset();
    let march = TripFilter::by_month(MonthSelector::parse("march").unwrap())
        .process(&dataset)
        .unwrap();

    let stats = trip_duration_stats(&march).unwrap();

    // 100 + 200 + 4000 seconds
    assert_eq!(stats.total_seconds, 4300.0);
    assert_eq!(stats.total.hours, 1);
    assert_eq!(stats.total.minutes, 11);
    assert_eq!(stats.total.seconds, 40);

    // The mean is a real number, truncated only for the breakdown
    assert!((stats.mean_seconds - 4300.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.mean.hours, 0);
    assert_eq!(stats.mean.minutes, 23);
    assert_eq!(stats.mean.seconds, 53);
}

#[test]
fn test_user_stats_frequency_order() {
    let dataset = sample_dataset();
    let march = TripFilter::by_month(MonthSelector::parse("march").unwrap())
        .process(&dataset)
        .unwrap();

    let stats = user_stats(&march).unwrap();

    assert_eq!(
        stats.user_type_counts,
        vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
    );
}

#[test]
fn test_user_stats_without_optional_columns() {
    let dataset = sample_dataset();

    let stats = user_stats(&dataset).unwrap();

    assert!(stats.gender_counts.is_none());
    assert!(stats.birth_year.is_none());
}

#[test]
fn test_user_stats_with_demographics() {
    let schema = Schema::required()
        .with_column(columns::GENDER)
        .with_column(columns::BIRTH_YEAR);
    let mut dataset = Dataset::new(City::NewYorkCity, schema);

    dataset
        .add_record(
            trip(1, 2, 9, "Clark St", "State St", 60.0, "Subscriber")
                .with_gender(Some("Male".to_string()))
                .with_birth_year(Some(1992)),
        )
        .unwrap();
    dataset
        .add_record(
            trip(1, 2, 9, "Clark St", "State St", 60.0, "Subscriber")
                .with_gender(Some("Female".to_string()))
                .with_birth_year(Some(1992)),
        )
        .unwrap();
    dataset
        .add_record(
            trip(1, 3, 9, "State St", "Clark St", 60.0, "Customer")
                .with_gender(Some("Male".to_string()))
                .with_birth_year(Some(1989)),
        )
        .unwrap();

    let stats = user_stats(&dataset).unwrap();

    assert_eq!(
        stats.gender_counts,
        Some(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
    );

    let birth_year = stats.birth_year.unwrap();
    assert_eq!(birth_year.earliest, 1989);
    assert_eq!(birth_year.most_recent, 1992);
    assert_eq!(birth_year.most_common, 1992);
}

#[test]
fn test_birth_year_mode_tie_resolves_to_smaller_year() {
    let schema = Schema::required().with_column(columns::BIRTH_YEAR);
    let mut dataset = Dataset::new(City::NewYorkCity, schema);

    dataset
        .add_record(
            trip(1, 2, 9, "Clark St", "State St", 60.0, "Subscriber").with_birth_year(Some(1992)),
        )
        .unwrap();
    dataset
        .add_record(
            trip(1, 3, 9, "Clark St", "State St", 60.0, "Subscriber").with_birth_year(Some(1990)),
        )
        .unwrap();

    let stats = user_stats(&dataset).unwrap();

    assert_eq!(stats.birth_year.unwrap().most_common, 1990);
}

#[test]
fn test_add_record_rejects_value_for_absent_column() {
    let mut dataset = Dataset::new(City::Washington, Schema::required());
    let record =
        trip(1, 2, 9, "Clark St", "State St", 60.0, "Subscriber").with_gender(Some("Male".to_string()));

    match dataset.add_record(record) {
        Err(DataError::Schema(_)) => {}
        other => panic!("expected a schema error, got {:?}", other),
    }
}

#[test]
fn test_selector_parsing() {
    assert_eq!(MonthSelector::parse("all").unwrap(), MonthSelector::All);
    assert_eq!(MonthSelector::parse("March").unwrap(), MonthSelector::Month(3));
    assert!(matches!(
        MonthSelector::parse("july"),
        Err(ProcessingError::InvalidMonth(_))
    ));

    assert_eq!(DaySelector::parse("All").unwrap(), DaySelector::All);
    assert_eq!(
        DaySelector::parse("sunday").unwrap(),
        DaySelector::Day(Weekday::Sun)
    );
    assert!(matches!(
        DaySelector::parse("someday"),
        Err(ProcessingError::InvalidDay(_))
    ));
}

mock! {
    Source {}

    impl TripDataSource for Source {
        fn load(&self, city: &str) -> Result<Dataset, DataError>;
        fn name(&self) -> &'static str;
    }
}

#[test]
fn test_pipeline_runs_on_any_source() {
    let mut source = MockSource::new();
    source.expect_load().returning(|_| Ok(sample_dataset()));

    let dataset = source.load("chicago").unwrap();
    let filtered = TripFilter::new(MonthSelector::All, DaySelector::All)
        .process(&dataset)
        .unwrap();

    assert_eq!(filtered.len(), 4);
    assert!(time_stats(&filtered).is_ok());
}
