// Simple pipeline walkthrough
// Author: Gabriel Demetrios Lafis

use chrono::{Duration, NaiveDateTime};

use rust_bikeshare_analytics::{
    data::{columns, City, Dataset, Schema, TripRecord},
    processing::{
        station_stats, time_stats, trip_duration_stats, user_stats, DataProcessor, DaySelector,
        MonthSelector, TripFilter,
    },
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a small dataset in memory
    let schema = Schema::required()
        .with_column(columns::GENDER)
        .with_column(columns::BIRTH_YEAR);
    let mut dataset = Dataset::new(City::Chicago, schema);

    dataset.add_record(
        trip("2017-03-06 08:05:00", 900.0, "Clark St", "State St", "Subscriber")?
            .with_gender(Some("Female".to_string()))
            .with_birth_year(Some(1992)),
    )?;
    dataset.add_record(
        trip("2017-03-13 08:40:00", 1200.0, "Clark St", "State St", "Subscriber")?
            .with_gender(Some("Male".to_string()))
            .with_birth_year(Some(1989)),
    )?;
    dataset.add_record(
        trip("2017-03-18 14:10:00", 2400.0, "Canal St", "Clark St", "Customer")?,
    )?;
    dataset.add_record(
        trip("2017-04-07 17:30:00", 600.0, "State St", "Canal St", "Subscriber")?
            .with_gender(Some("Male".to_string()))
            .with_birth_year(Some(1995)),
    )?;

    println!("Loaded {} trips for {}", dataset.len(), dataset.city());

    // Narrow to March and compute every statistic
    let filter = TripFilter::new(MonthSelector::parse("march")?, DaySelector::parse("all")?);
    let march = filter.process(&dataset)?;
    println!("{} trips in March\n", march.len());

    let time = time_stats(&march)?;
    println!("Most common month: {} ({})", time.common_month, time.common_month_name);
    println!("Most common day: {}", time.common_day);
    println!("Most common start hour: {}", time.common_hour);

    let stations = station_stats(&march)?;
    println!(
        "\nMost frequent trip: {} ({} trips)",
        stations.common_trip, stations.common_trip_count
    );

    let duration = trip_duration_stats(&march)?;
    println!("\nTotal travel time: {}", duration.total);
    println!("Mean travel time: {}", duration.mean);

    let users = user_stats(&march)?;
    println!("\nCounts of user types:");
    for (user_type, count) in &users.user_type_counts {
        println!("  {}: {}", user_type, count);
    }

    Ok(())
}

// Helper building a record from a start timestamp and duration
fn trip(
    start: &str,
    duration_seconds: f64,
    start_station: &str,
    end_station: &str,
    user_type: &str,
) -> Result<TripRecord, Box<dyn std::error::Error>> {
    let start_time = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S")?;
    let end_time = start_time + Duration::seconds(duration_seconds as i64);

    Ok(TripRecord::new(
        start_time,
        end_time,
        duration_seconds,
        start_station.to_string(),
        end_station.to_string(),
        user_type.to_string(),
    ))
}
