// Rust Bikeshare Analytics - Main executable
// Author: Gabriel Demetrios Lafis

use clap::{App, Arg};
use log::info;
use serde::Serialize;

use rust_bikeshare_analytics::{
    data::{CsvTripSource, TripDataSource},
    processing::{
        station_stats, time_stats, trip_duration_stats, user_stats, DataProcessor, DaySelector,
        DurationStats, MonthSelector, StationStats, TimeStats, TripFilter, UserStats,
    },
    utils::{init_logging, AppError, AppResult, Config},
};

/// Full report for one city and filter selection
#[derive(Serialize)]
struct CityReport {
    city: String,
    month: String,
    day: String,
    row_count: usize,
    skipped_rows: usize,
    time: TimeStats,
    stations: StationStats,
    duration: DurationStats,
    users: UserStats,
}

fn main() -> AppResult<()> {
    // Parse command line arguments
    let matches = App::new("Rust Bikeshare Analytics")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Descriptive statistics over city bikeshare trip logs")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("city")
                .long("city")
                .value_name("CITY")
                .help("City to analyze: chicago, new york city or washington")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .value_name("MONTH")
                .help("Month filter: all, january, ..., june")
                .takes_value(true)
                .default_value("all"),
        )
        .arg(
            Arg::new("day")
                .long("day")
                .value_name("DAY")
                .help("Day filter: all, monday, ..., sunday")
                .takes_value(true)
                .default_value("all"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the city csv files")
                .takes_value(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as JSON"),
        )
        .get_matches();

    // Load configuration
    let config = if let Some(config_path) = matches.value_of("config") {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let city = matches.value_of("city").unwrap_or_default();
    let month_arg = matches.value_of("month").unwrap_or("all");
    let day_arg = matches.value_of("day").unwrap_or("all");
    let month = MonthSelector::parse(month_arg)?;
    let day = DaySelector::parse(day_arg)?;
    let data_dir = matches
        .value_of("data-dir")
        .map(str::to_string)
        .unwrap_or_else(|| config.data.dir.clone());

    // Load and filter
    let source = CsvTripSource::new(&data_dir);
    info!("loading {} data from {}", city, source.name());
    let dataset = source.load(city)?;

    let filter = TripFilter::new(month, day);
    let filtered = filter.process(&dataset)?;
    info!(
        "{} of {} records match the selection",
        filtered.len(),
        dataset.len()
    );

    // Compute the four statistics
    let time = time_stats(&filtered)?;
    let stations = station_stats(&filtered)?;
    let duration = trip_duration_stats(&filtered)?;
    let users = user_stats(&filtered)?;

    if matches.is_present("json") {
        let report = CityReport {
            city: filtered.city().name().to_string(),
            month: month_arg.to_lowercase(),
            day: day_arg.to_lowercase(),
            row_count: filtered.len(),
            skipped_rows: filtered.skipped_rows(),
            time,
            stations,
            duration,
            users,
        };
        let rendered =
            serde_json::to_string_pretty(&report).map_err(|err| AppError::Other(err.to_string()))?;
        println!("{}", rendered);
    } else {
        print_report(&time, &stations, &duration, &users);
    }

    Ok(())
}

/// Render the four result records as text
fn print_report(time: &TimeStats, stations: &StationStats, duration: &DurationStats, users: &UserStats) {
    println!("The most common month: {} ({})", time.common_month, time.common_month_name);
    println!("The most common day of the week: {}", time.common_day);
    println!("The most common start hour: {}", time.common_hour);
    println!();
    println!("The most commonly used start station: {}", stations.common_start_station);
    println!("The most commonly used end station: {}", stations.common_end_station);
    println!(
        "The most frequent trip: {} ({} trips)",
        stations.common_trip, stations.common_trip_count
    );
    println!();
    println!("Total travel time: {}", duration.total);
    println!("Mean travel time: {}", duration.mean);
    println!();
    println!("Counts of user types:");
    for (user_type, count) in &users.user_type_counts {
        println!("  {}: {}", user_type, count);
    }
    match &users.gender_counts {
        Some(counts) => {
            println!("Counts of gender:");
            for (gender, count) in counts {
                println!("  {}: {}", gender, count);
            }
        }
        None => println!("Gender data not available for this city."),
    }
    match &users.birth_year {
        Some(years) => {
            println!("Earliest birth year: {}", years.earliest);
            println!("Most recent birth year: {}", years.most_recent);
            println!("Most common birth year: {}", years.most_common);
        }
        None => println!("Birth year data not available for this city."),
    }
}
