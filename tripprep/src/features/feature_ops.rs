use std::path::Path;

use chrono::{Datelike, NaiveDateTime, Timelike};
use itertools::Itertools;

use crate::error::PipelineError;
use crate::features::target_plot::plot_target;
use crate::logging::RunLogger;
use crate::table::TripTable;

pub const TARGET_COLUMN: &str = "trip_duration";
/// trips longer than this many minutes are treated as outliers
pub const MAX_TRIP_MINUTES: f64 = 200.0;

const ID_COLUMN: &str = "id";
const FLAG_COLUMN: &str = "store_and_fwd_flag";
const PICKUP_DATETIME_COLUMN: &str = "pickup_datetime";
const DROPOFF_DATETIME_COLUMN: &str = "dropoff_datetime";
const PASSENGER_COUNT_COLUMN: &str = "passenger_count";
const SECONDS_PER_MINUTE: f64 = 60.0;

/// removes identifier and administrative columns. the drop-off timestamp is
/// only present in train/val data, so it is dropped conditionally.
pub fn drop_columns(table: &TripTable, logger: &RunLogger) -> Result<TripTable, PipelineError> {
    logger.info(&format!(
        "Columns in data before removal are {:?}",
        table.columns()
    ));
    let columns_to_drop: Vec<&str> = if table.has_column(DROPOFF_DATETIME_COLUMN) {
        vec![ID_COLUMN, DROPOFF_DATETIME_COLUMN, FLAG_COLUMN]
    } else {
        vec![ID_COLUMN, FLAG_COLUMN]
    };
    let after_removal = table.drop_columns(&columns_to_drop)?;
    logger.info(&format!(
        "Columns in data after removal are {:?}",
        after_removal.columns()
    ));
    Ok(after_removal)
}

/// keeps only rows whose passenger count is an integer between 1 and 6.
pub fn remove_passengers(table: &TripTable, logger: &RunLogger) -> Result<TripTable, PipelineError> {
    let passengers_to_include: Vec<i64> = (1..=6).collect();
    let idx = table.column_index(PASSENGER_COUNT_COLUMN)?;
    let filtered = table.retain_rows(|row| {
        row[idx]
            .trim()
            .parse::<i64>()
            .map(|count| passengers_to_include.contains(&count))
            .unwrap_or(false)
    });
    let unique_passengers: Vec<i64> = filtered
        .column_values(PASSENGER_COUNT_COLUMN)?
        .iter()
        .filter_map(|v| v.trim().parse::<i64>().ok())
        .sorted()
        .dedup()
        .collect();
    logger.info(&format!(
        "The unique passenger list is {unique_passengers:?} verify = {}",
        unique_passengers == passengers_to_include
    ));
    Ok(filtered)
}

fn parse_pickup_timestamp(value: &str) -> Result<NaiveDateTime, PipelineError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| PipelineError::TimestampParseError {
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// replaces the pickup timestamp with five derived calendar columns:
/// hour, day of month, month, weekday (0 = Monday) and a weekend flag.
pub fn make_datetime_features(
    table: &TripTable,
    logger: &RunLogger,
) -> Result<TripTable, PipelineError> {
    let (o_rows, o_cols) = table.shape();
    let timestamps: Vec<NaiveDateTime> = table
        .column_values(PICKUP_DATETIME_COLUMN)?
        .iter()
        .map(|v| parse_pickup_timestamp(v))
        .collect::<Result<_, _>>()?;
    logger.info("pickup_datetime converted to a timestamp column");

    let weekdays: Vec<u32> = timestamps
        .iter()
        .map(|t| t.weekday().num_days_from_monday())
        .collect();
    let new_table = table
        .with_column(
            "pickup_hour",
            timestamps.iter().map(|t| t.hour().to_string()).collect(),
        )?
        .with_column(
            "pickup_date",
            timestamps.iter().map(|t| t.day().to_string()).collect(),
        )?
        .with_column(
            "pickup_month",
            timestamps.iter().map(|t| t.month().to_string()).collect(),
        )?
        .with_column(
            "pickup_day",
            weekdays.iter().map(|d| d.to_string()).collect(),
        )?
        .with_column(
            "is_weekend",
            weekdays
                .iter()
                .map(|d| i32::from(*d >= 5).to_string())
                .collect(),
        )?
        .drop_columns(&[PICKUP_DATETIME_COLUMN])?;

    let (n_rows, n_cols) = new_table.shape();
    logger.info(&format!(
        "The number of columns increased by 4 verify = {}",
        n_cols == o_cols + 5 - 1
    ));
    logger.info(&format!(
        "The number of rows remained the same verify = {}",
        o_rows == n_rows
    ));
    Ok(new_table)
}

fn parse_target_value(column: &str, value: &str) -> Result<f64, PipelineError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::NumericParseError {
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// rescales the target from seconds to minutes.
pub fn convert_target_to_minutes(
    table: &TripTable,
    target_column: &str,
    logger: &RunLogger,
) -> Result<TripTable, PipelineError> {
    let converted = table.map_column(target_column, |value| {
        let seconds = parse_target_value(target_column, value)?;
        Ok((seconds / SECONDS_PER_MINUTE).to_string())
    })?;
    logger.info("Target column converted from seconds to minutes");
    Ok(converted)
}

/// discards rows whose target exceeds the outlier bound, then re-checks the
/// bound on the surviving rows. a surviving value above the bound is a
/// domain error, never tolerated.
pub fn drop_above_two_hundred_minutes(
    table: &TripTable,
    target_column: &str,
    logger: &RunLogger,
) -> Result<TripTable, PipelineError> {
    let idx = table.column_index(target_column)?;
    let new_table = table.retain_rows(|row| {
        row[idx]
            .trim()
            .parse::<f64>()
            .map(|minutes| minutes <= MAX_TRIP_MINUTES)
            .unwrap_or(false)
    });

    let max_value = new_table
        .column_values(target_column)?
        .iter()
        .filter_map(|v| v.trim().parse::<f64>().ok())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));
    match max_value {
        Some(max) => logger.info(&format!(
            "The max value in the target column after transformation is {max}"
        )),
        None => logger.info("The target column is empty after transformation"),
    }

    match max_value {
        Some(max) if max > MAX_TRIP_MINUTES => Err(PipelineError::OutlierBoundViolation {
            max,
            bound: MAX_TRIP_MINUTES,
        }),
        _ => Ok(new_table),
    }
}

/// column drop, passenger filter and datetime expansion, in that order.
pub fn input_modifications(
    table: &TripTable,
    logger: &RunLogger,
) -> Result<TripTable, PipelineError> {
    let after_drop = drop_columns(table, logger)?;
    let after_passengers = remove_passengers(&after_drop, logger)?;
    let with_datetime_features = make_datetime_features(&after_passengers, logger)?;
    logger.info("Modifications with the input features are complete");
    Ok(with_datetime_features)
}

/// target rescale, outlier removal and the diagnostic distribution plot.
pub fn target_modifications(
    table: &TripTable,
    plot_path: &Path,
    logger: &RunLogger,
) -> Result<TripTable, PipelineError> {
    let minutes_table = convert_target_to_minutes(table, TARGET_COLUMN, logger)?;
    let bounded_table = drop_above_two_hundred_minutes(&minutes_table, TARGET_COLUMN, logger)?;
    plot_target(&bounded_table, TARGET_COLUMN, plot_path, logger)?;
    logger.info("Modifications with the target column are complete");
    Ok(bounded_table)
}

/// applies the full feature pipeline to a loaded table. target handling only
/// applies to the train and validation files; test data carries no duration
/// column.
pub fn modify(
    table: &TripTable,
    filename: &str,
    plot_path: &Path,
    logger: &RunLogger,
) -> Result<TripTable, PipelineError> {
    let modified = input_modifications(table, logger)?;
    if filename == "train.csv" || filename == "val.csv" {
        target_modifications(&modified, plot_path, logger)
    } else {
        Ok(modified)
    }
}
