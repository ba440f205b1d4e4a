use crate::error::PipelineError;
use crate::layout::DataLayout;
use crate::logging::RunLogger;
use crate::split::{read_params, train_val_split};
use crate::table::TripTable;
use crate::util;

pub const MODULE_NAME: &str = "make_dataset";

/// loads an extracted csv, partitions it and saves the interim train and
/// validation files.
pub fn run(layout: &DataLayout, filename: &str) -> Result<(), PipelineError> {
    let logger = RunLogger::create(&layout.logs_dir, MODULE_NAME)?;

    let raw_data_path = layout.extracted_dir.join(filename);
    let raw_data = TripTable::read_csv(&raw_data_path)?;
    let (rows, columns) = raw_data.shape();
    logger.info(&format!(
        "Read {filename} data having {rows} rows and {columns} columns."
    ));

    let params = read_params(&layout.params_file, &logger)?;
    let (train_data, val_data) =
        train_val_split(&raw_data, params.test_size, params.random_state, &logger)?;

    util::fs::create_dirs(&layout.interim_dir)?;
    save_split(&train_data, "train.csv", layout, &logger)?;
    save_split(&val_data, "val.csv", layout, &logger)?;
    Ok(())
}

fn save_split(
    data: &TripTable,
    filename: &str,
    layout: &DataLayout,
    logger: &RunLogger,
) -> Result<(), PipelineError> {
    data.write_csv(&layout.interim_dir.join(filename), filename)?;
    logger.info(&format!(
        "{filename} data saved successfully to the output folder"
    ));
    Ok(())
}
