use crate::error::PipelineError;
use crate::extract::extract_zipfile;
use crate::layout::DataLayout;
use crate::logging::RunLogger;
use crate::util;

pub const MODULE_NAME: &str = "extract_dataset";

/// unpacks the train and test archives into the extracted data directory.
pub fn run(layout: &DataLayout) -> Result<(), PipelineError> {
    let logger = RunLogger::create(&layout.logs_dir, MODULE_NAME)?;
    util::fs::create_dirs(&layout.extracted_dir)?;
    extract_zipfile(
        &layout.zipped_dir.join("train.zip"),
        &layout.extracted_dir,
        &logger,
    )?;
    extract_zipfile(
        &layout.zipped_dir.join("test.zip"),
        &layout.extracted_dir,
        &logger,
    )?;
    Ok(())
}
