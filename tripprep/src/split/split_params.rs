use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::logging::{LogLevel, RunLogger};

pub const DEFAULT_TEST_SIZE: f64 = 0.25;

/// train/validation split parameters, read from the `make_dataset` key of
/// the yaml parameters file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitParams {
    /// proportion of rows allocated to the validation partition
    pub test_size: f64,
    /// seed for the row shuffle. when unset, the shuffle reseeds from OS
    /// entropy and two runs over the same input produce different
    /// partitions.
    pub random_state: Option<u64>,
}

impl Default for SplitParams {
    fn default() -> Self {
        SplitParams {
            test_size: DEFAULT_TEST_SIZE,
            random_state: None,
        }
    }
}

/// reads split parameters from the parameters file. an absent file is
/// recovered with the documented defaults and logged; a present but
/// malformed file is fatal.
pub fn read_params(params_file: &Path, logger: &RunLogger) -> Result<SplitParams, PipelineError> {
    if !params_file.is_file() {
        logger.log(
            "Parameters file not found, switching to default values for the train test split",
            LogLevel::Error,
        );
        return Ok(SplitParams::default());
    }
    let config = Config::builder()
        .add_source(File::from(params_file))
        .build()
        .map_err(|e| {
            let msg = format!(
                "file '{}' produced error: {e}",
                params_file.to_str().unwrap_or_default()
            );
            PipelineError::InvalidUserInput(msg)
        })?;
    let params = config.get::<SplitParams>("make_dataset").map_err(|e| {
        let msg = format!(
            "error reading 'make_dataset' key in '{}': {e}",
            params_file.to_str().unwrap_or_default()
        );
        PipelineError::InvalidUserInput(msg)
    })?;
    logger.info("Parameters file read successfully");
    Ok(params)
}
