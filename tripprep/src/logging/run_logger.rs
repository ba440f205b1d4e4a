use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::PipelineError;
use crate::logging::LogLevel;
use crate::util;

pub const LOG_DATE_FORMAT: &str = "%d-%m-%Y";
pub const LOG_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// run-scoped log sink for one pipeline stage. each stage constructs its
/// own logger when it starts and appends to `logs/<module>/<dd-mm-yyyy>.log`,
/// so repeated runs within a day land in a single file per module.
#[derive(Debug)]
pub struct RunLogger {
    module_name: String,
    log_path: PathBuf,
    file: File,
}

impl RunLogger {
    /// opens (or creates) today's log file for the given module under
    /// `logs_dir`, building the directory tree on demand.
    pub fn create(logs_dir: &Path, module_name: &str) -> Result<RunLogger, PipelineError> {
        let module_dir = logs_dir.join(module_name);
        util::fs::create_dirs(&module_dir)?;
        let filename = format!("{}.log", Local::now().format(LOG_DATE_FORMAT));
        let log_path = module_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                PipelineError::LogFileError(format!(
                    "unable to open '{}' for appending: {e}",
                    log_path.to_str().unwrap_or_default()
                ))
            })?;
        Ok(RunLogger {
            module_name: module_name.to_string(),
            log_path,
            file,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// appends one `"<dd-mm-yyyy HH:MM:SS> - <LEVEL> : <message>"` line.
    /// a failed append is reported on the process log and otherwise ignored
    /// so that diagnostics cannot abort a stage.
    pub fn log(&self, msg: &str, level: LogLevel) {
        let line = format!(
            "{} - {} : {}\n",
            Local::now().format(LOG_TIME_FORMAT),
            level,
            msg
        );
        if let Err(e) = (&self.file).write_all(line.as_bytes()) {
            log::warn!("{}: dropped run log line: {e}", self.module_name);
        }
    }

    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }
}
