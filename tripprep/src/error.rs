use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("Failed to extract archive '{path}': {message}")]
    ArchiveError { path: PathBuf, message: String },
    #[error("Error writing to csv: {0}")]
    CsvWriteError(String),
    #[error("Column '{0}' not found in table")]
    ColumnNotFoundError(String),
    #[error("Failed to parse '{value}' as a timestamp: {message}")]
    TimestampParseError { value: String, message: String },
    #[error("Failed to parse '{value}' in column '{column}' as a number")]
    NumericParseError { column: String, value: String },
    #[error("Outlier target values not removed from data: max {max} exceeds {bound} minutes")]
    OutlierBoundViolation { max: f64, bound: f64 },
    #[error("Failed to render plot: {0}")]
    PlotRenderError(String),
    #[error("Failed to write log file: {0}")]
    LogFileError(String),
}
