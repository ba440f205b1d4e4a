use std::fmt::{Display, Formatter};

/// severity attached to each run log line. a single enum consumed by
/// [`crate::logging::RunLogger::log`] rather than a stringly-typed level
/// argument dispatched per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Exception,
    Critical,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Exception => "EXCEPTION",
            LogLevel::Critical => "CRITICAL",
        };
        write!(f, "{name}")
    }
}
