mod level;
mod run_logger;

pub use level::LogLevel;
pub use run_logger::RunLogger;
