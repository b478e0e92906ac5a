use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single command. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Sorry no more free schedules.")]
    PoolExhausted,
    #[error("There is a schedule of {0} already.")]
    DuplicateKey(String),
    #[error("Missing city name")]
    MissingCity,
    #[error("No schedule for {0}")]
    UnknownCity(String),
    #[error("Invalid time value")]
    InvalidTime,
    #[error("Invalid capacity value")]
    InvalidCapacity,
    #[error("Sorry we cannot add more flights on this city.")]
    FlightsFull,
    #[error("Sorry there's no flight scheduled on this time.")]
    FlightNotFound,
    #[error("Sorry there's no more seats available!")]
    SeatsUnavailable,
    #[error("All the seats on this flights are empty!")]
    SeatsAlreadyFull,
}

/// Startup failures. These are the only fatal errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ERROR: Bad number of default max scedules specified.")]
    PoolSize,
    #[error("ERROR: {field} must be a positive number")]
    NotPositive { field: &'static str },
    #[error("ERROR: cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("ERROR: bad config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
