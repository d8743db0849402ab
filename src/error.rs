use std::fmt;

/// Custom error type for the redirect logger
#[derive(Debug)]
pub enum AppError {
    /// IO error
    Io(std::io::Error),
    /// CSV encode/decode error
    Csv(csv::Error),
    /// Geolocation lookup failure
    Geo(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "IO error: {}", err),
            AppError::Csv(err) => write!(f, "CSV error: {}", err),
            AppError::Geo(msg) => write!(f, "Geolocation error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
