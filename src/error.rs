//! Crate-level errors
//!
//! Reading itself never fails (see [ReadStatus](crate::csv::ReadStatus)); these errors cover
//! everything around it: loading configuration, opening inputs, rejecting option values and
//! writing output.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SimCsvError {
    Config(config::ConfigError),
    Io(io::Error),
    InvalidOption(String),
    Output(String),
}

impl fmt::Display for SimCsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimCsvError::Config(e) => write!(f, "Configuration error: {}", e),
            SimCsvError::Io(e) => write!(f, "I/O error: {}", e),
            SimCsvError::InvalidOption(msg) => write!(f, "Invalid option: {}", msg),
            SimCsvError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for SimCsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimCsvError::Config(e) => Some(e),
            SimCsvError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for SimCsvError {
    fn from(err: config::ConfigError) -> Self {
        SimCsvError::Config(err)
    }
}

impl From<io::Error> for SimCsvError {
    fn from(err: io::Error) -> Self {
        SimCsvError::Io(err)
    }
}

impl From<serde_json::Error> for SimCsvError {
    fn from(err: serde_json::Error) -> Self {
        SimCsvError::Output(err.to_string())
    }
}

impl From<serde_yaml::Error> for SimCsvError {
    fn from(err: serde_yaml::Error) -> Self {
        SimCsvError::Output(err.to_string())
    }
}
