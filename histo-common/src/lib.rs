pub mod config;
pub use config::{Config, DisplayConfig, HistogramConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{input}:{line}: not a number: {token:?}")]
    InvalidValue {
        input: String,
        line: usize,
        token: String,
    },
    #[error("no input files match: {0}")]
    NoInput(String),
    #[error("invalid glob pattern {pattern:?}: {reason}")]
    BadPattern { pattern: String, reason: String },
    #[error("number of bins must be positive, got {0}")]
    InvalidBinCount(i64),
    #[error("too many bins: {requested} (at most {max})")]
    TooManyBins { requested: i64, max: usize },
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HistoError>;
