use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    File(#[from] io::Error),
    #[error("config document error: {0}")]
    Document(#[from] toml::de::Error),
    #[error("logger setup error: {0}")]
    Logger(String),
}
impl From<log::SetLoggerError> for ConfigError {
    fn from(e: log::SetLoggerError) -> Self {
        ConfigError::Logger(e.to_string())
    }
}

/// Errors raised while shaping a forecast document into hourly records
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("missing field in forecast document: {0}")]
    MissingField(String),
    #[error("hourly field '{field}' has {actual} values, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("unexpected value in column '{column}': {value}")]
    InvalidValue {
        column: String,
        value: String,
    },
    #[error("unable to parse time '{value}': {source}")]
    TimeParse {
        value: String,
        source: chrono::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no data to plot")]
    EmptyData,
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("unable to open chart viewer: {0}")]
    Viewer(#[from] io::Error),
}
