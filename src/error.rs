
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeInfoError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Parse error: {message} ('{token}')")]
    Parse { message: String, token: String },
    #[error("Cannot compute seconds without a reference time: '{token}'")]
    Indeterminate { token: String },
    #[error("Time out of range: {0}")]
    OutOfRange(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TimeInfoError {
    pub(crate) fn parse(message: &str, token: &str) -> Self {
        Self::Parse { message: message.to_string(), token: token.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, TimeInfoError>;

// Helper conversions
impl From<config::ConfigError> for TimeInfoError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for TimeInfoError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}
