use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum ConverterError {
    UnsupportedItem(String),
    ParseError(String),
    ValidationError(String),
    NetworkError(String),
    IoError(String),
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterError::UnsupportedItem(msg) => write!(f, "Unsupported Item: {}", msg),
            ConverterError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
            ConverterError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ConverterError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            ConverterError::IoError(msg) => write!(f, "IO Error: {}", msg),
        }
    }
}

impl Error for ConverterError {}

impl From<reqwest::Error> for ConverterError {
    fn from(err: reqwest::Error) -> Self {
        ConverterError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for ConverterError {
    fn from(err: serde_json::Error) -> Self {
        ConverterError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ConverterError {
    fn from(err: std::io::Error) -> Self {
        ConverterError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;
