use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {message}")]
    Api { message: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;

/// Why a single raw company record could not become a `LicenseRecord`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("record is not a JSON object (found {0})")]
    NotAnObject(&'static str),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Why the company list could not be located inside a provider envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionFailure {
    #[error("envelope is {0}, expected an object")]
    NotAnObject(&'static str),

    #[error("envelope has no \"{0}\" key")]
    MissingKey(&'static str),

    #[error("\"{key}\" is {found}, expected an array")]
    NotAList {
        key: &'static str,
        found: &'static str,
    },
}
