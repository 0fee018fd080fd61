use thiserror::Error;

#[derive(Error, Debug)]
pub enum HnError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON response: {message}\nActual response: {body}")]
    JsonError { message: String, body: String },

    #[error("{message}\nResponse body: {body}")]
    UnexpectedStatus { message: String, body: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Schema validation failed for '{field}': {reason}")]
    SchemaError { field: String, reason: String },

    #[error("Scenario failed: {message}")]
    ScenarioError { message: String },
}

pub type Result<T> = std::result::Result<T, HnError>;
