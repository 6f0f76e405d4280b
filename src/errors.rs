use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KharchaError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Amount must be a positive number")]
    NonPositiveAmount,
    #[error("Date {0} is in the future")]
    FutureDate(NaiveDate),
    #[error("No expense at index {index} (only {len} recorded)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid value: {0}")]
    Parse(String),
    #[error("Expense entry aborted")]
    Aborted,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] toml::de::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}
