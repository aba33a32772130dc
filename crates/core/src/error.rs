use thiserror::Error;

/// Errors raised by core validation rules.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid year: {0:?}")]
    InvalidYear(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Parses a user- or file-supplied year, tolerating surrounding whitespace.
pub fn parse_year(raw: &str) -> Result<i32> {
    raw.trim().parse().map_err(|_| CoreError::InvalidYear(raw.to_owned()))
}
