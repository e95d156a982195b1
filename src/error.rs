//! Library error type

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BricksError>;

#[derive(Debug, Error)]
pub enum BricksError {
    #[error("dataset has no `id` column")]
    MissingIdColumn,
    #[error("row {0} has no `id` field")]
    MissingRowId(usize),
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
    #[error("unknown column id: {0}")]
    UnknownColumn(String),
    #[error("invalid colour for token `{token}`: {value}")]
    InvalidColor { token: String, value: String },
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
