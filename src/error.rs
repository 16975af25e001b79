use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("failed to parse data file: {0}")]
    ParseError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("no usable fight records after validation")]
    EmptyTable,

    #[error("no recorded bouts for fighter: {0}")]
    UnknownFighter(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("failed to encode export: {0}")]
    ExportError(String),
}
