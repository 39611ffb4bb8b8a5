use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read pressure history file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Parsing error reading CSV data from '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Column {column} requested but '{path}' only has {width} columns")]
    ColumnOutOfRange {
        path: PathBuf,
        column: usize,
        width: usize,
    },

    #[error("Failed Polars column operation for '{path}': {source}")]
    ColumnOperation {
        path: PathBuf,
        source: PolarsError,
    },

    #[error("Missing timestamp in row {row} of '{path}'")]
    MissingTimestamp { path: PathBuf, row: usize },

    #[error("Could not parse timestamp '{value}' in row {row} with template '{template}'")]
    TimestampParse {
        row: usize,
        value: String,
        template: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
