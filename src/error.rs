use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loader errors – fatal to a session
// ---------------------------------------------------------------------------

/// Anything that stops a city's trip log from becoming a [`Dataset`].
///
/// [`Dataset`]: crate::data::model::Dataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no trip data for {city} in {} (looked for {stem}.csv, .parquet, .json)", dir.display())]
    SourceNotFound {
        city: String,
        dir: PathBuf,
        stem: String,
    },

    #[error("{}: required column '{column}' is missing", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("row {row}: cannot parse start time '{value}'")]
    MalformedTimestamp { row: usize, value: String },

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    MalformedField {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{}: expected a top-level JSON array of trip records", path.display())]
    NotRecordArray { path: PathBuf },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON")]
    Json(#[from] serde_json::Error),

    #[error("reading parquet")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("decoding arrow batch")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Selection errors – out-of-range session inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown city '{0}'")]
    UnknownCity(String),

    #[error("unknown month '{0}'")]
    UnknownMonth(String),

    #[error("unknown day of week '{0}'")]
    UnknownDay(String),
}
