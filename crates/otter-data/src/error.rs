use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading postprocessor data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open `{path}`")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("time column `{0}` not found in header")]
    MissingTimeColumn(String),

    #[error("column `{0}` not found")]
    UnknownColumn(String),

    #[error("column `{0}` appears more than once in header")]
    DuplicateColumn(String),

    #[error("line {line}, column `{column}`: cannot parse `{text}` as a number")]
    BadNumber {
        line: u64,
        column: String,
        text: String,
    },

    #[error("line {line}: time `{time}` is not finite")]
    NonFiniteTime { line: u64, time: f64 },

    #[error("line {line}: time {time} is earlier than the previous time {previous}")]
    TimeWentBackwards { line: u64, time: f64, previous: f64 },

    #[error("no data rows")]
    NoRows,

    #[error("invalid series `{column}`")]
    Series {
        column: String,
        #[source]
        source: otter_core::Error,
    },
}
