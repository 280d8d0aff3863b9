//! Error types for data loading.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;

/// Errors while loading a content directory. All fatal: a missing or
/// malformed data file aborts startup.
#[derive(Debug, Error)]
pub enum DataError {
    /// A data file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A data file was not valid JSON for its expected shape.
    #[error("cannot parse {path}: {source}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A file's content is structurally invalid beyond JSON syntax.
    #[error("invalid data in {path}: {message}")]
    Invalid {
        /// The file involved.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },
}
