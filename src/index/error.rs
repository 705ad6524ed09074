use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by index loading and search.
pub enum IndexError {
    /// Could not read an index file.
    #[error("failed to read index file '{path}': {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Metadata table failed to parse.
    #[error("failed to parse metadata '{path}': {source}")]
    MetaParse {
        /// Offending path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Vector bank file contains no data.
    #[error("index vector bank is empty: {path}")]
    EmptyBank {
        /// Offending path.
        path: PathBuf,
    },

    /// Metadata table contains no rows.
    #[error("index metadata table is empty: {path}")]
    EmptyMeta {
        /// Offending path.
        path: PathBuf,
    },

    /// Vector bank size is inconsistent with the metadata row count.
    #[error("vector bank holds {floats} floats which does not divide evenly into {rows} rows")]
    SizeIndivisible {
        /// Total f32 values in the bank.
        floats: usize,
        /// Metadata row count.
        rows: usize,
    },

    /// Vector bank byte length is not a whole number of f32 values.
    #[error("vector bank '{path}' length {len} is not a multiple of 4")]
    MisalignedBank {
        /// Offending path.
        path: PathBuf,
        /// Byte length.
        len: usize,
    },

    /// A query vector had the wrong dimensionality.
    #[error("invalid query dimension: expected {expected}, got {actual}")]
    InvalidQueryDimension {
        /// Index dimension.
        expected: usize,
        /// Query dimension.
        actual: usize,
    },
}
