/*!
error module defines the error types used in bgpkit-vantage.
*/
use oneio::OneIoError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning a set of route dumps.
///
/// Every variant is fatal for the scan that produced it: no partial statistic or discovery result
/// is returned alongside an error.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An empty list of files (or a source map without any file) was handed to a scan.
    ///
    /// ## Occurs during:
    ///  - Vantage point discovery
    ///  - Vantage point stat building
    #[error("no input files provided")]
    NoInputFiles,
    /// A required column is absent from the header of the representative file.
    ///
    /// ## Occurs during:
    ///  - Resolving column positions from a header line
    #[error("column '{column}' not found in the header")]
    ColumnNotFound { column: String },
    /// The dump could not be opened.
    #[error("error opening file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: OneIoError,
    },
    /// Reading from an opened dump failed, including lines that are not valid UTF-8.
    #[error("error reading file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The path cannot be represented as UTF-8 and therefore cannot be handed to the reader.
    #[error("path {0:?} is not valid UTF-8")]
    InvalidPath(PathBuf),
    /// A data record could not be decoded.
    ///
    /// `line` is 1-based and counts the header line.
    #[error("{path}:{line}: {source}")]
    Record {
        path: String,
        line: u64,
        #[source]
        source: RecordError,
    },
}

/// Errors decoding a single tab-separated record. Location is attached by the reader as
/// [ScanError::Record].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The row does not reach the position resolved for `column`.
    #[error("column '{column}' expected at index {index}, but the record has {found} fields")]
    MissingField {
        column: &'static str,
        index: usize,
        found: usize,
    },
    /// A numeric field does not parse as an integer.
    #[error("cannot parse '{value}' in column '{column}' as an integer")]
    InvalidInteger { column: &'static str, value: String },
}
