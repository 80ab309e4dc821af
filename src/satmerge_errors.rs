use thiserror::Error;

use crate::mat::MatParseError;

#[derive(Error, Debug)]
pub enum SatmergeError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV table error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid MAT-file: {0}")]
    MatFileError(#[from] MatParseError),

    #[error("Archive not found at: {0}")]
    ArchiveNotFound(String),

    #[error("Required table '{0}' not found")]
    MissingTable(String),

    #[error("Position slice tables disagree on shape: {0}")]
    MismatchedSliceShapes(String),

    #[error("Time table has {0} row(s); the time-value convention needs at least two")]
    MalformedTimeTable(usize),
}
