use thiserror::Error;

/// Why a station-coordinates response could not be used at all.
#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("Response has no 'data' field")]
    MissingData,

    #[error("Response 'data' field is not an array")]
    DataNotAnArray,
}

/// Why a single station record was rejected at the boundary.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Station record is not an array")]
    NotAnArray,

    #[error("Station record has no {field} at position {index}")]
    MissingField { field: &'static str, index: usize },

    #[error("Station record field {field} ('{value}') is not a valid coordinate")]
    InvalidCoordinate { field: &'static str, value: String },
}
