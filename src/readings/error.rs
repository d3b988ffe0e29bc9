use thiserror::Error;

/// Why an air-quality response yielded no readings for a station.
#[derive(Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("Response has no 'data' field")]
    MissingData,

    #[error("Response 'data' field is not an object")]
    DataNotAnObject,

    #[error("Response 'data' object is empty")]
    EmptyData,

    #[error("Readings of station '{0}' are not an object keyed by timestamp")]
    ReadingsNotAnObject(String),
}
