//! Error types for oxicc

use thiserror::Error;

/// Result type for oxicc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or saving a profile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The source or destination could not be read, or the model is
    /// already loaded
    #[error("failed to open: {0}")]
    FailedToOpen(String),

    /// The input is structurally not an ICC profile
    #[error("failed to parse: {0}")]
    FailedToParse(String),

    /// Any failure while writing the model back out
    #[error("failed to save: {0}")]
    FailedToSave(String),

    /// A locale could not be split into language and country codes
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    /// The requested tag or translation is absent
    #[error("no data: {0}")]
    NoData(String),
}

/// Fieldless view of [`Error`] for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FailedToOpen,
    FailedToParse,
    FailedToSave,
    InvalidLocale,
    NoData,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FailedToOpen(_) => ErrorKind::FailedToOpen,
            Error::FailedToParse(_) => ErrorKind::FailedToParse,
            Error::FailedToSave(_) => ErrorKind::FailedToSave,
            Error::InvalidLocale(_) => ErrorKind::InvalidLocale,
            Error::NoData(_) => ErrorKind::NoData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_message() {
        let err = Error::NoData("tag missing".to_string());
        assert_eq!(err.kind(), ErrorKind::NoData);
        assert_eq!(err.to_string(), "no data: tag missing");
    }
}
