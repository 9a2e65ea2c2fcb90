//! Error types of the library.
//!
//! Errors are split into two channels that are never mixed:
//!
//! - [`SedOperationError`] is returned by setters and container operations on
//!   objects that already exist. Every variant maps to a stable integer code so
//!   callers can check and continue.
//! - [`SedConstructorError`] is returned when an object cannot be created at all,
//!   for example with a level/version combination that does not exist.
//!
//! Problems found while parsing a document are neither of these. They are
//! collected in the [`SedErrorLog`](crate::errorlog::SedErrorLog) of the document.
//! [`SedIoError`] only covers failures of the underlying reader or writer.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Result of a setter or container operation.
pub type SedResult = Result<(), SedOperationError>;

/// Code reported for a successful operation.
pub const OPERATION_SUCCESS: i32 = 0;

/// Failures of operations on existing objects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SedOperationError {
    /// An index is outside the bounds of a list
    #[error("Index exceeds the size of the list")]
    IndexExceedsSize,

    /// The attribute is not allowed for this level/version of the element
    #[error("Attribute is not allowed on this element in this level/version")]
    UnexpectedAttribute,

    /// Generic failure of an operation
    #[error("Operation failed")]
    OperationFailed,

    /// The value is not valid for the attribute
    #[error("Invalid attribute value")]
    InvalidAttributeValue,

    /// The object is incomplete or of the wrong kind for this operation
    #[error("Invalid object")]
    InvalidObject,

    /// An object with the same identifier already exists
    #[error("Duplicate object identifier")]
    DuplicateObjectId,

    /// The object belongs to a different SED-ML level
    #[error("Level mismatch")]
    LevelMismatch,

    /// The object belongs to a different SED-ML version
    #[error("Version mismatch")]
    VersionMismatch,

    /// The object declares different namespaces
    #[error("Namespaces mismatch")]
    NamespacesMismatch,
}

impl SedOperationError {
    /// Returns the integer code of this failure.
    pub fn code(&self) -> i32 {
        match self {
            SedOperationError::IndexExceedsSize => -1,
            SedOperationError::UnexpectedAttribute => -2,
            SedOperationError::OperationFailed => -3,
            SedOperationError::InvalidAttributeValue => -4,
            SedOperationError::InvalidObject => -5,
            SedOperationError::DuplicateObjectId => -6,
            SedOperationError::LevelMismatch => -7,
            SedOperationError::VersionMismatch => -8,
            SedOperationError::NamespacesMismatch => -10,
        }
    }

    /// Looks up the failure for an integer code. Returns `None` for the
    /// success code and for unknown codes.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(SedOperationError::IndexExceedsSize),
            -2 => Some(SedOperationError::UnexpectedAttribute),
            -3 => Some(SedOperationError::OperationFailed),
            -4 => Some(SedOperationError::InvalidAttributeValue),
            -5 => Some(SedOperationError::InvalidObject),
            -6 => Some(SedOperationError::DuplicateObjectId),
            -7 => Some(SedOperationError::LevelMismatch),
            -8 => Some(SedOperationError::VersionMismatch),
            -10 => Some(SedOperationError::NamespacesMismatch),
            _ => None,
        }
    }
}

/// Converts an operation result into its integer code.
pub fn result_code(result: &SedResult) -> i32 {
    match result {
        Ok(()) => OPERATION_SUCCESS,
        Err(err) => err.code(),
    }
}

/// Errors raised when an object cannot be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SedConstructorError {
    /// The level/version pair is not a SED-ML release
    #[error("Level {level} Version {version} is not a valid SED-ML level/version combination")]
    InvalidLevelVersion { level: u32, version: u32 },

    /// The namespace URI does not identify a SED-ML release
    #[error("'{0}' is not a SED-ML namespace")]
    UnknownNamespace(String),
}

/// Failures of the reader or writer themselves.
#[derive(Debug, Error)]
pub enum SedIoError {
    /// Error when the file cannot be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the XML writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error when the produced output is not UTF-8
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        let all = [
            SedOperationError::IndexExceedsSize,
            SedOperationError::UnexpectedAttribute,
            SedOperationError::OperationFailed,
            SedOperationError::InvalidAttributeValue,
            SedOperationError::InvalidObject,
            SedOperationError::DuplicateObjectId,
            SedOperationError::LevelMismatch,
            SedOperationError::VersionMismatch,
            SedOperationError::NamespacesMismatch,
        ];

        for err in all {
            assert_eq!(SedOperationError::from_code(err.code()), Some(err));
        }
        assert_eq!(SedOperationError::from_code(0), None);
        assert_eq!(SedOperationError::from_code(-9), None);
    }

    #[test]
    fn test_result_code() {
        assert_eq!(result_code(&Ok(())), 0);
        assert_eq!(result_code(&Err(SedOperationError::InvalidObject)), -5);
    }
}
