// Error taxonomy for the record store

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// A line could not be decoded into a record, or a record cannot be written as one line
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("serialized record contains a line break: {line:?}")]
    LineBreak { line: String },

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field} value {value:?}: {source}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// A decoded record was rejected by its validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    Rule(String),

    #[error("unsupported type: {0}")]
    UnsupportedType(String),
}

/// Errors surfaced by store operations
///
/// Line numbers are 1-based so they match what an editor shows.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{path:?} line {line}: {source}")]
    Format {
        path: PathBuf,
        line: usize,
        #[source]
        source: FormatError,
    },

    #[error("cannot write record to {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("{path:?} line {line}: {source}")]
    Validation {
        path: PathBuf,
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Validation,
    Io,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Format { .. } | StoreError::Encode { .. } => ErrorKind::Format,
            StoreError::Validation { .. } => ErrorKind::Validation,
            StoreError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = StoreError::Format {
            path: PathBuf::from("students.csv"),
            line: 3,
            source: FormatError::FieldCount { expected: 4, found: 2 },
        };
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = StoreError::Validation {
            path: PathBuf::from("students.csv"),
            line: 1,
            source: ValidationError::UnsupportedType("course".to_string()),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = StoreError::io("students.csv", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display_includes_line() {
        let err = StoreError::Format {
            path: PathBuf::from("students.csv"),
            line: 7,
            source: FormatError::FieldCount { expected: 4, found: 2 },
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("expected 4 fields, found 2"));
    }

    #[test]
    fn test_unsupported_type_display() {
        assert_eq!(
            ValidationError::UnsupportedType("course".to_string()).to_string(),
            "unsupported type: course"
        );
    }
}
