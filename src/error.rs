//! Error types for record validation, row parsing, and file access.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A validated field of a [`Record`](crate::Record).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    FirstName,
    LastName,
    Average,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Id => "id",
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Average => "average",
        };
        f.write_str(name)
    }
}

/// Errors produced by records, collections, and their line sources/sinks.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A field failed its validator. The record it targeted is unchanged.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidArgument {
        field: Field,
        value: String,
        reason: &'static str,
    },

    /// A data line could not be split into a record.
    #[error("malformed row: {reason}")]
    MalformedRow { reason: String },

    /// A bulk adjustment that is NaN or infinite.
    #[error("invalid average adjustment {0}: must be finite")]
    InvalidDelta(f64),

    /// Reading or writing lines failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RecordError {
    pub(crate) fn invalid(field: Field, value: impl fmt::Display, reason: &'static str) -> Self {
        RecordError::InvalidArgument {
            field,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        RecordError::MalformedRow {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_names_field_and_value() {
        let err = RecordError::invalid(Field::Id, "123", "must be exactly 7 characters");
        assert_eq!(
            err.to_string(),
            r#"invalid id "123": must be exactly 7 characters"#
        );
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = RecordError::Io {
            path: PathBuf::from("missing/students.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("missing/students.csv"), "Got: {msg}");
        assert!(msg.ends_with("not found"), "Got: {msg}");
    }

    #[test]
    fn test_malformed_row_message() {
        let err = RecordError::malformed("expected 4 fields, found 3");
        assert_eq!(err.to_string(), "malformed row: expected 4 fields, found 3");
    }
}
