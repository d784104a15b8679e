//! Error types for the patungan bill splitter
//!
//! This module defines all errors that can occur outside the engine.
//! The engine itself is total: it signals "nothing to split" with `None`
//! and never errors. Everything else (file I/O, session schema problems,
//! numeric parsing, report writing) surfaces as a [`SplitError`].
//!
//! # Error Categories
//!
//! - **File I/O**: file not found, permission denied, etc.
//! - **Session schema**: malformed JSON, missing fields, bad type tags
//! - **Validation**: negative amounts, zero quantities, dangling ids
//! - **Numeric parsing**: unparseable localized amount strings
//! - **Report output**: CSV/JSON write failures

use thiserror::Error;

/// Main error type for the bill splitter
///
/// Each variant carries enough context to produce a user-visible message
/// on the CLI. Session problems are detected at the import boundary and
/// never partially applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// File not found at the specified path
    ///
    /// Fatal: nothing can be loaded.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// The session JSON does not match the expected schema
    ///
    /// Missing required fields, wrong shapes, or unknown `type` tags.
    /// The import is rejected as a whole.
    #[error("Invalid session file{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Schema {
        /// Line in the JSON document where parsing failed (if known)
        line: Option<usize>,
        /// Description of the schema violation
        message: String,
    },

    /// A structurally valid session failed value validation
    ///
    /// Negative amounts, zero quantities, non-finite numbers, or ids
    /// that reference no session participant.
    #[error("Invalid session: {field}: {message}")]
    Validation {
        /// The offending field, dotted-path style (e.g. `items[2].price`)
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// A localized amount string could not be parsed
    #[error("Invalid amount '{value}'")]
    InvalidAmount {
        /// The string that failed to parse
        value: String,
    },

    /// The payer requested on the command line is not in the session
    #[error("Payer '{payer}' does not match any participant id or name")]
    UnknownPayer {
        /// The id or name that was requested
        payer: String,
    },

    /// Report rendering failed
    #[error("Failed to write report: {message}")]
    Report {
        /// Description of the write failure
        message: String,
    },
}

// Conversion from io::Error to SplitError
impl From<std::io::Error> for SplitError {
    fn from(error: std::io::Error) -> Self {
        SplitError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to SplitError
impl From<serde_json::Error> for SplitError {
    fn from(error: serde_json::Error) -> Self {
        let line = error.line();
        SplitError::Schema {
            line: (line > 0).then_some(line),
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SplitError
impl From<csv::Error> for SplitError {
    fn from(error: csv::Error) -> Self {
        SplitError::Report {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SplitError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        SplitError::FileNotFound { path: path.into() }
    }

    /// Create a Validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SplitError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(value: impl Into<String>) -> Self {
        SplitError::InvalidAmount {
            value: value.into(),
        }
    }

    /// Create an UnknownPayer error
    pub fn unknown_payer(payer: impl Into<String>) -> Self {
        SplitError::UnknownPayer {
            payer: payer.into(),
        }
    }

    /// Create a Report error
    pub fn report(message: impl Into<String>) -> Self {
        SplitError::Report {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        SplitError::file_not_found("session.json"),
        "File not found: session.json"
    )]
    #[case::io(
        SplitError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::schema_with_line(
        SplitError::Schema { line: Some(7), message: "missing field `items`".to_string() },
        "Invalid session file at line 7: missing field `items`"
    )]
    #[case::schema_without_line(
        SplitError::Schema { line: None, message: "unexpected end of input".to_string() },
        "Invalid session file: unexpected end of input"
    )]
    #[case::validation(
        SplitError::validation("items[2].price", "must be non-negative"),
        "Invalid session: items[2].price: must be non-negative"
    )]
    #[case::invalid_amount(
        SplitError::invalid_amount("12,34,5"),
        "Invalid amount '12,34,5'"
    )]
    #[case::unknown_payer(
        SplitError::unknown_payer("Dewi"),
        "Payer 'Dewi' does not match any participant id or name"
    )]
    fn test_error_display(#[case] error: SplitError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: SplitError = io_error.into();
        assert!(matches!(error, SplitError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_serde_json_error_conversion_keeps_line() {
        let json_error = serde_json::from_str::<serde_json::Value>("{\n  bad\n}").unwrap_err();
        let error: SplitError = json_error.into();
        match error {
            SplitError::Schema { line, .. } => assert_eq!(line, Some(2)),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
