//! Custom error types for the finance tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// The main error type for finance tracker operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup errors
    #[error("Backup error: {0}")]
    Backup(String),
}

impl FinanceError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for macros
    pub fn macro_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Macro",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring payments
    pub fn recurring_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring payment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for credits
    pub fn credit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Credit",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finance tracker operations
pub type FinanceResult<T> = Result<T, FinanceError>;

/// A single problem found while decoding an imported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportIssue {
    /// JSON path of the offending value, e.g. `credits[2].paid`
    pub path: String,
    pub message: String,
}

impl ImportIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors raised at the import boundary. The store is never modified when one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The payload is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(String),

    /// The payload parsed, but its top level is not an object
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    /// One or more collections failed to decode or validate
    #[error("{} invalid field(s): {}", .0.len(), join_issues(.0))]
    Invalid(Vec<ImportIssue>),
}

impl ImportError {
    /// The individual issues, empty for parse and shape errors
    pub fn issues(&self) -> &[ImportIssue] {
        match self {
            Self::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[ImportIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinanceError::account_not_found("Bank");
        assert_eq!(err.to_string(), "Account not found: Bank");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_import_error_lists_issues() {
        let err = ImportError::Invalid(vec![
            ImportIssue::new("credits[0].paid", "must not be negative"),
            ImportIssue::new("accounts", "expected an array"),
        ]);
        assert_eq!(
            err.to_string(),
            "2 invalid field(s): credits[0].paid: must not be negative; accounts: expected an array"
        );
        assert_eq!(err.issues().len(), 2);

        let wrapped: FinanceError = err.into();
        assert!(wrapped.to_string().starts_with("Import error: 2 invalid field(s)"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let finance_err: FinanceError = io_err.into();
        assert!(matches!(finance_err, FinanceError::Io(_)));
    }
}
