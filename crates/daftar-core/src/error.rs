//! Error types for daftar-core
//!
//! Error codes, severities and serializable details for the ledger core.
//! Calendar failures pass through unchanged inside [`CoreError::Calendar`].

use daftar_calendar::CalendarError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed date string
    InvalidDate,
    /// Well-formed date naming no real day
    OutOfRange,
    /// Account id not present in the store
    UnknownAccount,
    /// Transaction not found
    TransactionNotFound,
    /// Check not found
    CheckNotFound,
    /// Record rejected by the store
    InvalidRecord,
    /// Amounts summed past the representable range
    AmountOverflow,
    /// Request parameters could not be read
    InvalidQuery,
    /// Ledger file could not be parsed
    ParseError,
    /// IO error
    IoError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::OutOfRange => write!(f, "OUT_OF_RANGE"),
            ErrorCode::UnknownAccount => write!(f, "UNKNOWN_ACCOUNT"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::CheckNotFound => write!(f, "CHECK_NOT_FOUND"),
            ErrorCode::InvalidRecord => write!(f, "INVALID_RECORD"),
            ErrorCode::AmountOverflow => write!(f, "AMOUNT_OVERFLOW"),
            ErrorCode::InvalidQuery => write!(f, "INVALID_QUERY"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for daftar-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Unknown account: {id}")]
    UnknownAccount { id: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Check not found: {id}")]
    CheckNotFound { id: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Amount overflow in {context}")]
    AmountOverflow { context: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Calendar(CalendarError::InvalidDate { .. }) => ErrorCode::InvalidDate,
            CoreError::Calendar(CalendarError::OutOfRange { .. }) => ErrorCode::OutOfRange,
            CoreError::UnknownAccount { .. } => ErrorCode::UnknownAccount,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::CheckNotFound { .. } => ErrorCode::CheckNotFound,
            CoreError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            CoreError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
            CoreError::ParseError { .. } => ErrorCode::ParseError,
            CoreError::IoError(_) => ErrorCode::IoError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Calendar(_) => ErrorSeverity::Warning,
            CoreError::UnknownAccount { .. } => ErrorSeverity::Info,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::CheckNotFound { .. } => ErrorSeverity::Info,
            CoreError::InvalidRecord { .. } => ErrorSeverity::Warning,
            CoreError::AmountOverflow { .. } => ErrorSeverity::Error,
            CoreError::ParseError { .. } => ErrorSeverity::Error,
            CoreError::IoError(_) => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Calendar(CalendarError::InvalidDate { input, .. }) => {
                details = details
                    .with_detail(serde_json::json!({ "input": input }))
                    .with_suggestion("Write dates as YYYY/MM/DD in the Jalali calendar.".to_string());
            }
            CoreError::Calendar(CalendarError::OutOfRange { .. }) => {
                details = details.with_suggestion(
                    "Months 1-6 have 31 days, 7-11 have 30, Esfand has 29 or 30 in leap years."
                        .to_string(),
                );
            }
            CoreError::UnknownAccount { .. } => {
                details = details.with_suggestion(
                    "Use the /api/accounts endpoint to list all accounts.".to_string(),
                );
            }
            CoreError::AmountOverflow { context } => {
                details = details
                    .with_detail(serde_json::json!({ "context": context }))
                    .with_suggestion("Check the ledger for mistyped amounts or balances.".to_string());
            }
            CoreError::ParseError { message } => {
                details = details.with_detail(serde_json::json!({ "parse_message": message }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Error => log::error!(
                target: "daftar::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "daftar::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Info => log::info!(
                target: "daftar::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidDate.to_string(), "INVALID_DATE");
        assert_eq!(ErrorCode::UnknownAccount.to_string(), "UNKNOWN_ACCOUNT");
        assert_eq!(
            serde_json::to_string(&ErrorCode::OutOfRange).unwrap(),
            "\"OUT_OF_RANGE\""
        );
    }

    #[test]
    fn test_calendar_errors_keep_their_kind() {
        let error: CoreError = CalendarError::InvalidDate {
            input: "1403-08-15".to_string(),
            reason: "expected 3 '/'-separated fields, found 1".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::InvalidDate);

        let error: CoreError = CalendarError::OutOfRange {
            message: "1404/12 has 29 days, got day 30".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::OutOfRange);
        assert!(error.to_string().contains("1404/12"));
    }

    #[test]
    fn test_error_details_unknown_account() {
        let error = CoreError::UnknownAccount { id: "acc-9".to_string() };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::UnknownAccount);
        assert!(details.message.contains("acc-9"));
        assert!(!details.suggestions.is_empty());
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_error_details_invalid_date_carries_input() {
        let error = CoreError::from(CalendarError::InvalidDate {
            input: "abc".to_string(),
            reason: "fields must be numeric".to_string(),
        });
        let details = error.to_details();
        assert_eq!(details.details, Some(serde_json::json!({ "input": "abc" })));
    }

    #[test]
    fn test_amount_overflow_details() {
        let error = CoreError::AmountOverflow { context: "acc-1".to_string() };
        assert_eq!(error.code(), ErrorCode::AmountOverflow);
        assert_eq!(error.severity(), ErrorSeverity::Error);
        let details = error.to_details();
        assert_eq!(details.details, Some(serde_json::json!({ "context": "acc-1" })));
        assert_eq!(serde_json::to_value(&details.code).unwrap(), "AMOUNT_OVERFLOW");
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("dashboard_stats").with_data("now", serde_json::json!("1403/08/15"));
        assert_eq!(context.operation, "dashboard_stats");
        assert_eq!(context.data["now"], "1403/08/15");
    }
}
