//! Error types for cashweb-core
//!
//! Aggregation itself never fails. Errors come from loading the collections
//! and from turning request parameters into a report request.

use cashweb_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Collections not loaded yet
    NotLoaded,
    /// Store could not be read
    StoreError,
    /// A stored record could not be interpreted
    InvalidRecord,
    /// Request parameter rejected
    InvalidParameter,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
            ErrorCode::InvalidRecord => write!(f, "INVALID_RECORD"),
            ErrorCode::InvalidParameter => write!(f, "INVALID_PARAMETER"),
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

/// Main error type for cashweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Collections not loaded")]
    NotLoaded,

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

impl CoreError {
    /// Shorthand for a rejected request parameter
    pub fn invalid_parameter(name: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::StoreError { .. } => ErrorCode::StoreError,
            CoreError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            CoreError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::StoreError { .. } => ErrorSeverity::Error,
            CoreError::InvalidRecord { .. } => ErrorSeverity::Warning,
            CoreError::InvalidParameter { .. } => ErrorSeverity::Info,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidParameter { name, .. } => {
                details = details.with_detail(serde_json::json!({ "parameter": name }));
                if name == "kind" {
                    details = details.with_suggestion("Use one of: monthly, category, yearly.".to_string());
                } else if name == "period" {
                    details = details.with_suggestion("Periods are written as YYYY-MM, e.g. 2024-03.".to_string());
                }
            }
            CoreError::StoreError { .. } => {
                details = details
                    .with_suggestion("Check that the data directory in the config exists.".to_string())
                    .with_suggestion("Each collection file must hold a JSON array.".to_string());
            }
            CoreError::NotLoaded => {
                details = details.with_suggestion("POST /api/reload to load the collections.".to_string());
            }
            CoreError::InvalidRecord { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<StoreError> for CoreError {
    fn from(error: StoreError) -> Self {
        CoreError::StoreError {
            message: error.to_string(),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
        assert_eq!(ErrorCode::InvalidParameter.to_string(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(CoreError::NotLoaded.severity(), ErrorSeverity::Warning);
        assert_eq!(
            CoreError::StoreError { message: "x".to_string() }.severity(),
            ErrorSeverity::Error
        );
        assert_eq!(CoreError::invalid_parameter("kind", "bad").severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_invalid_period_details() {
        let details = CoreError::invalid_parameter("period", "expected YYYY-MM").to_details();
        assert_eq!(details.code, ErrorCode::InvalidParameter);
        assert!(details.message.contains("period"));
        assert_eq!(details.details, Some(serde_json::json!({ "parameter": "period" })));
        assert_eq!(details.suggestions.len(), 1);
    }

    #[test]
    fn test_from_store_error() {
        let store_error = StoreError::MalformedCollection {
            location: "transactions.json".to_string(),
            message: "expected value".to_string(),
        };
        let error: CoreError = store_error.into();
        assert_eq!(error.code(), ErrorCode::StoreError);
        assert!(error.to_string().contains("transactions.json"));
    }
}
