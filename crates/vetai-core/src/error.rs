//! Error types and exit codes for vetai
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, rejected backup directory)
//! - 3: Data/store error (missing store, corrupt record)
//! - 4: Rate limited (destructive request rejected, retry later)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, corrupt record (3)
    Data = 3,
    /// Destructive request rejected by the rate limiter (4)
    RateLimited = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during vetai operations
#[derive(Error, Debug)]
pub enum VetaiError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("invalid backup directory {path:?}: {reason}")]
    InvalidBackupPath { path: PathBuf, reason: String },

    #[error("invalid record id {id:?}: {reason}")]
    InvalidRecordId { id: String, reason: String },

    // Data/store errors (exit code 3)
    #[error("record store not found at {path:?}")]
    StoreNotFound { path: PathBuf },

    #[error("invalid consultation record in {path:?}: {reason}")]
    InvalidRecord { path: PathBuf, reason: String },

    // Rate limiting (exit code 4)
    #[error("rate limited: client {client} exceeded the destructive request budget, retry in {retry_after_secs}s")]
    RateLimited {
        client: String,
        retry_after_secs: u64,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{service} is not available: {reason}")]
    Unavailable { service: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl VetaiError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        VetaiError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        VetaiError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a rejected backup directory
    pub fn invalid_backup_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        VetaiError::InvalidBackupPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for an external service that is not configured or not reachable
    pub fn unavailable(service: &str, reason: impl std::fmt::Display) -> Self {
        VetaiError::Unavailable {
            service: service.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a poisoned lock
    pub fn lock_poisoned(what: &str) -> Self {
        VetaiError::FailedOperation {
            operation: format!("acquire {} lock", what),
            reason: "lock poisoned by a panicked holder".to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            VetaiError::UnknownFormat(_)
            | VetaiError::UsageError(_)
            | VetaiError::InvalidValue { .. }
            | VetaiError::InvalidBackupPath { .. }
            | VetaiError::InvalidRecordId { .. } => ExitCode::Usage,

            VetaiError::StoreNotFound { .. }
            | VetaiError::InvalidRecord { .. } => ExitCode::Data,

            VetaiError::RateLimited { .. } => ExitCode::RateLimited,

            VetaiError::Io(_)
            | VetaiError::Json(_)
            | VetaiError::Toml(_)
            | VetaiError::FailedOperation { .. }
            | VetaiError::FailedOperationWithTarget { .. }
            | VetaiError::Unavailable { .. }
            | VetaiError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            VetaiError::UnknownFormat(_) => "unknown_format",
            VetaiError::UsageError(_) => "usage_error",
            VetaiError::InvalidValue { .. } => "invalid_value",
            VetaiError::InvalidBackupPath { .. } => "invalid_backup_path",
            VetaiError::InvalidRecordId { .. } => "invalid_record_id",
            VetaiError::StoreNotFound { .. } => "store_not_found",
            VetaiError::InvalidRecord { .. } => "invalid_record",
            VetaiError::RateLimited { .. } => "rate_limited",
            VetaiError::Io(_) => "io_error",
            VetaiError::Json(_) => "json_error",
            VetaiError::Toml(_) => "toml_error",
            VetaiError::FailedOperation { .. } => "failed_operation",
            VetaiError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            VetaiError::Unavailable { .. } => "unavailable",
            VetaiError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let VetaiError::RateLimited {
            retry_after_secs, ..
        } = self
        {
            error_obj["retry_after_secs"] = serde_json::json!(retry_after_secs);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for vetai operations
pub type Result<T> = std::result::Result<T, VetaiError>;
