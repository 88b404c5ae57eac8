//! Unified error type shared by every layer.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// SQLite extended result codes for `UNIQUE` and `PRIMARY KEY` violations.
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";

/// Unified error type for CampusBay.
///
/// Domain, application and infrastructure failures all end up here so the
/// REST layer can render them with a single status-code mapping.
#[derive(Error, Debug)]
pub enum CampusBayError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Business rule violation, such as selling an item twice
    #[error("{0}")]
    BusinessRule(String),

    // ============ Authentication/Authorization Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Invalid credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CampusBayError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::BusinessRule(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_)
            | Self::InvalidToken(_)
            | Self::TokenExpired
            | Self::InvalidCredentials => 401,
            Self::Forbidden(_) => 403,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a business rule violation.
    #[must_use]
    pub fn business_rule<T: Into<String>>(message: T) -> Self {
        Self::BusinessRule(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Cache(_))
    }

    /// Returns true for errors caused by the client rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CampusBayError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "Row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    if matches!(
                        code.as_ref(),
                        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY | "23505" | "1062"
                    ) {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::migrate::MigrateError> for CampusBayError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(format!("Migration failed: {err}"))
    }
}

impl From<serde_json::Error> for CampusBayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CampusBayError`.
    ///
    /// Server-side failures are reported with a generic message so that
    /// database or configuration details never reach the client.
    #[must_use]
    pub fn from_error(error: &CampusBayError) -> Self {
        let message = if error.is_client_error() {
            error.to_string()
        } else {
            "Server error".to_string()
        };
        Self {
            code: error.error_code().to_string(),
            message,
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&CampusBayError> for ErrorResponse {
    fn from(error: &CampusBayError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CampusBayError::not_found("Item", 1).status_code(), 404);
        assert_eq!(CampusBayError::validation("bad price").status_code(), 400);
        assert_eq!(CampusBayError::business_rule("Item is already sold").status_code(), 400);
        assert_eq!(CampusBayError::unauthorized("not logged in").status_code(), 401);
        assert_eq!(CampusBayError::forbidden("not the seller").status_code(), 403);
        assert_eq!(CampusBayError::conflict("duplicate").status_code(), 409);
        assert_eq!(CampusBayError::TokenExpired.status_code(), 401);
        assert_eq!(CampusBayError::InvalidCredentials.status_code(), 401);
        assert_eq!(CampusBayError::Database("db".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CampusBayError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(CampusBayError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(
            CampusBayError::business_rule("x").error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(CampusBayError::internal("err").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            CampusBayError::Other(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_retriable_errors() {
        assert!(CampusBayError::Database("connection lost".to_string()).is_retriable());
        assert!(CampusBayError::Cache("redis down".to_string()).is_retriable());
        assert!(!CampusBayError::not_found("Item", 1).is_retriable());
        assert!(!CampusBayError::InvalidCredentials.is_retriable());
    }

    #[test]
    fn test_not_found_message() {
        let err = CampusBayError::not_found("Item", "abc");
        assert_eq!(err.to_string(), "Item not found: abc");
    }

    #[test]
    fn test_business_rule_message_is_verbatim() {
        let err = CampusBayError::business_rule("Item is already marked as sold");
        assert_eq!(err.to_string(), "Item is already marked as sold");
    }

    #[test]
    fn test_error_response_hides_server_details() {
        let err = CampusBayError::Database("no such table: items".to_string());
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, "Server error");
    }

    #[test]
    fn test_error_response_keeps_client_message() {
        let err = CampusBayError::forbidden("Only the seller can mark this item as sold");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "FORBIDDEN");
        assert!(response.message.contains("Only the seller"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err: CampusBayError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CampusBayError::Internal(_)));
    }
}
