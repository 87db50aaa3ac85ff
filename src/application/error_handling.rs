// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → one user-facing message per failure
// - Never exposes storage or transport internals in the message
// - Logs the full error for debugging

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Creature not found
    NotFound,

    /// Invalid input
    Validation,

    /// Collection rule rejected the action (full, duplicate)
    DomainError,

    /// Local storage failure
    Database,

    /// Remote API failure
    ExternalService,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::EmptyQuery => Self::validation(error.to_string()),

            AppError::NotFound(_) => Self::new(ErrorType::NotFound, error.to_string(), None),

            AppError::Domain(domain_error) => {
                Self::new(ErrorType::DomainError, domain_error.to_string(), None)
            }

            AppError::IndexUnavailable => {
                Self::new(ErrorType::ExternalService, error.to_string(), None)
            }

            AppError::Api(message) => {
                log::error!("Remote API error: {}", message);
                Self::new(
                    ErrorType::ExternalService,
                    "The creature service is unavailable",
                    Some(message),
                )
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Local storage operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Local storage is unavailable", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Config(message) => Self::validation(format!("Invalid configuration: {}", message)),

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl From<crate::domain::DomainError> for ErrorResponse {
    fn from(error: crate::domain::DomainError) -> Self {
        Self::from_app_error(AppError::Domain(error))
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CollectionKind, DomainError};

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound("pikachuu".to_string()));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "\"pikachuu\" not found");
    }

    #[test]
    fn test_empty_query_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::EmptyQuery);
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.to_string(), "Please enter a creature name or ID");
    }

    #[test]
    fn test_collection_full_message() {
        let error: ErrorResponse = DomainError::CollectionFull {
            kind: CollectionKind::Team,
            capacity: 6,
        }
        .into();
        assert_eq!(error.error_type, ErrorType::DomainError);
        assert_eq!(error.message, "The team is full (maximum 6)");
    }

    #[test]
    fn test_api_error_hides_transport_detail() {
        let error = ErrorResponse::from_app_error(AppError::Api("connection reset".to_string()));
        assert_eq!(error.error_type, ErrorType::ExternalService);
        assert!(!error.message.contains("reset"));
        assert_eq!(error.details.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_result_conversion() {
        let result: Result<(), AppError> = Err(AppError::IndexUnavailable);
        let error = result.to_error_response().unwrap_err();
        assert_eq!(error.message, "Failed to load creature list");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(AppError::NotFound("eevee".to_string()));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("eevee"));
    }
}
