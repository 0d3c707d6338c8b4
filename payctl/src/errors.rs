use crate::db::errors::DbError;
use crate::validation::ValidationErrors;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

/// Message returned alongside field-level validation errors.
pub const VALIDATION_MESSAGE: &str = "One or more validation errors occurred.";

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// One or more fields failed validation
    #[error("Validation failed: {errors}")]
    Validation { errors: ValidationErrors },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation { errors }
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } | Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::Validation { .. } => VALIDATION_MESSAGE.to_string(),
            Error::NotFound { resource, id } => format!("{resource} with ID {id} not found"),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { .. } => "Resource already exists".to_string(),
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Internal server error".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(DbError::NotFound) => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::BadRequest { .. } | Error::Validation { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        match &self {
            Error::Validation { errors } => {
                let body = json!({
                    "message": VALIDATION_MESSAGE,
                    "errors": errors,
                });
                (status, Json(body)).into_response()
            }
            _ => (status, self.user_message()).into_response(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        let not_found = Error::NotFound {
            resource: "Employee".to_string(),
            id: "7".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);

        let unique = Error::Database(DbError::UniqueViolation {
            constraint: None,
            table: None,
            message: "duplicate".to_string(),
        });
        assert_eq!(unique.status_code(), StatusCode::CONFLICT);

        let check = Error::Database(DbError::CheckViolation {
            constraint: Some("configuration_discount_check".to_string()),
            table: Some("configuration".to_string()),
            message: "violates check".to_string(),
        });
        assert_eq!(check.status_code(), StatusCode::BAD_REQUEST);

        let other = Error::Other(anyhow::anyhow!("connection reset"));
        assert_eq!(other.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = Error::Database(DbError::Other(anyhow::anyhow!("relation \"employees\" does not exist")));
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[tokio::test]
    async fn test_validation_response_body() {
        let mut errors = ValidationErrors::new();
        errors.add("employeeName", "Employee name is required.");

        let response = Error::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], VALIDATION_MESSAGE);
        assert_eq!(body["errors"]["employeeName"][0], "Employee name is required.");
    }
}
