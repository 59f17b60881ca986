use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Reading or writing an uploaded file failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// Input failed validation; carries the per-field messages
    #[error("Validation error: {0}")]
    ValidationError(serde_json::Value),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request carried no known user
    #[error("Authentication required")]
    Unauthenticated,

    /// The user may not perform the action
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    /// The action conflicts with existing data
    #[error("Conflict: {0}")]
    Conflict(&'static str),

    /// A user flagged as applicant has no applicant profile
    #[error("User {0} is an applicant without an applicant profile")]
    MissingApplicantProfile(i32),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    fn is_foreign_key_violation(&self) -> bool {
        match self {
            ServiceError::DatabaseError(e) => e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation()),
            _ => false,
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_foreign_key_violation() => StatusCode::BAD_REQUEST,
            ServiceError::DatabaseError(_)
            | ServiceError::StorageError(_)
            | ServiceError::MissingApplicantProfile(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, fields) = match self {
            _ if self.is_foreign_key_violation() => {
                warn!("Foreign key violation: {}", self);
                (
                    "Invalid reference",
                    serde_json::json!({"message": "Referenced record does not exist"}),
                )
            }
            ServiceError::DatabaseError(e) => {
                error!("Database error: {}", e);
                (
                    "Failed to process request",
                    serde_json::json!({"message": "Database error occurred"}),
                )
            }
            ServiceError::StorageError(e) => {
                error!("Storage error: {}", e);
                (
                    "Failed to process request",
                    serde_json::json!({"message": "File storage error occurred"}),
                )
            }
            ServiceError::MissingApplicantProfile(user_id) => {
                error!("User {} is flagged as applicant but has no applicant profile", user_id);
                (
                    "Failed to process request",
                    serde_json::json!({"message": "Applicant profile is missing"}),
                )
            }
            ServiceError::ValidationError(fields) => {
                warn!("Validation error: {}", fields);
                ("Validation failed", fields.clone())
            }
            ServiceError::NotFound { entity, id } => {
                warn!("{} not found: {}", entity, id);
                (
                    "Not found",
                    serde_json::json!({"message": format!("{} with id {} not found", entity, id)}),
                )
            }
            ServiceError::Unauthenticated => (
                "Authentication required",
                serde_json::json!({"message": "A valid X-User-Id header is required"}),
            ),
            ServiceError::Forbidden(msg) => ("Forbidden", serde_json::json!({"message": msg})),
            ServiceError::Conflict(msg) => ("Conflict", serde_json::json!({"message": msg})),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            fields,
        })
    }
}
