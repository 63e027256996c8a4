use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum VaultError {
    #[error("required fields are missing")]
    MissingFields,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("amount must be a positive number")]
    InvalidAmount,

    #[error("vault {0} not found")]
    VaultNotFound(u64),

    #[error("vault {0} is not verified")]
    VaultNotVerified(u64),

    #[error("no active session")]
    NotLoggedIn,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for VaultError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match &self {
            VaultError::MissingFields => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::new("MISSING_FIELDS", "Please fill all required fields."),
            ),
            VaultError::PasswordMismatch => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::new("PASSWORD_MISMATCH", "Passwords do not match."),
            ),
            VaultError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("INVALID_CREDENTIALS", "Invalid username or password."),
            ),
            VaultError::NotLoggedIn => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("NOT_LOGGED_IN", "Login required."),
            ),
            VaultError::InvalidAmount => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::new("INVALID_AMOUNT", "Amount must be a positive number."),
            ),
            VaultError::VaultNotFound(id) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody::new("VAULT_NOT_FOUND", format!("No vault with id {id}.")),
            ),
            VaultError::VaultNotVerified(id) => (
                StatusCode::CONFLICT,
                ApiErrorBody::new(
                    "VAULT_NOT_VERIFIED",
                    format!("Vault {id} must be verified before withdrawal."),
                ),
            ),
            VaultError::Database(_) | VaultError::Json(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::new("INTERNAL_ERROR", "An internal server error occurred."),
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
