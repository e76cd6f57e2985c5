use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Strategy service error: {0}")]
    Service(#[from] ServiceError),
    #[error("Account data provider error: {0}")]
    Provider(#[from] api_client::error::ProviderError),
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Service(ServiceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Strategy not found".to_string())
            }
            AppError::Service(ServiceError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Service(ServiceError::Persistence(db_err)) => {
                tracing::error!(error = ?db_err, "Persistence error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save strategies".to_string(),
                )
            }
            AppError::Service(ServiceError::TaskFailed(join_err)) => {
                tracing::error!(error = ?join_err, "Persistence task failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save strategies".to_string(),
                )
            }
            AppError::Provider(provider_err) => {
                tracing::error!(error = ?provider_err, "Account data provider error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Account data is currently unavailable".to_string(),
                )
            }
            AppError::Multipart(multipart_err) => {
                (multipart_err.status(), multipart_err.body_text())
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
