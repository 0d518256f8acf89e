use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// HubSpot API rejected or failed a request we cannot forward verbatim
    #[error("HubSpot API error: {0}")]
    HubSpotApi(String),

    /// Upstream HTTP failure forwarded with its original status and body
    #[error("upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Token-exchange failures keep the provider's status and body
            // untouched
            AppError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                return (status, body).into_response();
            }
            AppError::HubSpotApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::JsonError(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::HttpError(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            // Missing credentials/state surface as a client error, not a 404
            AppError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_bad_request() {
        let response = AppError::ValidationError("missing state".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_bad_request() {
        let response = AppError::NotFound("no credentials found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_error_keeps_status() {
        let response = AppError::Upstream {
            status: 403,
            body: "{\"message\":\"bad client\"}".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_error_invalid_status_falls_back() {
        let response = AppError::Upstream {
            status: 99,
            body: "whatever".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
