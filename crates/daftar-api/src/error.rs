//! Error types for daftar-api

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use daftar_core::{CoreError, ErrorCode, ErrorDetails};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryRejection),
}

impl ApiError {
    /// HTTP status for the error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(error) => match error.code() {
                ErrorCode::InvalidDate
                | ErrorCode::OutOfRange
                | ErrorCode::InvalidRecord
                | ErrorCode::InvalidQuery => StatusCode::BAD_REQUEST,
                ErrorCode::UnknownAccount
                | ErrorCode::TransactionNotFound
                | ErrorCode::CheckNotFound => StatusCode::NOT_FOUND,
                ErrorCode::AmountOverflow => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::ParseError | ErrorCode::IoError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Query(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// JSON body for the error
    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(error) => error.to_details(),
            ApiError::Query(rejection) => ErrorDetails::new(ErrorCode::InvalidQuery, self.to_string())
                .with_detail(serde_json::json!({ "reason": rejection.body_text() }))
                .with_suggestion(
                    "Filter values are lowercase: type=income|expense, status=pending|passed|bounced."
                        .to_string(),
                ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected: {}", self);
        }
        (status, Json(self.to_details())).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unknown = ApiError::from(CoreError::UnknownAccount { id: "x".to_string() });
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let parse = ApiError::from(CoreError::ParseError { message: "bad".to_string() });
        assert_eq!(parse.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ApiError::from(CoreError::InvalidRecord { message: "neg".to_string() });
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let overflow = ApiError::from(CoreError::AmountOverflow { context: "acc-1".to_string() });
        assert_eq!(overflow.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
