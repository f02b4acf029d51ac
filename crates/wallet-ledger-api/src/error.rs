//! Error types for wallet-ledger-api
//!
//! Every handler failure is rendered as a JSON `ErrorDetails` body so a
//! client can show the message inline and offer a retry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use wallet_ledger_core::{CoreError, ErrorCode, ErrorDetails};
use wallet_ledger_utils::truncate_message;

/// Longest `message` sent to clients; the full text is only logged
pub const MAX_MESSAGE_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error.code() {
                ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorCode::ValidationFailure | ErrorCode::MalformedData => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
                ErrorCode::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::SourceError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        let mut details = match self {
            ApiError::Core(error) => error.to_details(),
            ApiError::BadRequest { message } => {
                ErrorDetails::new(ErrorCode::InvalidInput, message.clone()).retryable(false)
            }
        };
        details.message = truncate_message(&details.message, MAX_MESSAGE_CHARS);
        details
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{} {}", status, self);
        } else {
            log::warn!("{} {}", status, self);
        }
        (status, Json(self.to_details())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (
                ApiError::from(CoreError::InvalidInput {
                    message: "x".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::ValidationFailure { errors: vec![] }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(CoreError::TransactionNotFound {
                    id: "1".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::from(CoreError::NotLoaded), StatusCode::SERVICE_UNAVAILABLE),
            (
                ApiError::from(CoreError::Source {
                    message: "gone".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::bad_request("no"), StatusCode::BAD_REQUEST),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status, "{}", error);
        }
    }

    #[test]
    fn test_details_keep_core_code() {
        let error = ApiError::from(CoreError::MalformedData {
            id: "7".to_string(),
            field: "date".to_string(),
            value: "".to_string(),
            message: "date cannot be parsed".to_string(),
        });
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::MalformedData);
        assert!(details.retryable);
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let error = ApiError::from(CoreError::Source {
            message: format!("cannot parse ./data/{}.json", "x".repeat(300)),
        });
        let details = error.to_details();
        assert!(details.message.starts_with("Source error: cannot parse ./data/"));
        assert!(details.message.ends_with("..."));
        assert_eq!(details.message.chars().count(), MAX_MESSAGE_CHARS + 3);
        assert!(error.to_string().len() > MAX_MESSAGE_CHARS);

        let short = ApiError::bad_request("Request body is not valid JSON");
        assert_eq!(short.to_details().message, "Request body is not valid JSON");
    }
}
