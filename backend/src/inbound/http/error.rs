//! HTTP error payloads and mapping from domain errors.
//!
//! The wire envelope is the one existing clients already parse:
//! `{"error": "...", "requestedId": "..."}`. Domain error codes choose the
//! status; the domain stays free of transport concerns.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable failure description.
    #[schema(example = "Box not found")]
    pub error: String,
    /// Identifier the caller asked for, echoed back on failed lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "BOX-000042")]
    pub requested_id: Option<String>,
}

/// Adapter-level error produced from a [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError(Error);

impl ApiError {
    /// The wrapped domain error.
    pub fn inner(&self) -> &Error {
        &self.0
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Configuration | ErrorCode::Storage | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            // Log the real failure, return a stable message to the client.
            error!(error = %self.0, code = ?self.0.code(), "request failed");
            return HttpResponse::build(status).json(ErrorBody {
                error: "Internal server error".to_owned(),
                requested_id: None,
            });
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.0.message().to_owned(),
            requested_id: self.0.requested_id().map(str::to_owned),
        })
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use actix_web::body::to_bytes;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("BOX-000001"), StatusCode::NOT_FOUND)]
    #[case(Error::configuration("no base url"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::storage("disk gone"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).status_code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn not_found_body_echoes_the_requested_id() {
        let response = ApiError::from(Error::not_found("BOX-000042")).error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["error"], "Box not found");
        assert_eq!(body["requestedId"], "BOX-000042");
    }

    #[rstest]
    #[tokio::test]
    async fn server_errors_are_redacted() {
        let response =
            ApiError::from(Error::storage("boxes.json: permission denied")).error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("requestedId").is_none());
    }
}
