//! Domain-level error type.
//!
//! These errors are transport agnostic. The HTTP adapter maps them onto the
//! wire envelope and status codes; the domain only records what failed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails creation validation.
    InvalidRequest,
    /// The requested box does not exist after all lookup fallbacks.
    NotFound,
    /// The service is misconfigured (e.g. missing QR base URL).
    Configuration,
    /// Reading or writing the record collection failed.
    Storage,
    /// An unexpected failure inside the domain.
    Internal,
}

/// Domain error carrying a code, a human-readable message, and optional
/// structured details (for not-found failures the details always include
/// the originally requested identifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error from a code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`], recording the
    /// identifier the caller asked for.
    pub fn not_found(requested_id: impl AsRef<str>) -> Self {
        let requested_id = requested_id.as_ref();
        Self::new(ErrorCode::NotFound, "Box not found")
            .with_details(serde_json::json!({ "requestedId": requested_id }))
    }

    /// Convenience constructor for [`ErrorCode::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Configuration, message)
    }

    /// Convenience constructor for [`ErrorCode::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// The identifier a failed lookup was asked for, when recorded.
    pub fn requested_id(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("requestedId"))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
