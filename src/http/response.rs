//! Response payloads and error mapping.
//!
//! # Responsibilities
//! - Define the JSON bodies returned by the relay
//! - Map upstream failures to HTTP status codes
//!
//! # Error Mapping
//! - Missing/blank username → 400 `Username is required`
//! - Zero matches → 404 `not-found`
//! - Timeout, unreachable, upstream non-2xx → 503
//! - Anything else → 500 with the error text

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::{MembershipFlags, UpstreamError};

/// Body of a successful `/lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub username: String,
    pub user_id: u64,
    #[serde(flatten)]
    pub membership: MembershipFlags,
}

/// Body of a successful `/get_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdResult {
    pub username: String,
    pub user_id: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler-level failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Username is required")]
    MissingUsername,

    #[error("not-found")]
    NotFound,

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUsername => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound => ApiError::NotFound,
            e if e.is_unavailable() => ApiError::UpstreamUnavailable(e.to_string()),
            e => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
