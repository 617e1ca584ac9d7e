//! Request handling.
//!
//! # Responsibilities
//! - Generate or propagate a unique request ID (UUID v4)
//! - Open one tracing span per request carrying that ID
//! - Extract and normalize the `username` query parameter

use axum::{body::Body, http::Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a UUID v4 to requests that arrive without one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Span for one request; must run after the request ID is set.
pub fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Query parameter carrying the username on `/lookup` and `/get_user_id`.
pub const USERNAME_PARAM: &str = "username";

/// The username to resolve from a raw query string.
///
/// A repeated parameter never fails the request; the first occurrence is used.
pub fn username_from_query(query: Option<&str>) -> Option<String> {
    let (_, value) = url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == USERNAME_PARAM)?;
    normalize_username(Some(&value))
}

/// Trim whitespace and strip one leading `@`.
///
/// Returns `None` when nothing is left to resolve.
pub fn normalize_username(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    let name = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_leading_at() {
        assert_eq!(normalize_username(Some("@Bob")).as_deref(), Some("Bob"));
        assert_eq!(normalize_username(Some("@@Bob")).as_deref(), Some("@Bob"));
        assert_eq!(normalize_username(Some("Bob@")).as_deref(), Some("Bob@"));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_username(Some("  @Bob \t")).as_deref(), Some("Bob"));
    }

    #[test]
    fn test_blank_is_missing() {
        assert_eq!(normalize_username(None), None);
        assert_eq!(normalize_username(Some("")), None);
        assert_eq!(normalize_username(Some("   ")), None);
        assert_eq!(normalize_username(Some(" @ ")), None);
    }

    #[test]
    fn test_username_from_query_decodes() {
        assert_eq!(
            username_from_query(Some("username=%40Bob")).as_deref(),
            Some("Bob")
        );
        assert_eq!(
            username_from_query(Some("x=1&username=+Bob+")).as_deref(),
            Some("Bob")
        );
        assert_eq!(username_from_query(Some("user=Bob")), None);
        assert_eq!(username_from_query(None), None);
    }

    #[test]
    fn test_repeated_username_uses_first() {
        assert_eq!(
            username_from_query(Some("username=Bob&username=Alice")).as_deref(),
            Some("Bob")
        );
        assert_eq!(username_from_query(Some("username=&username=Alice")), None);
        assert_eq!(username_from_query(Some("username=&username=")), None);
    }

    #[test]
    fn test_request_span_without_id() {
        let request = Request::get("/lookup").body(Body::empty()).unwrap();
        let _span = request_span(&request);
    }
}
