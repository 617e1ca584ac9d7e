//! Endpoint handlers.
//!
//! Each handler is a function of the request plus the shared, immutable
//! `AppState`. Upstream calls run sequentially, one attempt each.

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::username_from_query;
use crate::http::response::{ApiError, HealthStatus, LookupResult, UserIdResult};
use crate::http::server::AppState;
use crate::upstream::{MembershipFlags, UpstreamError};

/// `GET /lookup?username=`: user id plus membership in the tracked groups.
pub async fn lookup(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<LookupResult>, ApiError> {
    let username = username_from_query(query.as_deref()).ok_or(ApiError::MissingUsername)?;

    let user_id = state
        .client
        .resolve_user_id(&username)
        .await
        .map_err(|e| lookup_failed("lookup", &username, e))?;

    let memberships = state
        .client
        .group_memberships(user_id)
        .await
        .map_err(|e| lookup_failed("lookup", &username, e))?;
    let membership = MembershipFlags::from_memberships(&memberships, &state.groups);

    tracing::info!(
        username = %username,
        user_id,
        in_group_a = membership.in_group_a,
        in_group_b = membership.in_group_b,
        "Lookup complete"
    );

    Ok(Json(LookupResult {
        username,
        user_id,
        membership,
    }))
}

/// `GET /get_user_id?username=`: legacy alias returning only the id.
pub async fn get_user_id(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<UserIdResult>, ApiError> {
    let username = username_from_query(query.as_deref()).ok_or(ApiError::MissingUsername)?;

    let user_id = state
        .client
        .resolve_user_id(&username)
        .await
        .map_err(|e| lookup_failed("get_user_id", &username, e))?;

    Ok(Json(UserIdResult { username, user_id }))
}

/// `GET /avatar/{user_id}`: always a 302 to some headshot URL.
pub async fn avatar(State(state): State<AppState>, Path(user_id): Path<u64>) -> Response {
    let url = state.client.locate_avatar(user_id).await;
    tracing::debug!(user_id, url = %url, "Redirecting to avatar");
    (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
}

/// `GET /health`: liveness, no upstream calls.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn lookup_failed(endpoint: &'static str, username: &str, err: UpstreamError) -> ApiError {
    match &err {
        UpstreamError::NotFound => {
            tracing::info!(endpoint, username, "Username not found");
        }
        e => {
            tracing::warn!(endpoint, username, error = %e, kind = e.kind(), "Lookup failed");
        }
    }
    ApiError::from(err)
}
