//! Upstream HTTP client with timeout and error classification.
//!
//! # Responsibilities
//! - Hold the pooled `reqwest` client and configured endpoints
//! - Enforce per-call and connect timeouts
//! - Classify failures into `UpstreamError` kinds
//! - Record per-upstream metrics

use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use crate::config::schema::{TimeoutConfig, UpstreamConfig, USER_ID_PLACEHOLDER};
use crate::observability::metrics;
use crate::upstream::types::{UpstreamError, UpstreamResult};

/// Client for the users, groups and thumbnails APIs.
///
/// Cloning is cheap; the connection pool is shared.
#[derive(Clone)]
pub struct RobloxClient {
    pub(super) http: reqwest::Client,
    pub(super) endpoints: UpstreamConfig,
    timeout_secs: u64,
}

impl RobloxClient {
    /// Create a new client.
    ///
    /// No request is made here; endpoints are only contacted per call.
    pub fn new(endpoints: UpstreamConfig, timeouts: &TimeoutConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .user_agent(concat!("roblox-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Client)?;

        tracing::debug!(
            users_url = %endpoints.users_url,
            thumbnails_url = %endpoints.thumbnails_url,
            timeout_secs = timeouts.upstream_secs,
            "Upstream client initialized"
        );

        Ok(Self {
            http,
            endpoints,
            timeout_secs: timeouts.upstream_secs,
        })
    }

    /// Send a request and decode a JSON body.
    ///
    /// Non-2xx answers are errors; the body is not read in that case.
    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        upstream: &'static str,
        request: reqwest::RequestBuilder,
    ) -> UpstreamResult<T> {
        let start = Instant::now();
        let result = self.execute(request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_upstream_call(upstream, outcome, start);

        if let Err(e) = &result {
            tracing::warn!(upstream, error = %e, "Upstream call failed");
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> UpstreamResult<T> {
        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| UpstreamError::from_reqwest(e, self.timeout_secs))?;

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, self.timeout_secs))
    }
}

impl std::fmt::Debug for RobloxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobloxClient")
            .field("users_url", &self.endpoints.users_url)
            .field("groups_url", &self.endpoints.groups_url)
            .field("thumbnails_url", &self.endpoints.thumbnails_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Substitute a user id into an endpoint template.
pub fn fill_user_id(template: &str, user_id: u64) -> String {
    template.replace(USER_ID_PLACEHOLDER, &user_id.to_string())
}
