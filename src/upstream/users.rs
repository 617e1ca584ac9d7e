//! Username → user id resolution.

use crate::upstream::client::RobloxClient;
use crate::upstream::types::{
    UpstreamError, UpstreamResult, UsernameLookupRequest, UsernameLookupResponse,
};

impl RobloxClient {
    /// Resolve a username to its numeric user id.
    ///
    /// Banned accounts are excluded upstream. Returns `UpstreamError::NotFound`
    /// when nothing matches; otherwise the first match wins.
    pub async fn resolve_user_id(&self, username: &str) -> UpstreamResult<u64> {
        let body = UsernameLookupRequest {
            usernames: vec![username],
            exclude_banned_users: true,
        };
        let request = self.http.post(&self.endpoints.users_url).json(&body);

        let response: UsernameLookupResponse = self.send_json("users", request).await?;
        let user_id = response
            .data
            .first()
            .map(|m| m.id)
            .ok_or(UpstreamError::NotFound)?;

        tracing::debug!(username, user_id, "Username resolved");
        Ok(user_id)
    }
}
