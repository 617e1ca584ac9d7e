//! Avatar headshot location with legacy fallback.

use axum::http::HeaderValue;

use crate::observability::metrics;
use crate::upstream::client::{fill_user_id, RobloxClient};
use crate::upstream::types::{ThumbnailResponse, UpstreamResult};

const HEADSHOT_SIZE: &str = "150x150";
const HEADSHOT_FORMAT: &str = "Png";

impl RobloxClient {
    /// Return a 150x150 PNG headshot URL for the user.
    ///
    /// Never fails: any problem with the thumbnails API falls back to the
    /// legacy URL template, which needs no network call. The primary URL is
    /// only used if it can be sent as a `Location` header.
    pub async fn locate_avatar(&self, user_id: u64) -> String {
        match self.headshot_url(user_id).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                tracing::warn!(user_id, "Thumbnail API returned no image URL, using legacy thumbnail");
                metrics::record_avatar_fallback();
                self.legacy_avatar_url(user_id)
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Thumbnail API failed, using legacy thumbnail");
                metrics::record_avatar_fallback();
                self.legacy_avatar_url(user_id)
            }
        }
    }

    /// Legacy headshot URL for the user.
    pub fn legacy_avatar_url(&self, user_id: u64) -> String {
        fill_user_id(&self.endpoints.legacy_thumbnail_url, user_id)
    }

    async fn headshot_url(&self, user_id: u64) -> UpstreamResult<Option<String>> {
        let id = user_id.to_string();
        let request = self.http.get(&self.endpoints.thumbnails_url).query(&[
            ("userIds", id.as_str()),
            ("size", HEADSHOT_SIZE),
            ("format", HEADSHOT_FORMAT),
            ("isCircular", "false"),
        ]);

        let response: ThumbnailResponse = self.send_json("thumbnails", request).await?;
        Ok(response
            .data
            .into_iter()
            .next()
            .and_then(|entry| entry.image_url)
            .filter(|url| !url.is_empty() && HeaderValue::from_str(url).is_ok()))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::schema::{TimeoutConfig, UpstreamConfig};
    use crate::upstream::client::RobloxClient;

    fn unreachable_client() -> RobloxClient {
        let mut endpoints = UpstreamConfig::default();
        endpoints.thumbnails_url = "http://127.0.0.1:1/v1/users/avatar-headshot".to_string();
        RobloxClient::new(endpoints, &TimeoutConfig::default()).unwrap()
    }

    #[test]
    fn test_legacy_url_for_id() {
        let url = unreachable_client().legacy_avatar_url(123);
        assert_eq!(
            url,
            "https://www.roblox.com/headshot-thumbnail/image?userId=123&width=150&height=150&format=png"
        );
    }

    #[tokio::test]
    async fn test_falls_back_when_thumbnail_api_unreachable() {
        let url = unreachable_client().locate_avatar(123).await;
        assert!(url.ends_with("userId=123&width=150&height=150&format=png"));
    }
}
