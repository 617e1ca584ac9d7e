//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the numeric user id in URL templates.
pub const USER_ID_PLACEHOLDER: &str = "{user_id}";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API endpoints.
    pub upstream: UpstreamConfig,

    /// The two tracked groups reported by `/lookup`.
    pub groups: GroupConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:10000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:10000".to_string(),
        }
    }
}

/// Upstream API endpoints.
///
/// `groups_url` and `legacy_thumbnail_url` are templates containing
/// `{user_id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Batch username lookup (POST).
    pub users_url: String,

    /// Group roles for a user (GET).
    pub groups_url: String,

    /// Avatar headshot thumbnails (GET).
    pub thumbnails_url: String,

    /// Legacy headshot URL, built without a network call.
    pub legacy_thumbnail_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            users_url: "https://users.roblox.com/v1/usernames/users".to_string(),
            groups_url: "https://groups.roblox.com/v2/users/{user_id}/groups/roles".to_string(),
            thumbnails_url: "https://thumbnails.roblox.com/v1/users/avatar-headshot".to_string(),
            legacy_thumbnail_url: "https://www.roblox.com/headshot-thumbnail/image?userId={user_id}&width=150&height=150&format=png".to_string(),
        }
    }
}

/// Tracked group identifiers.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct GroupConfig {
    /// Group reported as `in_group_a` / `group_a_role`.
    pub group_a_id: u64,

    /// Group reported as `in_group_b` / `group_b_role`.
    pub group_b_id: u64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        // Deployments override these with their own community groups.
        Self {
            group_a_id: 1,
            group_b_id: 2,
        }
    }
}

/// Timeout configuration for upstream calls and request handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for a single upstream call in seconds.
    pub upstream_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for one relay request) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: 5,
            connect_secs: 3,
            request_secs: 15,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_listen_on_port_10000() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:10000");
        assert_eq!(config.timeouts.upstream_secs, 5);
        assert!(config.upstream.groups_url.contains(USER_ID_PLACEHOLDER));
        assert!(config.upstream.legacy_thumbnail_url.contains(USER_ID_PLACEHOLDER));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let raw = r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [groups]
            group_a_id = 42
        "#;
        let config: RelayConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.groups.group_a_id, 42);
        assert_eq!(config.groups.group_b_id, GroupConfig::default().group_b_id);
        assert_eq!(config.observability.log_format, "pretty");
    }
}
