//! Upstream wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while calling the upstream APIs.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The username lookup returned zero matches.
    #[error("not-found")]
    NotFound,

    /// Upstream call exceeded its deadline.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection could not be established or was dropped.
    #[error("upstream unreachable: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Upstream body could not be decoded.
    #[error("malformed upstream response: {0}")]
    Malformed(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Classify a `reqwest` failure.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(timeout_secs)
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else if err.is_decode() {
            UpstreamError::Malformed(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }

    /// Whether the upstream could not be reached or refused to answer.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Timeout(_) | UpstreamError::Transport(_) | UpstreamError::Status(_)
        )
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::NotFound => "not_found",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Malformed(_) => "malformed",
            UpstreamError::Client(_) => "client",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// One group the user belongs to, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMembership {
    pub group_id: u64,
    pub role_name: String,
}

/// Body of the batch username lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsernameLookupRequest<'a> {
    pub usernames: Vec<&'a str>,
    pub exclude_banned_users: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameLookupResponse {
    #[serde(default)]
    pub data: Vec<UsernameMatch>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameMatch {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRolesResponse {
    #[serde(default)]
    pub data: Vec<GroupRoleEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRoleEntry {
    pub group: GroupRef,
    pub role: RoleRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRef {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleRef {
    pub name: String,
}

impl From<GroupRoleEntry> for GroupMembership {
    fn from(entry: GroupRoleEntry) -> Self {
        Self {
            group_id: entry.group.id,
            role_name: entry.role.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThumbnailResponse {
    #[serde(default)]
    pub data: Vec<ThumbnailEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThumbnailEntry {
    #[serde(default)]
    pub image_url: Option<String>,
}
