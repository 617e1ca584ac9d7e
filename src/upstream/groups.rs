//! Group membership lookup for the two tracked groups.

use serde::Serialize;

use crate::config::schema::GroupConfig;
use crate::upstream::client::{fill_user_id, RobloxClient};
use crate::upstream::types::{GroupMembership, GroupRolesResponse, UpstreamResult};

impl RobloxClient {
    /// Fetch every group the user belongs to, with the role held in each.
    pub async fn group_memberships(&self, user_id: u64) -> UpstreamResult<Vec<GroupMembership>> {
        let url = fill_user_id(&self.endpoints.groups_url, user_id);
        let response: GroupRolesResponse = self.send_json("groups", self.http.get(url)).await?;

        let memberships: Vec<GroupMembership> =
            response.data.into_iter().map(GroupMembership::from).collect();
        tracing::debug!(user_id, groups = memberships.len(), "Group memberships fetched");
        Ok(memberships)
    }
}

/// Membership in the tracked groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipFlags {
    pub in_group_a: bool,
    pub group_a_role: Option<String>,
    pub in_group_b: bool,
    pub group_b_role: Option<String>,
}

impl MembershipFlags {
    /// Scan memberships for the tracked groups; anything else is ignored.
    pub fn from_memberships(memberships: &[GroupMembership], groups: &GroupConfig) -> Self {
        let role_in = |group_id: u64| {
            memberships
                .iter()
                .find(|m| m.group_id == group_id)
                .map(|m| m.role_name.clone())
        };

        let group_a_role = role_in(groups.group_a_id);
        let group_b_role = role_in(groups.group_b_id);

        Self {
            in_group_a: group_a_role.is_some(),
            group_a_role,
            in_group_b: group_b_role.is_some(),
            group_b_role,
        }
    }
}
