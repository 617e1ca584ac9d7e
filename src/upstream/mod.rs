//! Upstream identity platform integration.
//!
//! # Data Flow
//! ```text
//! username ─▶ users.rs  (POST usernames/users)     ─▶ user id | NotFound
//! user id  ─▶ groups.rs (GET users/{id}/groups/roles) ─▶ memberships ─▶ MembershipFlags
//! user id  ─▶ avatar.rs (GET avatar-headshot)      ─▶ image URL
//!                          └─ on any failure ─▶ legacy template URL
//! ```
//!
//! # Design Decisions
//! - One request per upstream call, no retries
//! - Every call bounded by the configured upstream timeout
//! - Failures are classified, never collapsed to a string

pub mod avatar;
pub mod client;
pub mod groups;
pub mod types;
pub mod users;

pub use client::RobloxClient;
pub use groups::MembershipFlags;
pub use types::{GroupMembership, UpstreamError, UpstreamResult};
