//! Roblox username relay.
//!
//! Resolves usernames to user ids, reports membership in two tracked groups
//! and redirects to avatar headshots, adding permissive CORS headers so
//! browser clients can call it directly.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server (request id, trace, CORS, timeout, metrics)
//!                  │
//!                  ▼
//!              http::handlers ──▶ upstream::RobloxClient ──▶ users / groups / thumbnails APIs
//!                  │
//!                  ▼
//!              http::response (JSON body or mapped error)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
