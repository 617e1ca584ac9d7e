//! Security subsystem.
//!
//! The relay has no authentication or rate limiting; the only response
//! policy is the permissive cross-origin one in headers.rs.

pub mod headers;

pub use headers::cors_layer;
