//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, username normalization)
//!     → handlers.rs (call upstream APIs, assemble payload)
//!     → response.rs (JSON body or error mapping)
//!     → CORS headers added → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{normalize_username, username_from_query, X_REQUEST_ID};
pub use response::{ApiError, LookupResult, UserIdResult};
pub use server::{AppState, HttpServer};
