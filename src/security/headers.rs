//! Cross-origin response headers.
//!
//! Every response, including errors and framework rejections, allows any
//! origin and exposes any header. Preflight requests are answered for GET,
//! POST and OPTIONS with any requested header.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS policy applied to the whole router.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(Any)
}
