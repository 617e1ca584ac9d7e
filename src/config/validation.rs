//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and upstream URLs
//! - Validate value ranges (timeouts > 0, distinct group ids)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{RelayConfig, USER_ID_PLACEHOLDER};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `upstream.groups_url`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(
        &mut errors,
        "listener.bind_address",
        &config.listener.bind_address,
    );
    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "upstream.users_url", &config.upstream.users_url);
    check_url(&mut errors, "upstream.thumbnails_url", &config.upstream.thumbnails_url);
    check_template(&mut errors, "upstream.groups_url", &config.upstream.groups_url);
    check_template(
        &mut errors,
        "upstream.legacy_thumbnail_url",
        &config.upstream.legacy_thumbnail_url,
    );

    if config.groups.group_a_id == 0 {
        errors.push(ValidationError::new("groups.group_a_id", "must be greater than 0"));
    }
    if config.groups.group_b_id == 0 {
        errors.push(ValidationError::new("groups.group_b_id", "must be greater than 0"));
    }
    if config.groups.group_a_id == config.groups.group_b_id {
        errors.push(ValidationError::new(
            "groups.group_b_id",
            "must differ from groups.group_a_id",
        ));
    }

    let timeouts = [
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.connect_secs", config.timeouts.connect_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::new(field, "must be greater than 0"));
        }
    }

    // `/lookup` makes two sequential upstream calls; the request timeout must
    // outlast both so an upstream timeout still gets its JSON 503.
    let upstream_secs = config.timeouts.upstream_secs;
    let request_secs = config.timeouts.request_secs;
    if upstream_secs > 0 && request_secs > 0 && request_secs <= upstream_secs.saturating_mul(2) {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed twice timeouts.upstream_secs ({}s), got {}s",
                upstream_secs, request_secs
            ),
        ));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}', expected 'pretty' or 'json'", other),
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if let Err(e) = value.parse::<SocketAddr>() {
        errors.push(ValidationError::new(
            field,
            format!("invalid socket address '{}': {}", value, e),
        ));
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if let Err(e) = Url::parse(value) {
        errors.push(ValidationError::new(
            field,
            format!("invalid URL '{}': {}", value, e),
        ));
    }
}

fn check_template(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.contains(USER_ID_PLACEHOLDER) {
        errors.push(ValidationError::new(
            field,
            format!("must contain the {} placeholder", USER_ID_PLACEHOLDER),
        ));
        return;
    }
    check_url(errors, field, &value.replace(USER_ID_PLACEHOLDER, "1"));
}
