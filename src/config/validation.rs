//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, addresses and value ranges
//! - Check plan ids are unique
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LandingConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::LandingConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LandingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if let Err(e) = url::Url::parse(&config.store.base_url) {
        errors.push(ValidationError::new("store.base_url", e.to_string()));
    }
    if config.store.table.trim().is_empty() {
        errors.push(ValidationError::new("store.table", "must not be empty"));
    }
    if config.store.source.trim().is_empty() {
        errors.push(ValidationError::new("store.source", "must not be empty"));
    }

    if !config.locale.redirect_path.starts_with('/') || config.locale.redirect_path == "/" {
        errors.push(ValidationError::new(
            "locale.redirect_path",
            "must be an absolute path other than the root",
        ));
    }
    if config.locale.language.trim().is_empty() {
        errors.push(ValidationError::new("locale.language", "must not be empty"));
    }
    if axum::http::HeaderName::from_bytes(config.locale.country_header.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "locale.country_header",
            format!("'{}' is not a valid header name", config.locale.country_header),
        ));
    }

    if let Err(e) = url::Url::parse(&config.pricing.app_base_url) {
        errors.push(ValidationError::new("pricing.app_base_url", e.to_string()));
    }
    let mut seen = HashSet::new();
    for plan in &config.pricing.plans {
        if !seen.insert(plan.id.as_str()) {
            errors.push(ValidationError::new(
                "pricing.plans",
                format!("duplicate plan id '{}'", plan.id),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
