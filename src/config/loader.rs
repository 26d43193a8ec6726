//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LandingConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LandingConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse, resolve and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LandingConfig, ConfigError> {
    let mut config: LandingConfig = toml::from_str(content)?;
    resolve_secrets(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Fill the store API key from the environment when the file leaves it empty.
pub fn resolve_secrets(config: &mut LandingConfig) {
    if !config.store.api_key.is_empty() || config.store.api_key_env.is_empty() {
        return;
    }
    match std::env::var(&config.store.api_key_env) {
        Ok(key) => config.store.api_key = key,
        Err(_) => tracing::warn!(
            env = %config.store.api_key_env,
            "Store API key not set; requests will be sent unauthenticated"
        ),
    }
}
