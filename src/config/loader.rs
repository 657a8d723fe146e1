//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `upstream.base_url`.
pub const UPSTREAM_BASE_ENV: &str = "COURSE_API_BASE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

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
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the startup configuration: file (or defaults), then environment
/// overrides, then validation.
pub fn load_startup_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => ProxyConfig::default(),
    };
    let config = apply_env_overrides(config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to resolve variables.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: ProxyConfig, lookup: F) -> ProxyConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base) = lookup(UPSTREAM_BASE_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!(base_url = %base, "Upstream base overridden from environment");
        config.upstream.base_url = base.trim().to_string();
    }
    config
}

fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}
