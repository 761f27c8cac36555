//! Configuration management for the net-tools agent

mod agent;
mod backoff;
pub mod serde_utils;

pub use agent::{AgentConfig, DEFAULT_ENDPOINT, MAX_BACKOFF_DELAY, NODE_NAME_ENV};
pub use backoff::BackoffConfig;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Get the default agent configuration file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("net-tools")
        .join("agent.toml")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = load_config::<AgentConfig>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "node_name = \"hk-01\"\ncommand_timeout = 90\n").unwrap();

        let loaded: AgentConfig = load_config(&path).unwrap();
        assert_eq!(loaded.node_name, "hk-01");
        assert_eq!(loaded.command_timeout, Some(Duration::from_secs(90)));
        assert_eq!(loaded.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with("net-tools/agent.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "node_name = [").unwrap();
        let err = load_config::<AgentConfig>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
