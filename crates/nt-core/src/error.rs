//! Core error types for the net-tools agent

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Connection-level errors; these end a session
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Opening handshake did not finish in time
    #[error("Connection to {url} timed out after {}s", .after.as_secs())]
    Timeout { url: String, after: Duration },

    /// DNS, TCP, TLS or WebSocket handshake failure
    #[error("Failed to connect to {url}: {reason}")]
    Handshake { url: String, reason: String },

    /// Transport failure on an established connection
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failures running a diagnostic utility
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be started (missing binary, permissions)
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the process or reading its output failed
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran longer than the configured command timeout
    #[error("{program} timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}
