//! Core domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of this agent instance, as known to the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID, rejecting empty or whitespace-only names
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operating system family, as far as diagnostic utilities are concerned
///
/// Only Windows differs; every other platform uses the POSIX utilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    /// Windows (`ping -n`, `tracert`)
    Windows,
    /// Linux, macOS, BSDs and anything else (`ping -c`, `traceroute`)
    Posix,
}

impl OsFamily {
    /// Detect the family of the running host
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS name such as `std::env::consts::OS` onto a family
    pub fn from_os_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("windows") {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }
}

impl Default for OsFamily {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::Posix => write!(f, "posix"),
        }
    }
}

/// Lifecycle state of a coordinator session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No connection (initial, and terminal for an attempt)
    Disconnected,
    /// Opening the connection
    Connecting,
    /// Connected and waiting for the next request
    Listening,
    /// Running a request
    Dispatching,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Disconnected => write!(f, "disconnected"),
            SessionState::Connecting => write!(f, "connecting"),
            SessionState::Listening => write!(f, "listening"),
            SessionState::Dispatching => write!(f, "dispatching"),
        }
    }
}
