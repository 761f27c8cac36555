//! nt-core: Core abstractions and configuration for the net-tools agent
//!
//! This crate provides the shared types, configuration structures and the
//! command execution seam used by the agent.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{ConfigError, ConnectionError, ExecError};
pub use types::{NodeId, OsFamily, SessionState};
