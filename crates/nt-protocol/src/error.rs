//! Protocol error types

use thiserror::Error;

/// Errors raised while interpreting an inbound message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The message could not be split into a command and a target
    #[error("Malformed request: expected \"<command> <target>\"")]
    Format,

    /// The command keyword is not one the agent knows how to run
    #[error("Unsupported command: {0}")]
    Unsupported(String),
}
