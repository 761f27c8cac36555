//! Outbound replies
//!
//! Every request gets exactly one reply. Errors are a closed set of variants
//! rendered to fixed human-readable strings only when the reply is sent.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::error::ProtocolError;

/// Command-level failures reported back to the coordinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// Message could not be split into command and target
    #[error("❌ Invalid format, use: ping <host> or traceroute <host>")]
    Format,

    /// Keyword is not a supported command
    #[error("❌ Unsupported command: {command}")]
    Unsupported { command: String },

    /// The diagnostic utility could not be started or awaited
    #[error("❌ Execution error: {description}")]
    Execution { description: String },

    /// The diagnostic utility exceeded the configured command timeout
    #[error("❌ Execution error: command timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },
}

impl From<ProtocolError> for ReplyError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Format => ReplyError::Format,
            ProtocolError::Unsupported(command) => ReplyError::Unsupported { command },
        }
    }
}

/// A reply to a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Captured output of the diagnostic utility, verbatim
    Output(String),
    /// A command-level failure
    Error(ReplyError),
}

impl Reply {
    /// Render the reply as the text sent over the wire
    pub fn into_text(self) -> String {
        match self {
            Reply::Output(text) => text,
            Reply::Error(err) => err.to_string(),
        }
    }

    /// Whether this reply reports a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl From<ReplyError> for Reply {
    fn from(err: ReplyError) -> Self {
        Reply::Error(err)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Output(text) => f.write_str(text),
            Reply::Error(err) => write!(f, "{}", err),
        }
    }
}
