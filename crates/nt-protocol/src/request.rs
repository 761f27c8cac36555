//! Inbound requests
//!
//! A request is a single text message of the form `"<command> <target>"`.
//! Surrounding whitespace is ignored and the message is split on the first
//! run of whitespace only, so the target keeps any inner whitespace verbatim.

use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Diagnostic commands the agent can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Reachability check (ICMP echo)
    Ping,
    /// Path trace to the target
    Traceroute,
}

impl CommandKind {
    /// All supported commands, in protocol order
    pub const ALL: [CommandKind; 2] = [CommandKind::Ping, CommandKind::Traceroute];

    /// The wire keyword for this command
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Ping => "ping",
            CommandKind::Traceroute => "traceroute",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ProtocolError;

    /// Keywords are matched exactly; `PING` is not `ping`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ping" => Ok(CommandKind::Ping),
            "traceroute" => Ok(CommandKind::Traceroute),
            other => Err(ProtocolError::Unsupported(other.to_string())),
        }
    }
}

/// A parsed request from the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Command to run
    pub command: CommandKind,
    /// Host or address handed to the diagnostic utility, unvalidated
    pub target: String,
}

impl Request {
    /// Create a new request
    pub fn new(command: CommandKind, target: impl Into<String>) -> Self {
        Self {
            command,
            target: target.into(),
        }
    }

    /// Parse a raw inbound message.
    ///
    /// Shape is checked before the keyword: `"foo"` is a format error,
    /// `"foo bar"` is an unsupported command.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let (keyword, target) = split_request(text).ok_or(ProtocolError::Format)?;
        let command = keyword.parse::<CommandKind>()?;
        Ok(Self::new(command, target))
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.command, self.target)
    }
}

/// Split a message into keyword and target on the first whitespace run.
///
/// Returns `None` when fewer than two parts remain after trimming.
pub fn split_request(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    let split_at = text.find(char::is_whitespace)?;
    let (keyword, rest) = text.split_at(split_at);
    let target = rest.trim_start();
    if target.is_empty() {
        return None;
    }
    Some((keyword, target))
}
