//! nt-protocol: Text wire protocol for the net-tools agent
//!
//! The coordinator sends one command per text message, shaped as
//! `"<command> <target>"`. The agent answers every request with exactly one
//! text message: either the captured output of the diagnostic utility or a
//! human-readable error notice.

pub mod error;
pub mod reply;
pub mod request;

pub use error::ProtocolError;
pub use reply::{Reply, ReplyError};
pub use request::{CommandKind, Request};
