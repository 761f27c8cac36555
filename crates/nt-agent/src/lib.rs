//! nt-agent: Remote-controlled network diagnostic agent
//!
//! The agent keeps a WebSocket connection open to the net-tools
//! coordinator, runs `ping` and `traceroute` on request, and sends the
//! captured output back over the same connection.

pub mod command;
pub mod session;

pub use command::ProcessRunner;
pub use session::{Session, Supervisor};
