//! Diagnostic command translation and execution

mod runner;
mod translate;

pub use runner::ProcessRunner;
pub use translate::{ping_command, traceroute_command, translate, PING_COUNT};
