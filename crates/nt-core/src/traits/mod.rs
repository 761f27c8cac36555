//! Core trait definitions

mod runner;

pub use runner::{CommandOutput, CommandRunner, CommandSpec};
