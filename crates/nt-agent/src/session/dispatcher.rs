//! Request dispatch
//!
//! Turns one inbound message into exactly one reply. Every command-level
//! failure becomes an error reply; nothing here can end a session.

use std::sync::Arc;

use nt_core::traits::CommandRunner;
use nt_core::{ExecError, OsFamily};
use nt_protocol::{Reply, ReplyError, Request};

use crate::command::translate;

/// Resolves requests to commands and runs them
#[derive(Clone)]
pub struct Dispatcher {
    os: OsFamily,
    runner: Arc<dyn CommandRunner>,
}

impl Dispatcher {
    /// Create a dispatcher for the given OS family
    pub fn new(os: OsFamily, runner: Arc<dyn CommandRunner>) -> Self {
        Self { os, runner }
    }

    /// OS family commands are translated for
    pub fn os_family(&self) -> OsFamily {
        self.os
    }

    /// Handle a raw message and produce its reply
    pub async fn dispatch(&self, message: &str) -> Reply {
        let request = match Request::parse(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Rejected {:?}: {}", message, e);
                return Reply::Error(e.into());
            }
        };

        let spec = translate(request.command, &request.target, self.os);
        tracing::debug!("Running {}", spec);

        match self.runner.run(&spec).await {
            Ok(output) => Reply::Output(output.reply_text()),
            Err(ExecError::Timeout { program, after }) => {
                tracing::warn!("{} timed out after {:?}", program, after);
                Reply::Error(ReplyError::Timeout { after })
            }
            Err(e) => {
                tracing::warn!("Execution failed: {}", e);
                Reply::Error(ReplyError::Execution {
                    description: e.to_string(),
                })
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").field("os", &self.os).finish()
    }
}
