//! Process-level reconnect loop
//!
//! Runs sessions back to back forever. Every outcome, clean close or error,
//! is followed by the backoff delay before the next attempt.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use nt_core::config::AgentConfig;
use nt_core::traits::CommandRunner;
use nt_core::{ConfigError, ConnectionError, NodeId};

use super::connector::Connector;
use super::dispatcher::Dispatcher;
use super::reconnect::ExponentialBackoff;
use super::worker::{Session, SessionSummary};

/// Owns the configuration and starts one session at a time
pub struct Supervisor {
    config: AgentConfig,
    node: NodeId,
    connector: Connector,
    dispatcher: Dispatcher,
}

impl Supervisor {
    /// Build a supervisor from a validated configuration
    pub fn new(config: AgentConfig, runner: Arc<dyn CommandRunner>) -> Result<Self, ConfigError> {
        config.validate()?;
        let node = config.node_id()?;
        let connector = Connector::new(&config, &node)?;
        let dispatcher = Dispatcher::new(config.os_family(), runner);

        Ok(Self {
            config,
            node,
            connector,
            dispatcher,
        })
    }

    /// Node identity sessions connect as
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Run a single session attempt
    pub async fn run_once(&self) -> Result<SessionSummary, ConnectionError> {
        Session::new(
            self.node.clone(),
            self.connector.clone(),
            self.dispatcher.clone(),
        )
        .run()
        .await
    }

    /// Reconnect forever, returning only when `shutdown` is cancelled
    pub async fn run(&self, shutdown: CancellationToken) {
        let mut backoff = ExponentialBackoff::from_config(&self.config.backoff);
        let mut attempt: u64 = 0;

        tracing::info!(
            "Agent {} targeting {} (os family: {})",
            self.node,
            self.connector.url(),
            self.dispatcher.os_family()
        );

        loop {
            attempt += 1;
            tracing::debug!("Starting session attempt {}", attempt);

            let outcome = tokio::select! {
                _ = shutdown.cancelled() => break,
                outcome = self.run_once() => outcome,
            };

            let delay = match outcome {
                Ok(summary) => {
                    // A session that got through the handshake restarts the policy
                    backoff.reset();
                    let delay = backoff.next_delay();
                    tracing::info!(
                        "Session ended after {} request(s), reconnecting in {:?}",
                        summary.requests,
                        delay
                    );
                    delay
                }
                Err(e) => {
                    let delay = backoff.next_delay();
                    tracing::error!(
                        "Unable to reach coordinator, retrying in {:?}: {}",
                        delay,
                        e
                    );
                    delay
                }
            };

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!("Supervisor stopped after {} attempt(s)", attempt);
    }
}
