//! A single coordinator session
//!
//! Connects once, then loops over receive → dispatch → reply until the
//! coordinator goes away. Requests are handled strictly one at a time, so
//! replies leave in the order requests arrived.

use tracing::Instrument;

use nt_core::{ConnectionError, NodeId, SessionState};

use super::connector::{ActiveConnection, ConnectionEvent, Connector};
use super::dispatcher::Dispatcher;

/// How a session ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The coordinator closed the connection
    RemoteClosed { reason: Option<String> },
}

/// Outcome of a session that ended cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Requests answered during the session
    pub requests: u64,
    /// Why the session ended
    pub end: SessionEnd,
}

/// One connect-and-listen attempt. Consumed by [`Session::run`].
pub struct Session {
    node: NodeId,
    connector: Connector,
    dispatcher: Dispatcher,
    state: SessionState,
}

impl Session {
    /// Create a session in the `Disconnected` state
    pub fn new(node: NodeId, connector: Connector, dispatcher: Dispatcher) -> Self {
        Self {
            node,
            connector,
            dispatcher,
            state: SessionState::Disconnected,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Connect and serve requests until the connection ends.
    ///
    /// A remote close returns `Ok`. Connect failures and transport errors
    /// are returned to the caller, which owns the retry policy.
    pub async fn run(self) -> Result<SessionSummary, ConnectionError> {
        let span = tracing::info_span!("session", node = %self.node);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(mut self) -> Result<SessionSummary, ConnectionError> {
        self.transition(SessionState::Connecting);
        let mut connection = match self.connector.connect().await {
            Ok(connection) => connection,
            Err(e) => {
                self.transition(SessionState::Disconnected);
                return Err(e);
            }
        };

        tracing::info!("Connected to coordinator: {}", self.connector.url());
        self.transition(SessionState::Listening);

        let result = self.listen(&mut connection).await;
        self.transition(SessionState::Disconnected);

        if let Ok(summary) = &result {
            tracing::warn!(
                "Disconnected by coordinator after {} request(s){}",
                summary.requests,
                match &summary.end {
                    SessionEnd::RemoteClosed { reason: Some(reason) } => format!(": {}", reason),
                    SessionEnd::RemoteClosed { reason: None } => String::new(),
                }
            );
        }

        // Completes the closing handshake, or tears down a broken transport
        if let Err(e) = connection.close().await {
            tracing::debug!("Closing connection failed: {}", e);
        }

        result
    }

    /// The receive/dispatch/reply loop
    async fn listen(
        &mut self,
        connection: &mut ActiveConnection,
    ) -> Result<SessionSummary, ConnectionError> {
        let mut requests = 0u64;

        loop {
            let message = match connection.recv_event().await? {
                ConnectionEvent::Request(message) => message,
                ConnectionEvent::Closed { reason } => {
                    return Ok(SessionSummary {
                        requests,
                        end: SessionEnd::RemoteClosed { reason },
                    })
                }
            };

            tracing::info!("Received command: {}", message.trim());
            self.transition(SessionState::Dispatching);

            let reply = self.dispatcher.dispatch(&message).await;
            if reply.is_error() {
                tracing::debug!("Replying with error: {}", reply);
            }
            connection.send_reply(reply.into_text()).await?;
            requests += 1;

            self.transition(SessionState::Listening);
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::trace!("Session state {} -> {}", self.state, next);
        self.state = next;
    }
}
