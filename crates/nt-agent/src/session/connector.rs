//! Outbound WebSocket connector
//!
//! Opens the duplex connection to the coordinator and turns the raw frame
//! stream into request/close events.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::error::ProtocolError as WsProtocolError;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use nt_core::config::AgentConfig;
use nt_core::{ConfigError, ConnectionError, NodeId};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens connections to the coordinator endpoint
#[derive(Debug, Clone)]
pub struct Connector {
    /// Endpoint including the `node` query parameter
    url: Url,
    /// Limit on the opening handshake
    connect_timeout: Duration,
    /// Ping interval while idle
    keepalive: Option<Duration>,
}

impl Connector {
    /// Create a connector for this node from the agent configuration
    pub fn new(config: &AgentConfig, node: &NodeId) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.endpoint_url(node)?,
            connect_timeout: config.connect_timeout,
            keepalive: config.keepalive_interval,
        })
    }

    /// Endpoint this connector dials
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Open a connection. Does not retry; the caller owns the retry policy.
    pub async fn connect(&self) -> Result<ActiveConnection, ConnectionError> {
        tracing::debug!("Connecting to {}", self.url);

        let (stream, response) =
            tokio::time::timeout(self.connect_timeout, connect_async(self.url.as_str()))
                .await
                .map_err(|_| ConnectionError::Timeout {
                    url: self.url.to_string(),
                    after: self.connect_timeout,
                })?
                .map_err(|e| ConnectionError::Handshake {
                    url: self.url.to_string(),
                    reason: e.to_string(),
                })?;

        tracing::debug!("Handshake complete: HTTP {}", response.status());

        Ok(ActiveConnection {
            stream,
            keepalive: self.keepalive,
        })
    }
}

/// Events read from an established connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A request message, as text
    Request(String),
    /// The coordinator closed the connection
    Closed { reason: Option<String> },
}

/// An established connection to the coordinator
pub struct ActiveConnection {
    stream: WsStream,
    keepalive: Option<Duration>,
}

impl ActiveConnection {
    /// Wait for the next request or the end of the connection.
    ///
    /// Control frames are consumed here. Binary frames are decoded as UTF-8
    /// and treated like text.
    pub async fn recv_event(&mut self) -> Result<ConnectionEvent, ConnectionError> {
        loop {
            let next = match self.keepalive {
                Some(period) => match tokio::time::timeout(period, self.stream.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::trace!("Idle for {:?}, sending keepalive ping", period);
                        self.stream
                            .send(Message::Ping(Vec::new()))
                            .await
                            .map_err(|e| ConnectionError::Transport(e.to_string()))?;
                        continue;
                    }
                },
                None => self.stream.next().await,
            };

            match next {
                None => return Ok(ConnectionEvent::Closed { reason: None }),
                Some(Ok(Message::Text(text))) => return Ok(ConnectionEvent::Request(text)),
                Some(Ok(Message::Binary(data))) => {
                    return Ok(ConnectionEvent::Request(
                        String::from_utf8_lossy(&data).into_owned(),
                    ))
                }
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.into_owned())
                        .filter(|r| !r.is_empty());
                    return Ok(ConnectionEvent::Closed { reason });
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Err(e)) if is_remote_close(&e) => {
                    return Ok(ConnectionEvent::Closed {
                        reason: Some(e.to_string()),
                    })
                }
                Some(Err(e)) => return Err(ConnectionError::Transport(e.to_string())),
            }
        }
    }

    /// Send one reply
    pub async fn send_reply(&mut self, text: String) -> Result<(), ConnectionError> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| ConnectionError::Transport(e.to_string()))
    }

    /// Close the connection from our side
    pub async fn close(mut self) -> Result<(), ConnectionError> {
        match self.stream.close(None).await {
            Ok(()) => Ok(()),
            Err(e) if is_remote_close(&e) => Ok(()),
            Err(e) => Err(ConnectionError::Transport(e.to_string())),
        }
    }
}

/// Whether a transport error means the peer went away
fn is_remote_close(err: &WsError) -> bool {
    matches!(
        err,
        WsError::ConnectionClosed
            | WsError::AlreadyClosed
            | WsError::Protocol(WsProtocolError::ResetWithoutClosingHandshake)
    )
}
