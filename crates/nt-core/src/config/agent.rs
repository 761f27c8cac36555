//! Agent configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::backoff::BackoffConfig;
use super::serde_utils::{duration_secs, option_duration_secs};
use crate::error::ConfigError;
use crate::types::{NodeId, OsFamily};

/// Coordinator WebSocket endpoint, without the `node` query parameter
pub const DEFAULT_ENDPOINT: &str = "wss://api.redbean0721.com/api/net-tools/websocket";

/// Upper bound on any configured reconnect delay
pub const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Environment variable carrying the node identity
pub const NODE_NAME_ENV: &str = "NODE_NAME";

/// Configuration for the diagnostic agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Node identity reported to the coordinator. Required.
    pub node_name: String,

    /// Base URL of the coordinator endpoint
    pub endpoint: String,

    /// Delay policy between session attempts
    pub backoff: BackoffConfig,

    /// Limit on the opening handshake
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,

    /// Limit on a single diagnostic command. `None` waits forever.
    #[serde(with = "option_duration_secs")]
    pub command_timeout: Option<Duration>,

    /// Interval of WebSocket pings while waiting for requests
    #[serde(with = "option_duration_secs")]
    pub keepalive_interval: Option<Duration>,

    /// Override of the detected OS family
    pub os_family: Option<OsFamily>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            node_name: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            backoff: BackoffConfig::default(),
            connect_timeout: Duration::from_secs(10),
            command_timeout: None,
            keepalive_interval: Some(Duration::from_secs(20)),
            os_family: None,
        }
    }
}

impl AgentConfig {
    /// Resolve the node identity, failing when it is unset
    pub fn node_id(&self) -> Result<NodeId, ConfigError> {
        NodeId::new(self.node_name.clone())
            .ok_or_else(|| ConfigError::MissingField("node_name".to_string()))
    }

    /// OS family used to translate commands
    pub fn os_family(&self) -> OsFamily {
        self.os_family.unwrap_or_else(OsFamily::detect)
    }

    /// Build the endpoint URL carrying the node identity as `?node=`
    pub fn endpoint_url(&self, node: &NodeId) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::Invalid(format!("endpoint {:?}: {}", self.endpoint, e)))?;

        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "endpoint scheme must be ws or wss, got {:?}",
                    other
                )))
            }
        }

        url.query_pairs_mut().append_pair("node", node.as_str());
        Ok(url)
    }

    /// Check the configuration before any connection is attempted
    pub fn validate(&self) -> Result<(), ConfigError> {
        let node = self.node_id()?;
        self.endpoint_url(&node)?;

        if !self.backoff.multiplier.is_finite() || self.backoff.multiplier < 1.0 {
            return Err(ConfigError::Invalid(
                "backoff.multiplier must be a finite number of at least 1.0".to_string(),
            ));
        }
        if self.backoff.initial > self.backoff.max {
            return Err(ConfigError::Invalid(
                "backoff.initial must not exceed backoff.max".to_string(),
            ));
        }
        if self.backoff.max > MAX_BACKOFF_DELAY {
            return Err(ConfigError::Invalid(format!(
                "backoff.max must be at most {}s",
                MAX_BACKOFF_DELAY.as_secs()
            )));
        }
        if !(0.0..=1.0).contains(&self.backoff.jitter) {
            return Err(ConfigError::Invalid(
                "backoff.jitter must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}
