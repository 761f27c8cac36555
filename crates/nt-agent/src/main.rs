//! net-tools Agent Daemon
//!
//! The agent connects to the net-tools coordinator over a WebSocket, runs
//! `ping` / `traceroute` on its behalf and streams the output back. It is
//! meant to run forever under a supervisor (systemd, Docker, ...).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nt_agent::{ProcessRunner, Supervisor};
use nt_core::config::{self, AgentConfig, BackoffConfig, NODE_NAME_ENV};
use nt_core::ConfigError;

#[derive(Parser)]
#[command(name = "nt-agent")]
#[command(about = "net-tools agent - runs ping and traceroute for a remote coordinator")]
#[command(version)]
struct Args {
    /// Node name reported to the coordinator
    #[arg(short, long, env = "NODE_NAME")]
    node: Option<String>,

    /// Coordinator WebSocket endpoint (without the node query parameter)
    #[arg(long, env = "NT_ENDPOINT")]
    endpoint: Option<String>,

    /// Seconds to wait before reconnecting
    #[arg(long)]
    retry_delay: Option<u64>,

    /// Kill diagnostic commands running longer than this many seconds
    #[arg(long)]
    command_timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single session and exit instead of reconnecting
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| args.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("net-tools Agent starting...");

    let config = load_agent_config(&args);
    let runner = ProcessRunner::with_timeout(config.command_timeout);

    let supervisor = match Supervisor::new(config, Arc::new(runner)) {
        Ok(supervisor) => supervisor,
        Err(ConfigError::MissingField(field)) if field == "node_name" => {
            tracing::error!(
                "{} is not set. Start the agent with -e {}=<your-node-name> \
                 or --node <your-node-name>",
                NODE_NAME_ENV,
                NODE_NAME_ENV
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if args.once {
        let summary = supervisor
            .run_once()
            .await
            .context("Session failed")?;
        tracing::info!("Session finished after {} request(s)", summary.requests);
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, shutting down");
            signal_token.cancel();
        }
    });

    supervisor.run(shutdown).await;
    Ok(())
}

/// Defaults, then the config file, then command-line flags and environment
fn load_agent_config(args: &Args) -> AgentConfig {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);

    let mut config = if config_path.exists() {
        config::load_config(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {:?}: {}", config_path, e);
            AgentConfig::default()
        })
    } else {
        AgentConfig::default()
    };

    if let Some(node) = &args.node {
        config.node_name = node.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = args.retry_delay {
        config.backoff = BackoffConfig::fixed(Duration::from_secs(secs));
    }
    if let Some(secs) = args.command_timeout {
        config.command_timeout = (secs > 0).then_some(Duration::from_secs(secs));
    }

    config
}
