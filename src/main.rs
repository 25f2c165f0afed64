// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use kube_facade::config::Config;
use kube_facade::resources::KubeResourceAccess;
use kube_facade::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Kubernetes resource façade");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: listen_addr={}, request_timeout={:?}, discovery_cache_ttl={:?}",
        config.listen_addr, config.request_timeout, config.discovery_cache_ttl
    );

    // Create Kubernetes client
    let access = KubeResourceAccess::try_default(&config).await?;
    info!("Connected to Kubernetes cluster");

    let shutdown = CancellationToken::new();
    let state = AppState::new(access, &config, shutdown.clone());

    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal.cancel();
            }
            Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
        }
    });

    let listener = TcpListener::bind(config.listen_addr).await?;
    server::serve(listener, state, shutdown).await
}
