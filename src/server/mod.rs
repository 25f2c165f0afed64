// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface over the resource-access façade.

pub mod error;
pub mod handlers;

use crate::config::Config;
use crate::context::RequestContext;
use crate::resources::KubeResourceAccess;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

const RESOURCE_ROUTE: &str = "/api/v1/resources/:group/:version/:resource_type/:resource_name";
const NAMESPACED_RESOURCE_ROUTE: &str =
    "/api/v1/namespaces/:namespace/resources/:group/:version/:resource_type/:resource_name";

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    access: Arc<KubeResourceAccess>,
    request_timeout: Option<Duration>,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(access: KubeResourceAccess, config: &Config, shutdown: CancellationToken) -> Self {
        Self {
            access: Arc::new(access),
            request_timeout: config.request_timeout,
            shutdown,
        }
    }

    /// A context canceled on shutdown and bounded by the configured timeout
    pub fn request_context(&self) -> RequestContext {
        let ctx = RequestContext::child_of(&self.shutdown);
        match self.request_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/api/v1/resources", get(handlers::list_api_resources))
        .route(
            RESOURCE_ROUTE,
            get(handlers::get_resource)
                .put(handlers::apply_resource)
                .delete(handlers::delete_resource),
        )
        .route(
            NAMESPACED_RESOURCE_ROUTE,
            get(handlers::get_resource)
                .put(handlers::apply_resource)
                .delete(handlers::delete_resource),
        )
        .route("/api/v1/raw/*path", get(handlers::get_raw_resource))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` is canceled, then drain in-flight requests
pub async fn serve(listener: TcpListener, state: AppState, shutdown: CancellationToken) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
