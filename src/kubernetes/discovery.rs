// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API resource type discovery

use crate::context::RequestContext;
use crate::error::{FacadeError, Result};
use crate::types::ApiResourceDescriptor;
use async_trait::async_trait;
use futures::future::try_join_all;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Source of the resource types currently served by the cluster
#[async_trait]
pub trait ApiDiscovery: Send + Sync {
    async fn api_resources(&self, ctx: &RequestContext) -> Result<Vec<ApiResourceDescriptor>>;
}

#[async_trait]
impl<T: ApiDiscovery + ?Sized> ApiDiscovery for Arc<T> {
    async fn api_resources(&self, ctx: &RequestContext) -> Result<Vec<ApiResourceDescriptor>> {
        (**self).api_resources(ctx).await
    }
}

/// Queries the API server's discovery endpoints on every call
#[derive(Clone)]
pub struct ServerDiscovery {
    client: Client,
}

impl ServerDiscovery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every served group-version, core versions first
    async fn group_versions(&self) -> kube::Result<Vec<String>> {
        let core = self.client.list_core_api_versions().await?;
        let groups = self.client.list_api_groups().await?;

        let mut group_versions = core.versions;
        group_versions.extend(
            groups
                .groups
                .into_iter()
                .flat_map(|group| group.versions.into_iter().map(|v| v.group_version)),
        );
        Ok(group_versions)
    }

    async fn resource_list(&self, group_version: &str) -> kube::Result<APIResourceList> {
        if group_version.contains('/') {
            self.client.list_api_group_resources(group_version).await
        } else {
            self.client.list_core_api_resources(group_version).await
        }
    }
}

#[async_trait]
impl ApiDiscovery for ServerDiscovery {
    #[instrument(skip(self, ctx))]
    async fn api_resources(&self, ctx: &RequestContext) -> Result<Vec<ApiResourceDescriptor>> {
        let lists = ctx
            .run("API discovery", async {
                let group_versions = self
                    .group_versions()
                    .await
                    .map_err(|source| FacadeError::DiscoveryError { source })?;
                debug!("Discovered {} group versions", group_versions.len());

                try_join_all(group_versions.iter().map(|gv| self.resource_list(gv)))
                    .await
                    .map_err(|source| FacadeError::DiscoveryError { source })
            })
            .await?;

        let resources: Vec<_> = lists.into_iter().flat_map(descriptors_from_list).collect();
        info!("Discovered {} API resource types", resources.len());
        Ok(resources)
    }
}

/// Split `apps/v1` into `("apps", "v1")` and `v1` into `("", "v1")`
pub fn split_group_version(group_version: &str) -> (&str, &str) {
    group_version.split_once('/').unwrap_or(("", group_version))
}

/// Convert one discovery document, dropping sub-resources such as `pods/status`
pub fn descriptors_from_list(list: APIResourceList) -> Vec<ApiResourceDescriptor> {
    let (group, version) = split_group_version(&list.group_version);

    list.resources
        .into_iter()
        .filter(|r| !r.name.contains('/'))
        .map(|r| ApiResourceDescriptor {
            group: group.to_string(),
            version: version.to_string(),
            resource: r.name,
            kind: r.kind,
            namespaced: r.namespaced,
        })
        .collect()
}

struct Snapshot {
    taken_at: Instant,
    resources: Vec<ApiResourceDescriptor>,
}

/// Reuses a discovery snapshot for up to `ttl`; a zero `ttl` forwards every call
pub struct CachedDiscovery<D> {
    inner: D,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<D: ApiDiscovery> CachedDiscovery<D> {
    pub fn new(inner: D, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Drop the current snapshot so the next call re-queries
    pub async fn invalidate(&self) {
        if self.snapshot.write().await.take().is_some() {
            debug!("Discovery snapshot invalidated");
        }
    }
}

#[async_trait]
impl<D: ApiDiscovery> ApiDiscovery for CachedDiscovery<D> {
    async fn api_resources(&self, ctx: &RequestContext) -> Result<Vec<ApiResourceDescriptor>> {
        if self.ttl.is_zero() {
            return self.inner.api_resources(ctx).await;
        }

        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            if snapshot.taken_at.elapsed() < self.ttl {
                debug!("Serving discovery snapshot ({} types)", snapshot.resources.len());
                return Ok(snapshot.resources.clone());
            }
        }

        let resources = self.inner.api_resources(ctx).await?;
        *self.snapshot.write().await = Some(Snapshot {
            taken_at: Instant::now(),
            resources: resources.clone(),
        });
        Ok(resources)
    }
}
