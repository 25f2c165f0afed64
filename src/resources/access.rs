// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Entry point for generic get, apply and delete of cluster resources

use crate::config::Config;
use crate::context::RequestContext;
use crate::error::{FacadeError, Result};
use crate::kubernetes::{
    parse_raw_path, validate_segment, ApiDiscovery, CachedDiscovery, DynamicExecutor,
    KubeRestExecutor, ResourceFetcher, ResourceMutator, ServerDiscovery,
};
use crate::types::{
    ApiResourceDescriptor, GenericResourceDocument, ResolvedResource, ResourceIdentity,
};
use kube::Client;
use tracing::{debug, instrument};

/// The façade wired to a live cluster
pub type KubeResourceAccess =
    ResourceAccess<CachedDiscovery<ServerDiscovery>, KubeRestExecutor, DynamicExecutor>;

/// Resolves caller identities against discovery before touching any resource.
///
/// Get, apply and delete all validate the identity first. A namespace or
/// name that is not a single path segment is rejected before discovery runs.
/// An undiscovered type or a namespaced type without a namespace is rejected
/// without a request for the resource itself.
pub struct ResourceAccess<D, F, M> {
    discovery: D,
    fetcher: F,
    mutator: M,
}

impl KubeResourceAccess {
    /// Connect using the inferred kubeconfig or in-cluster environment
    pub async fn try_default(config: &Config) -> Result<Self> {
        let client = Client::try_default().await?;
        Ok(Self::from_client(client, config))
    }

    pub fn from_client(client: Client, config: &Config) -> Self {
        ResourceAccess::new(
            CachedDiscovery::new(ServerDiscovery::new(client.clone()), config.discovery_cache_ttl),
            KubeRestExecutor::new(client.clone()),
            DynamicExecutor::new(client),
        )
    }
}

impl<D, F, M> ResourceAccess<D, F, M>
where
    D: ApiDiscovery,
    F: ResourceFetcher,
    M: ResourceMutator,
{
    pub fn new(discovery: D, fetcher: F, mutator: M) -> Self {
        Self {
            discovery,
            fetcher,
            mutator,
        }
    }

    /// All resource types the cluster currently serves, sub-resources excluded
    pub async fn list_api_resource_types(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ApiResourceDescriptor>> {
        self.discovery.api_resources(ctx).await
    }

    #[instrument(skip(self, ctx, identity), fields(resource = %identity))]
    pub async fn get_resource(
        &self,
        ctx: &RequestContext,
        identity: &ResourceIdentity,
    ) -> Result<GenericResourceDocument> {
        let resolved = self.resolve(ctx, identity).await?;
        let path = resolved.path();
        let config = self
            .fetcher
            .configure(&resolved.descriptor.group, &resolved.descriptor.version);

        debug!("Fetching {}", path);
        self.fetcher.fetch(ctx, config, &path).await
    }

    /// Replace an existing object with `document`. Update-only: a missing
    /// object is reported as a failure rather than created.
    #[instrument(skip(self, ctx, identity, document), fields(resource = %identity))]
    pub async fn apply_resource(
        &self,
        ctx: &RequestContext,
        identity: &ResourceIdentity,
        document: GenericResourceDocument,
    ) -> Result<()> {
        let resolved = self.resolve(ctx, identity).await?;
        self.mutator.update(ctx, &resolved, document).await
    }

    #[instrument(skip(self, ctx, identity), fields(resource = %identity))]
    pub async fn delete_resource(
        &self,
        ctx: &RequestContext,
        identity: &ResourceIdentity,
    ) -> Result<()> {
        let resolved = self.resolve(ctx, identity).await?;
        self.mutator.delete(ctx, &resolved).await
    }

    /// GET an arbitrary `/api/...` or `/apis/...` path
    #[instrument(skip(self, ctx))]
    pub async fn get_raw_resource(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<GenericResourceDocument> {
        let raw = parse_raw_path(path)?;
        let config = self.fetcher.configure(&raw.group, &raw.version);
        self.fetcher.fetch(ctx, config, &raw.path).await
    }

    async fn resolve(
        &self,
        ctx: &RequestContext,
        identity: &ResourceIdentity,
    ) -> Result<ResolvedResource> {
        if let Some(ns) = &identity.namespace {
            validate_segment("namespace", ns)?;
        }
        validate_segment("name", &identity.resource_name)?;

        let resources = self.discovery.api_resources(ctx).await?;

        let descriptor = find_descriptor(
            &resources,
            &identity.group,
            &identity.version,
            &identity.resource_type,
        )
        .ok_or_else(|| FacadeError::ResourceTypeNotFound {
            api_version: identity.api_version(),
            resource: identity.resource_type.clone(),
        })?;

        let namespace = effective_namespace(descriptor, identity.namespace.as_deref())?;

        Ok(ResolvedResource {
            descriptor: descriptor.clone(),
            namespace,
            name: identity.resource_name.clone(),
        })
    }
}

/// Exact match on (group, version, resource); `core` matches the empty group
pub fn find_descriptor<'a>(
    resources: &'a [ApiResourceDescriptor],
    group: &str,
    version: &str,
    resource: &str,
) -> Option<&'a ApiResourceDescriptor> {
    resources.iter().find(|d| d.matches(group, version, resource))
}

/// The namespace to address: the caller's for namespaced types, none otherwise
pub fn effective_namespace(
    descriptor: &ApiResourceDescriptor,
    namespace: Option<&str>,
) -> Result<Option<String>> {
    if !descriptor.namespaced {
        return Ok(None);
    }

    match namespace.filter(|ns| !ns.is_empty()) {
        Some(ns) => Ok(Some(ns.to_string())),
        None => Err(FacadeError::MissingNamespace {
            resource: format!("{}/{}", descriptor.api_version(), descriptor.resource),
        }),
    }
}
