// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Update and delete of arbitrary resources through kube's dynamic API

use crate::context::RequestContext;
use crate::error::{FacadeError, Result};
use crate::types::{GenericResourceDocument, ResolvedResource};
use async_trait::async_trait;
use kube::{
    api::{DeleteParams, DynamicObject, PostParams},
    discovery::ApiResource,
    Api, Client, ResourceExt,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Writes to resources resolved against discovery
#[async_trait]
pub trait ResourceMutator: Send + Sync {
    /// Replace an existing object; this never creates one
    async fn update(
        &self,
        ctx: &RequestContext,
        target: &ResolvedResource,
        document: GenericResourceDocument,
    ) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, target: &ResolvedResource) -> Result<()>;
}

#[async_trait]
impl<T: ResourceMutator + ?Sized> ResourceMutator for Arc<T> {
    async fn update(
        &self,
        ctx: &RequestContext,
        target: &ResolvedResource,
        document: GenericResourceDocument,
    ) -> Result<()> {
        (**self).update(ctx, target, document).await
    }

    async fn delete(&self, ctx: &RequestContext, target: &ResolvedResource) -> Result<()> {
        (**self).delete(ctx, target).await
    }
}

/// Mutates unstructured objects through a shared kube [`Client`]
#[derive(Clone)]
pub struct DynamicExecutor {
    client: Client,
}

impl DynamicExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, resource: &ApiResource, namespace: Option<&str>) -> Api<DynamicObject> {
        match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, resource),
            None => Api::all_with(self.client.clone(), resource),
        }
    }
}

#[async_trait]
impl ResourceMutator for DynamicExecutor {
    #[instrument(skip(self, ctx, target, document), fields(target = %target))]
    async fn update(
        &self,
        ctx: &RequestContext,
        target: &ResolvedResource,
        document: GenericResourceDocument,
    ) -> Result<()> {
        let update_error = |source| FacadeError::ResourceUpdateError {
            target: target.to_string(),
            source,
        };

        let object: DynamicObject = serde_json::from_value(serde_json::Value::Object(document))
            .map_err(|e| FacadeError::InvalidDocument {
                target: target.to_string(),
                reason: e.to_string(),
            })?;

        let api = self.api(&target.descriptor.to_api_resource(), target.namespace.as_deref());
        ctx.run("update resource", async {
            api.replace(&target.name, &PostParams::default(), &object)
                .await
                .map_err(update_error)
        })
        .await?;

        info!("Updated {} {}", target.descriptor.kind, target.name);
        Ok(())
    }

    #[instrument(skip(self, ctx, target), fields(target = %target))]
    async fn delete(&self, ctx: &RequestContext, target: &ResolvedResource) -> Result<()> {
        let resource = target.descriptor.to_api_resource();

        // Only name and namespace are needed to address the object
        let mut object = DynamicObject::new(&target.name, &resource);
        if let Some(ns) = &target.namespace {
            object = object.within(ns);
        }

        let api = self.api(&resource, object.namespace().as_deref());
        ctx.run("delete resource", async {
            api.delete(&object.name_any(), &DeleteParams::default())
                .await
                .map_err(|source| FacadeError::ResourceDeleteError {
                    target: target.to_string(),
                    source,
                })
        })
        .await?;

        info!("Deleted {} {}", target.descriptor.kind, target.name);
        Ok(())
    }
}
