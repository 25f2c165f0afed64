// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed GET against absolute API paths

use crate::constants::{api_paths, content_types};
use crate::context::RequestContext;
use crate::error::{FacadeError, Result};
use crate::types::{normalize_group, GenericResourceDocument};
use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::Request;
use kube::core::GroupVersion;
use kube::Client;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Per-request settings layered on top of the shared client.
///
/// Host, credentials and TLS live in the [`Client`]; this carries what
/// changes between requests. The executor's base value is never mutated,
/// each request works on its own clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    pub api_path: String,
    pub group_version: Option<GroupVersion>,
    pub content_type: String,
    pub accept: String,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        Self {
            api_path: api_paths::CORE.to_string(),
            group_version: None,
            content_type: content_types::JSON.to_string(),
            accept: format!("{}, {}", content_types::PROTOBUF, content_types::JSON),
        }
    }
}

impl ClientConfiguration {
    /// Clone this configuration and bind the clone to a group-version, forcing JSON
    pub fn for_group_version(&self, group: &str, version: &str) -> Self {
        let group = normalize_group(group);
        let mut config = self.clone();
        config.api_path = if group.is_empty() {
            api_paths::CORE
        } else {
            api_paths::GROUPS
        }
        .to_string();
        config.group_version = Some(GroupVersion::gv(group, version));
        config.content_type = content_types::JSON.to_string();
        config.accept = content_types::JSON.to_string();
        config
    }

    /// `/{api_path}/{group_version}` once bound to a group-version
    pub fn base_path(&self) -> Option<String> {
        self.group_version
            .as_ref()
            .map(|gv| format!("/{}/{}", self.api_path, gv.api_version()))
    }

    /// Whether `path` lies under this configuration's group-version
    pub fn covers(&self, path: &str) -> bool {
        match self.base_path() {
            Some(base) => path
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
            None => true,
        }
    }

    /// Build a GET for `path` carrying this configuration's negotiation headers
    pub fn get_request(&self, path: &str) -> std::result::Result<Request<Vec<u8>>, http::Error> {
        Request::get(path)
            .header(ACCEPT, &self.accept)
            .header(CONTENT_TYPE, &self.content_type)
            .body(vec![])
    }
}

/// Issues GETs for single documents
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// The configuration every request starts from
    fn base_config(&self) -> &ClientConfiguration;

    async fn fetch(
        &self,
        ctx: &RequestContext,
        config: ClientConfiguration,
        path: &str,
    ) -> Result<GenericResourceDocument>;

    /// A fresh configuration for `group`/`version`, derived from the base
    fn configure(&self, group: &str, version: &str) -> ClientConfiguration {
        self.base_config().for_group_version(group, version)
    }
}

#[async_trait]
impl<T: ResourceFetcher + ?Sized> ResourceFetcher for Arc<T> {
    fn base_config(&self) -> &ClientConfiguration {
        (**self).base_config()
    }

    async fn fetch(
        &self,
        ctx: &RequestContext,
        config: ClientConfiguration,
        path: &str,
    ) -> Result<GenericResourceDocument> {
        (**self).fetch(ctx, config, path).await
    }
}

/// Fetches documents through a shared kube [`Client`]
#[derive(Clone)]
pub struct KubeRestExecutor {
    client: Client,
    base: ClientConfiguration,
}

impl KubeRestExecutor {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, ClientConfiguration::default())
    }

    pub fn with_config(client: Client, base: ClientConfiguration) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl ResourceFetcher for KubeRestExecutor {
    fn base_config(&self) -> &ClientConfiguration {
        &self.base
    }

    #[instrument(skip(self, ctx, config))]
    async fn fetch(
        &self,
        ctx: &RequestContext,
        config: ClientConfiguration,
        path: &str,
    ) -> Result<GenericResourceDocument> {
        let fetch_error = |source| FacadeError::ResourceFetchError {
            target: path.to_string(),
            source,
        };

        if !config.covers(path) {
            return Err(FacadeError::InvalidPath {
                path: path.to_string(),
                reason: format!("not under {}", config.base_path().unwrap_or_default()),
            });
        }

        let request = config
            .get_request(path)
            .map_err(|e| fetch_error(kube::Error::HttpError(e)))?;

        debug!("GET {} (accept: {})", path, config.accept);
        ctx.run("fetch resource", async {
            self.client
                .request::<GenericResourceDocument>(request)
                .await
                .map_err(fetch_error)
        })
        .await
    }
}
