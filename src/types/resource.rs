// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::CORE_GROUP_ALIAS;
use crate::kubernetes::path::build_path;
use kube::core::GroupVersionKind;
use kube::discovery::ApiResource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A full Kubernetes manifest, passed through without schema validation
pub type GenericResourceDocument = serde_json::Map<String, serde_json::Value>;

/// Map the conventional `core` alias onto the empty core group name
pub fn normalize_group(group: &str) -> &str {
    if group == CORE_GROUP_ALIAS {
        ""
    } else {
        group
    }
}

/// `v1` for the core group, `group/version` otherwise
pub fn api_version(group: &str, version: &str) -> String {
    match normalize_group(group) {
        "" => version.to_string(),
        group => format!("{}/{}", group, version),
    }
}

/// One resource type served by the API server, as reported by discovery
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceDescriptor {
    /// Empty for the core group
    pub group: String,
    pub version: String,
    /// Plural name used in URLs, e.g. `deployments`
    pub resource: String,
    pub kind: String,
    pub namespaced: bool,
}

impl ApiResourceDescriptor {
    pub fn api_version(&self) -> String {
        api_version(&self.group, &self.version)
    }

    /// Exact match on the (group, version, resource) key
    pub fn matches(&self, group: &str, version: &str, resource: &str) -> bool {
        normalize_group(&self.group) == normalize_group(group)
            && self.version == version
            && self.resource == resource
    }

    /// Describe this type for kube's dynamic API
    pub fn to_api_resource(&self) -> ApiResource {
        let gvk = GroupVersionKind::gvk(normalize_group(&self.group), &self.version, &self.kind);
        ApiResource::from_gvk_with_plural(&gvk, &self.resource)
    }
}

/// Caller-supplied coordinates of a single object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub namespace: Option<String>,
    pub group: String,
    pub version: String,
    pub resource_type: String,
    pub resource_name: String,
}

impl ResourceIdentity {
    pub fn new(
        namespace: Option<&str>,
        group: &str,
        version: &str,
        resource_type: &str,
        resource_name: &str,
    ) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            group: normalize_group(group).to_string(),
            version: version.to_string(),
            resource_type: resource_type.to_string(),
            resource_name: resource_name.to_string(),
        }
    }

    pub fn api_version(&self) -> String {
        api_version(&self.group, &self.version)
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.resource_type)?;
        if let Some(ns) = &self.namespace {
            write!(f, "/{}", ns)?;
        }
        write!(f, "/{}", self.resource_name)
    }
}

/// An identity matched against discovery, with its effective scope settled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedResource {
    pub descriptor: ApiResourceDescriptor,
    /// `None` for cluster-scoped types, whatever the caller passed
    pub namespace: Option<String>,
    pub name: String,
}

impl ResolvedResource {
    pub fn path(&self) -> String {
        build_path(&self.descriptor, self.namespace.as_deref(), &self.name)
    }
}

impl fmt::Display for ResolvedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.descriptor.api_version(), self.descriptor.resource)?;
        if let Some(ns) = &self.namespace {
            write!(f, "/{}", ns)?;
        }
        write!(f, "/{}", self.name)
    }
}
