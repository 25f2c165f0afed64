// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to discover API resources: {source}")]
    DiscoveryError {
        #[source]
        source: kube::Error,
    },

    #[error("Resource type {resource} not found in {api_version}")]
    ResourceTypeNotFound { api_version: String, resource: String },

    #[error("Resource type {resource} is namespaced but no namespace was given")]
    MissingNamespace { resource: String },

    #[error("Failed to get resource {target}: {source}")]
    ResourceFetchError {
        target: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to update resource {target}: {source}")]
    ResourceUpdateError {
        target: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to delete resource {target}: {source}")]
    ResourceDeleteError {
        target: String,
        #[source]
        source: kube::Error,
    },

    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid {field} {value:?}: must be a single non-empty path segment")]
    InvalidSegment { field: String, value: String },

    #[error("Invalid document for {target}: {reason}")]
    InvalidDocument { target: String, reason: String },

    #[error("{operation} was canceled")]
    Canceled { operation: String },

    #[error("{operation} timed out")]
    Timeout { operation: String },
}

impl FacadeError {
    /// Status code returned by the API server, if the failure came from one
    pub fn api_status(&self) -> Option<u16> {
        let source = match self {
            FacadeError::KubeError(source)
            | FacadeError::DiscoveryError { source }
            | FacadeError::ResourceFetchError { source, .. }
            | FacadeError::ResourceUpdateError { source, .. }
            | FacadeError::ResourceDeleteError { source, .. } => source,
            _ => return None,
        };
        match source {
            kube::Error::Api(response) => Some(response.code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FacadeError::ResourceTypeNotFound { .. }) || self.api_status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, FacadeError>;
