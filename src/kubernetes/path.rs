// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Absolute API path construction and parsing

use crate::constants::api_paths;
use crate::error::{FacadeError, Result};
use crate::types::{normalize_group, ApiResourceDescriptor};

/// Build the absolute API path for an object of the given type.
///
/// The namespace segment is only emitted for namespaced types; a namespaced
/// type without a namespace falls back to the cluster-scoped form. An empty
/// `name` yields the collection path.
pub fn build_path(descriptor: &ApiResourceDescriptor, namespace: Option<&str>, name: &str) -> String {
    let mut path = match normalize_group(&descriptor.group) {
        "" => format!("/{}/{}", api_paths::CORE, descriptor.version),
        group => format!("/{}/{}/{}", api_paths::GROUPS, group, descriptor.version),
    };

    if let Some(ns) = namespace.filter(|ns| descriptor.namespaced && !ns.is_empty()) {
        path.push_str("/namespaces/");
        path.push_str(ns);
    }

    path.push('/');
    path.push_str(&descriptor.resource);

    if !name.is_empty() {
        path.push('/');
        path.push_str(name);
    }

    path
}

/// Characters that would end or split a path segment once it is placed in a URL
const RESERVED: [char; 3] = ['/', '?', '#'];

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// Check that a caller-supplied namespace or name addresses exactly one path segment
pub fn validate_segment(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || is_dot_segment(value) || value.contains(RESERVED) {
        return Err(FacadeError::InvalidSegment {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// An arbitrary API path split into the parts needed to configure a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPath {
    /// Always starts with `/`
    pub path: String,
    /// Empty for the core group
    pub group: String,
    pub version: String,
}

/// Parse `/api/{version}/...` or `/apis/{group}/{version}/...`
pub fn parse_raw_path(path: &str) -> Result<RawPath> {
    let invalid = |reason: &str| FacadeError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = path.trim_matches('/');
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("expected at least a prefix and a version"));
    }
    if parts.iter().any(|p| is_dot_segment(p)) {
        return Err(invalid("dot segments are not allowed"));
    }
    if parts.iter().any(|p| p.contains(['?', '#'])) {
        return Err(invalid("query and fragment markers are not allowed"));
    }

    let (group, version) = match parts[0] {
        api_paths::GROUPS => {
            if parts.len() < 3 {
                return Err(invalid("expected /apis/{group}/{version}"));
            }
            (parts[1], parts[2])
        }
        api_paths::CORE => ("", parts[1]),
        _ => return Err(invalid("path must start with /api or /apis")),
    };

    Ok(RawPath {
        path: format!("/{}", trimmed),
        group: group.to_string(),
        version: version.to_string(),
    })
}
