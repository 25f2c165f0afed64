// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes plumbing: discovery, path building, typed GET and dynamic mutation.

pub mod discovery;
pub mod dynamic;
pub mod path;
pub mod rest;

pub use discovery::{ApiDiscovery, CachedDiscovery, ServerDiscovery};
pub use dynamic::{DynamicExecutor, ResourceMutator};
pub use path::{build_path, parse_raw_path, validate_segment, RawPath};
pub use rest::{ClientConfiguration, KubeRestExecutor, ResourceFetcher};
