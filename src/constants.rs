// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Conventional alias callers use for the unnamed core API group
pub const CORE_GROUP_ALIAS: &str = "core";

/// API path prefixes
pub mod api_paths {
    /// Prefix for the core (legacy) group, e.g. `/api/v1`
    pub const CORE: &str = "api";
    /// Prefix for named groups, e.g. `/apis/apps/v1`
    pub const GROUPS: &str = "apis";
}

/// Media types used for content negotiation
pub mod content_types {
    pub const JSON: &str = "application/json";
    pub const YAML: &str = "application/yaml";
    pub const PROTOBUF: &str = "application/vnd.kubernetes.protobuf";
}

/// Defaults applied when an environment variable is not set
pub mod defaults {
    pub const LISTEN_ADDR: &str = "0.0.0.0:8082";
    /// 0 disables the per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// 0 disables the discovery cache
    pub const DISCOVERY_CACHE_TTL_SECS: u64 = 0;
}
