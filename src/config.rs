// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Budget for a single request against the API server, `None` for unbounded
    pub request_timeout: Option<Duration>,
    /// How long a discovery snapshot may be reused, zero to always re-query
    pub discovery_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| defaults::LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let request_timeout_secs = parse_secs(
            lookup("REQUEST_TIMEOUT_SECS"),
            defaults::REQUEST_TIMEOUT_SECS,
        )
        .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let discovery_cache_ttl_secs = parse_secs(
            lookup("DISCOVERY_CACHE_TTL_SECS"),
            defaults::DISCOVERY_CACHE_TTL_SECS,
        )
        .context("DISCOVERY_CACHE_TTL_SECS must be a whole number of seconds")?;

        Ok(Config {
            listen_addr,
            request_timeout: (request_timeout_secs > 0)
                .then(|| Duration::from_secs(request_timeout_secs)),
            discovery_cache_ttl: Duration::from_secs(discovery_cache_ttl_secs),
        })
    }
}

fn parse_secs(value: Option<String>, default: u64) -> Result<u64> {
    match value {
        Some(v) => Ok(v.trim().parse()?),
        None => Ok(default),
    }
}
