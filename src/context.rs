// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cancellation and deadline propagation for calls against the API server.

use crate::error::{FacadeError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Carries a cancellation token and an optional deadline through every network call
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context that is canceled whenever `parent` is
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            deadline: None,
        }
    }

    /// Bound every call made with this context to `timeout` from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the context is canceled or its deadline passes first
    pub async fn run<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(FacadeError::Canceled {
                operation: operation.to_string(),
            });
        }

        let guarded = async {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    debug!("{} canceled", operation);
                    Err(FacadeError::Canceled { operation: operation.to_string() })
                }
                res = fut => res,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .unwrap_or_else(|_| {
                    debug!("{} hit its deadline", operation);
                    Err(FacadeError::Timeout {
                        operation: operation.to_string(),
                    })
                }),
            None => guarded.await,
        }
    }
}
