// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mapping of façade errors onto HTTP responses

use crate::error::FacadeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Non-standard status used when the caller went away before we finished
const CLIENT_CLOSED_REQUEST: u16 = 499;

pub fn status_for(err: &FacadeError) -> StatusCode {
    match err {
        FacadeError::ResourceTypeNotFound { .. } => StatusCode::NOT_FOUND,
        FacadeError::MissingNamespace { .. }
        | FacadeError::InvalidPath { .. }
        | FacadeError::InvalidSegment { .. }
        | FacadeError::InvalidDocument { .. } => StatusCode::BAD_REQUEST,
        FacadeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        FacadeError::Canceled { .. } => StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
            .unwrap_or(StatusCode::SERVICE_UNAVAILABLE),
        FacadeError::ResourceFetchError { .. }
        | FacadeError::ResourceUpdateError { .. }
        | FacadeError::ResourceDeleteError { .. } => err
            .api_status()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        FacadeError::DiscoveryError { .. } | FacadeError::KubeError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for FacadeError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
