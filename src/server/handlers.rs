// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP handlers for the resource endpoints

use super::AppState;
use crate::constants::content_types;
use crate::error::FacadeError;
use crate::types::{GenericResourceDocument, ResourceIdentity};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

/// Path parameters shared by the cluster-scoped and namespaced routes
#[derive(Debug, Deserialize)]
pub struct ResourcePath {
    #[serde(default)]
    pub namespace: Option<String>,
    pub group: String,
    pub version: String,
    pub resource_type: String,
    pub resource_name: String,
}

impl ResourcePath {
    fn identity(&self) -> ResourceIdentity {
        ResourceIdentity::new(
            self.namespace.as_deref(),
            &self.group,
            &self.version,
            &self.resource_type,
            &self.resource_name,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputQuery {
    /// `yaml` renders the body as YAML, anything else as JSON
    pub output: Option<String>,
}

impl OutputQuery {
    fn wants_yaml(&self) -> bool {
        self.output.as_deref() == Some("yaml")
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn ready() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}

pub async fn list_api_resources(
    State(state): State<AppState>,
    Query(query): Query<OutputQuery>,
) -> Result<Response, FacadeError> {
    let resources = state
        .access
        .list_api_resource_types(&state.request_context())
        .await?;
    Ok(render(&resources, &query))
}

pub async fn get_resource(
    State(state): State<AppState>,
    Path(path): Path<ResourcePath>,
    Query(query): Query<OutputQuery>,
) -> Result<Response, FacadeError> {
    let document = state
        .access
        .get_resource(&state.request_context(), &path.identity())
        .await?;
    Ok(render(&document, &query))
}

pub async fn apply_resource(
    State(state): State<AppState>,
    Path(path): Path<ResourcePath>,
    body: Result<Json<GenericResourceDocument>, JsonRejection>,
) -> Result<Json<Value>, FacadeError> {
    let identity = path.identity();
    let Json(document) = body.map_err(|rejection| FacadeError::InvalidDocument {
        target: identity.to_string(),
        reason: rejection.body_text(),
    })?;

    state
        .access
        .apply_resource(&state.request_context(), &identity, document)
        .await?;
    Ok(Json(json!({ "message": "Resource updated successfully" })))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Path(path): Path<ResourcePath>,
) -> Result<Json<Value>, FacadeError> {
    state
        .access
        .delete_resource(&state.request_context(), &path.identity())
        .await?;
    Ok(Json(json!({
        "message": format!(
            "Resource {}/{} deleted successfully",
            path.resource_type, path.resource_name
        )
    })))
}

pub async fn get_raw_resource(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<OutputQuery>,
) -> Result<Response, FacadeError> {
    let document = state
        .access
        .get_raw_resource(&state.request_context(), &format!("/{}", path))
        .await?;
    Ok(render(&document, &query))
}

/// Serialize `value` as JSON, or as YAML when asked to
fn render<T: Serialize>(value: &T, query: &OutputQuery) -> Response {
    if !query.wants_yaml() {
        return Json(value).into_response();
    }

    match serde_yaml::to_string(value) {
        Ok(yaml) => ([(header::CONTENT_TYPE, content_types::YAML)], yaml).into_response(),
        Err(e) => {
            error!("Failed to convert to yaml: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("failed to convert to yaml: {}", e) })),
            )
                .into_response()
        }
    }
}
