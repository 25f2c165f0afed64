// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a fake API server and stub implementations of the executor seams.

use crate::context::RequestContext;
use crate::error::{FacadeError, Result};
use crate::kubernetes::{ApiDiscovery, ClientConfiguration, ResourceFetcher, ResourceMutator};
use crate::types::{ApiResourceDescriptor, GenericResourceDocument, ResolvedResource};
use async_trait::async_trait;
use http::header::ACCEPT;
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request seen by [`FakeApiServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub accept: Option<String>,
}

#[derive(Default)]
struct ServerState {
    routes: HashMap<(String, String), (u16, String)>,
    objects: HashMap<String, Value>,
    requests: Vec<RecordedRequest>,
}

/// An in-memory API server.
///
/// Canned routes answer exact-path GETs (discovery documents). Objects
/// registered with [`FakeApiServer::with_object`] can be read, replaced with
/// PUT and removed with DELETE; anything else is a 404 `Status`.
#[derive(Clone, Default)]
pub struct FakeApiServer {
    state: Arc<Mutex<ServerState>>,
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET requests for exactly `path`
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().routes.insert(
            ("GET".to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    pub fn without_route(self, method: &str, path: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .remove(&(method.to_string(), path.to_string()));
        self
    }

    /// Store an existing object at `path`
    pub fn with_object(self, path: &str, object: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(path.to_string(), object);
        self
    }

    pub fn object(&self, path: &str) -> Option<Value> {
        self.state.lock().unwrap().objects.get(path).cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Build a kube Client from this fake server
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn handle(&self, method: &str, path: &str, body: &[u8]) -> (u16, String) {
        let mut state = self.state.lock().unwrap();

        match method {
            "GET" => {
                if let Some(object) = state.objects.get(path) {
                    return (200, object.to_string());
                }
                state
                    .routes
                    .get(&(method.to_string(), path.to_string()))
                    .cloned()
                    .unwrap_or_else(|| (404, not_found_json(path)))
            }
            "PUT" if state.objects.contains_key(path) => match serde_json::from_slice::<Value>(body) {
                Ok(object) => {
                    state.objects.insert(path.to_string(), object.clone());
                    (200, object.to_string())
                }
                Err(e) => (400, bad_request_json(&e.to_string())),
            },
            "DELETE" => match state.objects.remove(path) {
                Some(object) => (200, object.to_string()),
                None => (404, not_found_json(path)),
            },
            _ => (404, not_found_json(path)),
        }
    }
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let accept = req
            .headers()
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        self.state.lock().unwrap().requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            accept,
        });

        let server = self.clone();
        Box::pin(async move {
            let body = req.into_body().collect().await?.to_bytes();
            let (status, body) = server.handle(&method, &path, &body);

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))?)
        })
    }
}

/// A 404 `Status` document
pub fn not_found_json(path: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

fn bad_request_json(message: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": "BadRequest",
        "code": 400
    })
    .to_string()
}

fn resource_list_json(group_version: &str, resources: &[(&str, &str, bool)]) -> String {
    json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": group_version,
        "resources": resources.iter().map(|(name, kind, namespaced)| json!({
            "name": name,
            "singularName": "",
            "kind": kind,
            "namespaced": namespaced,
            "verbs": ["get", "list", "update", "delete"]
        })).collect::<Vec<_>>()
    })
    .to_string()
}

/// Register discovery documents for a small cluster: core v1, apps/v1,
/// storage.k8s.io/v1 and autoscaling v2 + v1
pub fn discovery_fixture(server: FakeApiServer) -> FakeApiServer {
    let api_versions = json!({
        "kind": "APIVersions",
        "apiVersion": "v1",
        "versions": ["v1"],
        "serverAddressByClientCIDRs": []
    });
    let group = |name: &str, versions: &[&str]| {
        json!({
            "name": name,
            "versions": versions.iter().map(|v| json!({
                "groupVersion": format!("{}/{}", name, v),
                "version": v
            })).collect::<Vec<_>>(),
            "preferredVersion": {"groupVersion": format!("{}/{}", name, versions[0]), "version": versions[0]}
        })
    };
    let api_groups = json!({
        "kind": "APIGroupList",
        "apiVersion": "v1",
        "groups": [
            group("apps", &["v1"]),
            group("storage.k8s.io", &["v1"]),
            group("autoscaling", &["v2", "v1"]),
        ]
    });

    server
        .on_get("/api", 200, &api_versions.to_string())
        .on_get("/apis", 200, &api_groups.to_string())
        .on_get(
            "/api/v1",
            200,
            &resource_list_json(
                "v1",
                &[
                    ("pods", "Pod", true),
                    ("pods/status", "Pod", true),
                    ("pods/log", "Pod", true),
                    ("namespaces", "Namespace", false),
                    ("nodes", "Node", false),
                    ("configmaps", "ConfigMap", true),
                ],
            ),
        )
        .on_get(
            "/apis/apps/v1",
            200,
            &resource_list_json(
                "apps/v1",
                &[
                    ("deployments", "Deployment", true),
                    ("deployments/scale", "Scale", true),
                    ("statefulsets", "StatefulSet", true),
                ],
            ),
        )
        .on_get(
            "/apis/storage.k8s.io/v1",
            200,
            &resource_list_json("storage.k8s.io/v1", &[("storageclasses", "StorageClass", false)]),
        )
        .on_get(
            "/apis/autoscaling/v2",
            200,
            &resource_list_json(
                "autoscaling/v2",
                &[("horizontalpodautoscalers", "HorizontalPodAutoscaler", true)],
            ),
        )
        .on_get(
            "/apis/autoscaling/v1",
            200,
            &resource_list_json(
                "autoscaling/v1",
                &[("horizontalpodautoscalers", "HorizontalPodAutoscaler", true)],
            ),
        )
}

pub fn descriptor(
    group: &str,
    version: &str,
    resource: &str,
    kind: &str,
    namespaced: bool,
) -> ApiResourceDescriptor {
    ApiResourceDescriptor {
        group: group.to_string(),
        version: version.to_string(),
        resource: resource.to_string(),
        kind: kind.to_string(),
        namespaced,
    }
}

/// Discovery returning a fixed snapshot and counting calls
pub struct StubDiscovery {
    resources: Vec<ApiResourceDescriptor>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubDiscovery {
    pub fn new(resources: Vec<ApiResourceDescriptor>) -> Self {
        Self {
            resources,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiDiscovery for StubDiscovery {
    async fn api_resources(&self, _ctx: &RequestContext) -> Result<Vec<ApiResourceDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FacadeError::DiscoveryError {
                source: kube::Error::Service("connection refused".into()),
            });
        }
        Ok(self.resources.clone())
    }
}

/// A fetch seen by [`CountingFetcher`]
#[derive(Debug, Clone)]
pub struct FetchCall {
    pub config: ClientConfiguration,
    pub path: String,
}

/// Fetcher that records calls and echoes the path back as the document
#[derive(Default)]
pub struct CountingFetcher {
    base: ClientConfiguration,
    calls: Mutex<Vec<FetchCall>>,
}

impl CountingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ResourceFetcher for CountingFetcher {
    fn base_config(&self) -> &ClientConfiguration {
        &self.base
    }

    async fn fetch(
        &self,
        _ctx: &RequestContext,
        config: ClientConfiguration,
        path: &str,
    ) -> Result<GenericResourceDocument> {
        self.calls.lock().unwrap().push(FetchCall {
            config,
            path: path.to_string(),
        });
        let mut document = GenericResourceDocument::new();
        document.insert("path".to_string(), Value::String(path.to_string()));
        Ok(document)
    }
}

/// Mutator that records what it was asked to do
#[derive(Default)]
pub struct RecordingMutator {
    updates: Mutex<Vec<(ResolvedResource, GenericResourceDocument)>>,
    deletes: Mutex<Vec<ResolvedResource>>,
}

impl RecordingMutator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<(ResolvedResource, GenericResourceDocument)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<ResolvedResource> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceMutator for RecordingMutator {
    async fn update(
        &self,
        _ctx: &RequestContext,
        target: &ResolvedResource,
        document: GenericResourceDocument,
    ) -> Result<()> {
        self.updates.lock().unwrap().push((target.clone(), document));
        Ok(())
    }

    async fn delete(&self, _ctx: &RequestContext, target: &ResolvedResource) -> Result<()> {
        self.deletes.lock().unwrap().push(target.clone());
        Ok(())
    }
}
