// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::types::CustomResourceDescriptor;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json(&path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    status_json(404, "NotFound", &format!("{} not found", path))
}

/// Create a 409 conflict response for an existing definition
pub fn already_exists_json(name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!(
            "customresourcedefinitions.apiextensions.k8s.io \"{}\" already exists",
            name
        ),
    )
}

/// Create a 403 forbidden response
pub fn forbidden_json() -> String {
    status_json(403, "Forbidden", "customresourcedefinitions is forbidden")
}

/// Serialize a descriptor's definition with the given status conditions
pub fn crd_json(descriptor: &CustomResourceDescriptor, conditions: &[(&str, &str)]) -> String {
    let mut crd = serde_json::to_value(descriptor.definition()).unwrap();
    let conditions: Vec<_> = conditions
        .iter()
        .map(|(type_, status)| {
            serde_json::json!({
                "type": type_,
                "status": status,
                "reason": format!("{}Reason", type_)
            })
        })
        .collect();
    crd["status"] = serde_json::json!({ "conditions": conditions });
    crd.to_string()
}

/// Create a Sample list; a `None` kind leaves out the type metadata
pub fn sample_list_json(samples: &[(&str, Option<&str>)]) -> String {
    let items: Vec<_> = samples
        .iter()
        .enumerate()
        .map(|(i, (name, kind))| {
            let mut item = serde_json::json!({
                "metadata": {
                    "name": name,
                    "namespace": "default",
                    "resourceVersion": (i + 1).to_string()
                },
                "spec": { "hello": "world" }
            });
            if let Some(kind) = kind {
                item["apiVersion"] = serde_json::json!("myproject.io/v1alpha1");
                item["kind"] = serde_json::json!(kind);
            }
            item
        })
        .collect();

    serde_json::json!({
        "apiVersion": "myproject.io/v1alpha1",
        "kind": "SampleList",
        "metadata": { "resourceVersion": "100" },
        "items": items
    })
    .to_string()
}

/// Log lines written while a test runs
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber and return what it logged
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}
