// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request as HttpRequest, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

type Route = (String, String);

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Each route holds a queue of responses; the last one keeps being served once
/// the queue is drained, which lets tests script a status that evolves over polls.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Route, VecDeque<(u16, String)>>>>,
    calls: Arc<Mutex<HashMap<Route, usize>>>,
    get_delay: Option<Duration>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(HashMap::new())),
            get_delay: None,
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.push("GET", path, status, body)
    }

    /// Add a series of responses for GET requests, served in order
    pub fn on_get_sequence(self, path: &str, responses: &[(u16, String)]) -> Self {
        responses
            .iter()
            .fold(self, |mock, (status, body)| mock.push("GET", path, *status, body))
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.push("POST", path, status, body)
    }

    /// Hold every GET response back for `delay` before answering
    pub fn with_get_delay(mut self, delay: Duration) -> Self {
        self.get_delay = Some(delay);
        self
    }

    /// Build a kube Client from this mock service, defaulting to namespace `ci`
    pub fn into_client(self) -> Client {
        Client::new(self, "ci")
    }

    /// Number of requests received for the given method and exact path
    pub fn calls(&self, method: &str, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn push(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default() += 1;

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<HttpRequest<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: HttpRequest<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.next_response(&method, &path);
        let delay = self.get_delay.filter(|_| method == "GET");

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("requests", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Collection path for Request resources in a namespace
pub fn requests_path(namespace: &str) -> String {
    format!("/apis/courier.geeko.me/v1alpha1/namespaces/{}/requests", namespace)
}

/// Item path for a named Request resource in a namespace
pub fn request_path(namespace: &str, name: &str) -> String {
    format!("{}/{}", requests_path(namespace), name)
}

/// Create a mock Request JSON response, optionally with a status block
pub fn request_json(name: Option<&str>, status: Option<serde_json::Value>) -> String {
    let mut request = serde_json::json!({
        "apiVersion": "courier.geeko.me/v1alpha1",
        "kind": "Request",
        "metadata": {
            "generateName": "release-",
            "namespace": "ci",
            "uid": "test-uid"
        },
        "spec": {
            "request": "release",
            "params": { "version": "1.2.3" }
        }
    });
    if let Some(name) = name {
        request["metadata"]["name"] = name.into();
    }
    if let Some(status) = status {
        request["status"] = status;
    }
    request.to_string()
}

/// Create a mock Request JSON response whose status carries the given condition reasons
pub fn request_with_conditions_json(name: &str, reasons: &[&str]) -> String {
    let conditions: Vec<serde_json::Value> = reasons
        .iter()
        .map(|reason| {
            serde_json::json!({
                "reason": reason,
                "message": format!("controller reports {}", reason)
            })
        })
        .collect();
    request_json(Some(name), Some(serde_json::json!({ "conditions": conditions })))
}

/// Create a Status failure response with the given code
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(
        404,
        "NotFound",
        &format!("{} \"{}\" not found", resource, name),
    )
}
