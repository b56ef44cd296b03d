//! Testing utilities for the hub console workspace
//!
//! Shared fake transport and fixtures.

#![allow(missing_docs)]

use dashmap::DashMap;
use hub_api::{Request, Response, Transport, TransportError, TransportResult};
use hub_authz::{PermissionSet, User};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Response(Response),
    Error(TransportError),
}

/// In-memory transport answering from canned replies and counting calls
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: DashMap<String, Reply>,
    failures: DashMap<String, VecDeque<TransportError>>,
    calls: DashMap<String, usize>,
    queries: DashMap<String, Vec<(String, String)>>,
    latency: Option<Duration>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request waits `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_json(self, path: &str, body: Value) -> Self {
        self.set_json(path, body);
        self
    }

    pub fn with_response(self, path: &str, response: Response) -> Self {
        self.replies.insert(path.to_string(), Reply::Response(response));
        self
    }

    pub fn with_error(self, path: &str, error: TransportError) -> Self {
        self.replies.insert(path.to_string(), Reply::Error(error));
        self
    }

    /// Replace the JSON reply for `path`
    pub fn set_json(&self, path: &str, body: Value) {
        self.replies
            .insert(path.to_string(), Reply::Response(Response::ok(body.to_string())));
    }

    /// Fail the next request to `path` before answering normally again
    pub fn fail_next(&self, path: &str, error: TransportError) {
        self.failures.entry(path.to_string()).or_default().push_back(error);
    }

    /// Requests made to `path`
    pub fn calls(&self, path: &str) -> usize {
        self.calls.get(path).map_or(0, |count| *count)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    /// Query parameters of the last request to `path`
    pub fn last_query(&self, path: &str) -> Option<Vec<(String, String)>> {
        self.queries.get(path).map(|query| query.clone())
    }

    fn answer(&self, path: &str) -> TransportResult<Response> {
        let queued = self
            .failures
            .get_mut(path)
            .and_then(|mut queue| queue.pop_front());
        if let Some(error) = queued {
            return Err(error);
        }

        match self.replies.get(path).map(|reply| reply.clone()) {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Error(error)) => Err(error),
            None => Ok(Response::with_status(404, format!("no fixture for {path}"))),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, request: &Request) -> TransportResult<Response> {
        *self.calls.entry(request.path.clone()).or_insert(0) += 1;
        self.queries.insert(request.path.clone(), request.query.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.answer(&request.path)
    }
}

pub fn user(username: &str, permissions: &[&str]) -> User {
    User::new(username, permissions.iter().copied().collect::<PermissionSet>())
}

pub fn user_json(username: &str, permissions: &[&str]) -> Value {
    json!({ "username": username, "permissions": permissions })
}

pub fn projects_json(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| json!({ "name": name, "description": format!("{name} project") }))
            .collect(),
    )
}

pub fn namespaces_json(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "id": (i + 1).to_string(), "name": name }))
            .collect(),
    )
}

pub fn document_json(id: &str, in_progress: bool) -> Value {
    json!({
        "id": id,
        "createdOn": 1_650_000_000_000_i64,
        "inProgress": in_progress,
        "retryCount": 0,
        "fileContent": { "ruc": "20123456789", "documentID": format!("F001-{id}"), "documentType": "Invoice" }
    })
}

/// Documents page body plus its `x-total` header
pub fn documents_response(documents: &[Value], total: u64) -> Response {
    Response::ok(Value::Array(documents.to_vec()).to_string()).with_header("x-total", total.to_string())
}
