use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{HttpMethod, RemoteGateway};
use crate::error::{ChangelogError, Result};

/// A request observed by [MockGateway]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    /// Segments joined with `/`, e.g. `projects/42/merge_requests`
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Failure { status: u16, body: String },
}

/// Mock gateway for testing without a collaboration server
///
/// Routes are matched on method and joined path. Unrouted requests fail with
/// a 404 remote error so missing expectations surface in tests.
#[derive(Default)]
pub struct MockGateway {
    routes: HashMap<(HttpMethod, String), MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockGateway {
    /// Create a new gateway without routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `method path` with a JSON document
    pub fn respond(mut self, method: HttpMethod, path: &str, body: Value) -> Self {
        self.routes
            .insert((method, path.to_string()), MockResponse::Json(body));
        self
    }

    /// Respond to `method path` with a non-2xx status
    pub fn fail(mut self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method, path.to_string()),
            MockResponse::Failure {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Requests matching `method` and `path`
    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Whether any request used `method`
    pub fn received(&self, method: HttpMethod) -> bool {
        self.requests().iter().any(|r| r.method == method)
    }
}

impl RemoteGateway for MockGateway {
    fn request(&self, method: HttpMethod, path: &[&str], body: Option<&Value>) -> Result<Value> {
        let path = path.join("/");
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                method,
                path: path.clone(),
                body: body.cloned(),
            });

        match self.routes.get(&(method, path.clone())) {
            Some(MockResponse::Json(value)) => Ok(value.clone()),
            Some(MockResponse::Failure { status, body }) => Err(ChangelogError::Remote {
                status: *status,
                body: body.clone(),
            }),
            None => Err(ChangelogError::Remote {
                status: 404,
                body: format!("no mock response for {} {}", method, path),
            }),
        }
    }
}
