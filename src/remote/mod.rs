//! Remote collaboration API access
//!
//! [RemoteGateway] is the single request/response primitive used to talk to
//! the collaboration server. Implementations:
//!
//! - [http::HttpGateway]: blocking HTTP via `reqwest`
//! - [mock::MockGateway]: scripted responses for tests
//!
//! [gitlab::GitLabProject] layers the typed endpoints used by a release on
//! top of any gateway.

pub mod gitlab;
pub mod http;
pub mod mock;

pub use gitlab::{Commit, GitLabProject, MergeRequest, Release, Tag};
pub use http::HttpGateway;
pub use mock::{MockGateway, RecordedRequest};

use crate::error::Result;
use serde_json::Value;
use std::fmt;

/// HTTP verbs used against the collaboration API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        };
        f.write_str(name)
    }
}

/// Uniform JSON request primitive against the collaboration API
///
/// `path` is a list of raw path segments below the API root, e.g.
/// `["projects", "group/app", "merge_requests"]`. Implementations encode each
/// segment themselves.
///
/// ## Error Handling
///
/// A non-2xx response must be reported as
/// [crate::error::ChangelogError::Remote] carrying status and body. No
/// implementation retries.
pub trait RemoteGateway: Send + Sync {
    fn request(&self, method: HttpMethod, path: &[&str], body: Option<&Value>) -> Result<Value>;

    fn get(&self, path: &[&str]) -> Result<Value> {
        self.request(HttpMethod::Get, path, None)
    }

    fn post(&self, path: &[&str], body: &Value) -> Result<Value> {
        self.request(HttpMethod::Post, path, Some(body))
    }

    fn put(&self, path: &[&str], body: &Value) -> Result<Value> {
        self.request(HttpMethod::Put, path, Some(body))
    }
}
