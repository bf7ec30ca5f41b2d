//! Typed GitLab endpoints for a single project

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::RemoteGateway;
use crate::domain::{sanitize, ChangeSet};
use crate::error::Result;

/// Merge request as listed by the project API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergeRequest {
    pub iid: u64,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Repository commit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Release notes attached to a tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub description: Option<String>,
}

/// Repository tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub release: Option<Release>,
}

/// GitLab API scoped to one project
pub struct GitLabProject<'a> {
    gateway: &'a dyn RemoteGateway,
    project_id: String,
}

impl<'a> GitLabProject<'a> {
    pub fn new(gateway: &'a dyn RemoteGateway, project_id: impl Into<String>) -> Self {
        GitLabProject {
            gateway,
            project_id: project_id.into(),
        }
    }

    /// `GET /projects/{id}/merge_requests`
    pub fn merge_requests(&self) -> Result<Vec<MergeRequest>> {
        let value = self
            .gateway
            .get(&["projects", &self.project_id, "merge_requests"])?;
        Ok(serde_json::from_value(value)?)
    }

    /// `GET /projects/{id}/repository/commits/{sha}`
    pub fn commit(&self, sha: &str) -> Result<Commit> {
        let value = self.gateway.get(&[
            "projects",
            &self.project_id,
            "repository",
            "commits",
            sha,
        ])?;
        Ok(serde_json::from_value(value)?)
    }

    /// `POST /projects/{id}/repository/tags`
    pub fn create_tag(&self, name: &str, reference: &str, release_description: &str) -> Result<()> {
        debug!(tag = name, reference, "Creating remote tag");
        self.gateway.post(
            &["projects", &self.project_id, "repository", "tags"],
            &json!({
                "tag_name": name,
                "ref": reference,
                "release_description": release_description,
            }),
        )?;
        Ok(())
    }

    /// `GET /projects/{id}/repository/tags/{name}`
    pub fn tag(&self, name: &str) -> Result<Tag> {
        let value = self.gateway.get(&[
            "projects",
            &self.project_id,
            "repository",
            "tags",
            name,
        ])?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sanitized release description recorded on tag `name`; empty when the
    /// tag carries no release.
    pub fn tag_release_changes(&self, name: &str) -> Result<ChangeSet> {
        let tag = self.tag(name)?;
        let description = tag
            .release
            .and_then(|release| release.description)
            .unwrap_or_default();
        Ok(sanitize(&description))
    }

    /// `POST /projects/{id}/merge_requests`, returning the new `iid`
    pub fn create_merge_request(
        &self,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        description: &str,
    ) -> Result<u64> {
        debug!(source_branch, target_branch, "Creating merge request");
        let value = self.gateway.post(
            &["projects", &self.project_id, "merge_requests"],
            &json!({
                "source_branch": source_branch,
                "target_branch": target_branch,
                "title": title,
                "description": description,
            }),
        )?;
        let merge_request: MergeRequest = serde_json::from_value(value)?;
        Ok(merge_request.iid)
    }

    /// `PUT /projects/{id}/merge_requests/{iid}/merge`
    pub fn accept_merge_request(&self, iid: u64, merge_commit_message: &str) -> Result<()> {
        debug!(iid, "Accepting merge request");
        let iid = iid.to_string();
        self.gateway.put(
            &["projects", &self.project_id, "merge_requests", &iid, "merge"],
            &json!({ "merge_commit_message": merge_commit_message }),
        )?;
        Ok(())
    }
}
