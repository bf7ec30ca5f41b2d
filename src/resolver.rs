//! Decides where the change text of a release commit comes from
//!
//! A commit produced by merging a merge request takes its changes from the
//! merge request description. Any other commit, or a merge request whose
//! description yields no entries, falls back to the commit title.

use tracing::{debug, info};

use crate::boundary::ReleaseWarning;
use crate::domain::{sanitize, ChangeSet};
use crate::error::Result;
use crate::remote::GitLabProject;

/// Where a [ChangeSet] was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    MergeRequest { iid: u64 },
    CommitTitle,
}

/// Changes resolved for a commit together with their origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChanges {
    pub changes: ChangeSet,
    pub source: ChangeSource,
    pub warnings: Vec<ReleaseWarning>,
}

/// Sanitized description of the merge request whose merge commit is
/// `commit_sha`.
///
/// Only the first matching merge request is considered. Returns `None` when
/// no merge request matches, and an empty set when the match has no
/// description.
pub fn merge_request_changes(
    project: &GitLabProject<'_>,
    commit_sha: &str,
) -> Result<Option<(u64, ChangeSet)>> {
    let merge_requests = project.merge_requests()?;
    debug!(count = merge_requests.len(), "Fetched merge requests");

    let Some(merge_request) = merge_requests
        .into_iter()
        .find(|mr| mr.merge_commit_sha.as_deref() == Some(commit_sha))
    else {
        return Ok(None);
    };

    let changes = sanitize(merge_request.description.as_deref().unwrap_or_default());
    Ok(Some((merge_request.iid, changes)))
}

/// Sanitized title of commit `commit_sha`.
pub fn commit_changes(project: &GitLabProject<'_>, commit_sha: &str) -> Result<ChangeSet> {
    let commit = project.commit(commit_sha)?;
    Ok(sanitize(&commit.title))
}

/// Resolves the change entries for `commit_sha`.
///
/// A matching merge request whose description sanitizes to nothing falls
/// through to the commit title instead of producing an empty set.
pub fn resolve_changes(project: &GitLabProject<'_>, commit_sha: &str) -> Result<ResolvedChanges> {
    let mut warnings = Vec::new();

    match merge_request_changes(project, commit_sha)? {
        Some((iid, changes)) if !changes.is_empty() => {
            info!(iid, entries = changes.len(), "Using merge request description");
            return Ok(ResolvedChanges {
                changes,
                source: ChangeSource::MergeRequest { iid },
                warnings,
            });
        }
        Some((iid, _)) => warnings.push(ReleaseWarning::EmptyMergeRequestDescription { iid }),
        None => debug!(commit_sha, "No merge request for commit"),
    }

    let changes = commit_changes(project, commit_sha)?;
    info!(entries = changes.len(), "Using commit title");
    Ok(ResolvedChanges {
        changes,
        source: ChangeSource::CommitTitle,
        warnings,
    })
}
