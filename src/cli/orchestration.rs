//! Release workflow orchestration
//!
//! The workflow is a strictly linear sequence of steps. The first failing
//! step halts the run and its error is returned unchanged; nothing done by
//! earlier steps is undone. A run is not re-entrant: re-running after a
//! failure past the changelog update records a second entry, and past
//! tagging creates duplicate remote state.

use tracing::{info, info_span};

use crate::boundary::ReleaseWarning;
use crate::changelog::{self, ChangelogEntry};
use crate::config::Config;
use crate::domain::{
    next_version, BranchContext, BumpPolicy, ChangeSet, ReleaseContext, SemanticVersion,
    TagPattern,
};
use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use crate::remote::{GitLabProject, RemoteGateway};
use crate::resolver::{self, ChangeSource};

/// Everything decided before the first mutation
///
/// Produced by [ReleaseOrchestrator::plan] and used for `--dry-run`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    /// Branch the release is cut from
    pub branch: BranchContext,
    pub policy: BumpPolicy,
    /// Version found on the first line of the changelog
    pub previous: Option<SemanticVersion>,
    pub version: SemanticVersion,
    /// Remote tag name for `version`
    pub tag: String,
    pub changes: ChangeSet,
    pub change_source: ChangeSource,
    /// Whether the release is merged back into the development branch
    pub propagates_merge: bool,
    pub warnings: Vec<ReleaseWarning>,
}

impl ReleasePlan {
    /// Changelog block that the run would prepend, stamped now
    pub fn preview_entry(&self) -> ChangelogEntry {
        ChangelogEntry::new(self.version, self.changes.clone())
    }
}

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub version: SemanticVersion,
    pub previous: Option<SemanticVersion>,
    pub changes: ChangeSet,
    /// Local commit holding the changelog update
    pub commit_id: String,
    pub tag: String,
    /// `iid` of the accepted merge request, when the release was propagated
    pub merge_request: Option<u64>,
    pub warnings: Vec<ReleaseWarning>,
}

/// Merge request description: one `- ` line per change, followed by the
/// reviewer checklist when reviewers are configured.
pub fn merge_request_description(changes: &ChangeSet, reviewers: &[String]) -> String {
    let mut description = format!("- {}", changes.entries().join("\n- "));
    if !reviewers.is_empty() {
        let checklist = reviewers
            .iter()
            .map(|reviewer| format!("- [ ] @{}", reviewer))
            .collect::<Vec<_>>()
            .join("\n");
        description.push_str("\n\n- - - \n\n");
        description.push_str(&checklist);
    }
    description
}

/// Runs the release state machine against a remote API and a local repository
pub struct ReleaseOrchestrator<'a> {
    config: &'a Config,
    gateway: &'a dyn RemoteGateway,
    repository: &'a dyn Repository,
}

impl<'a> ReleaseOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        gateway: &'a dyn RemoteGateway,
        repository: &'a dyn Repository,
    ) -> Self {
        ReleaseOrchestrator {
            config,
            gateway,
            repository,
        }
    }

    /// Resolves policy, current version, next version and changes.
    ///
    /// Performs no local or remote mutation. An empty change set is returned
    /// as is; [ReleaseOrchestrator::run] rejects it when updating the
    /// changelog.
    ///
    /// # Arguments
    /// * `ctx` - Parameters of this run
    ///
    /// # Returns
    /// * `Ok(ReleasePlan)` - The decided release
    /// * `Err` - Invalid changelog version, unreadable changelog or a failed remote call
    pub fn plan(&self, ctx: &ReleaseContext) -> Result<ReleasePlan> {
        let project = GitLabProject::new(self.gateway, ctx.project_id.as_str());
        let tag_pattern = TagPattern::new(self.config.tags.format.as_str())?;
        let mut warnings = Vec::new();

        let branch = BranchContext::new(ctx.target_branch.as_str(), &self.config.branches);
        let policy = branch.bump_policy();
        info!(branch = %branch.name, %policy, "Resolved bump policy");

        let current = info_span!("read_current_version")
            .in_scope(|| changelog::read_current_version(&ctx.changelog_path))?;
        warnings.extend(current.warning);
        let previous = current.version;

        let version = next_version(previous.as_ref(), policy);
        let tag = tag_pattern.format(&version);
        info!(
            previous = ?previous.map(|v| v.to_string()),
            %version,
            "Computed next version"
        );

        let resolved = info_span!("resolve_changes")
            .in_scope(|| resolver::resolve_changes(&project, &ctx.commit_sha))?;
        warnings.extend(resolved.warnings);

        Ok(ReleasePlan {
            propagates_merge: branch.is_release_branch(),
            branch,
            policy,
            previous,
            version,
            tag,
            changes: resolved.changes,
            change_source: resolved.source,
            warnings,
        })
    }

    /// Like [ReleaseOrchestrator::plan], but fails with `NoChanges` exactly
    /// when a run would.
    pub fn dry_run(&self, ctx: &ReleaseContext) -> Result<ReleasePlan> {
        let plan = self.plan(ctx)?;
        if plan.changes.is_empty() {
            return Err(ChangelogError::NoChanges);
        }
        Ok(plan)
    }

    /// Executes the full release.
    ///
    /// Steps, in order: resolve policy, read current version, compute the
    /// next version, resolve changes, update the changelog, commit locally,
    /// tag remotely, push, and on the release branch merge the release back
    /// into the development branch.
    ///
    /// # Arguments
    /// * `ctx` - Parameters of this run
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - Every step succeeded
    /// * `Err` - The error of the first failing step, unchanged
    pub fn run(&self, ctx: &ReleaseContext) -> Result<ReleaseOutcome> {
        let plan = self.plan(ctx)?;
        let project = GitLabProject::new(self.gateway, ctx.project_id.as_str());

        info_span!("update_changelog").in_scope(|| {
            changelog::append_entry(&plan.version, &plan.changes, &ctx.changelog_path)
        })?;
        info!(version = %plan.version, entries = plan.changes.len(), "Updated changelog");

        let commit_id = info_span!("commit_locally").in_scope(|| {
            self.repository.stage(&ctx.changelog_path)?;
            self.repository
                .commit(&self.config.git.commit_message_for(&ctx.target_branch))?;
            self.repository.head_commit_id()
        })?;
        info!(%commit_id, "Committed changelog");

        info_span!("tag_remotely").in_scope(|| {
            project.create_tag(&plan.tag, &commit_id, &plan.changes.to_bullet_list())
        })?;
        info!(tag = %plan.tag, "Created remote tag");

        info_span!("push_locally")
            .in_scope(|| self.repository.push(&self.config.git.remote, &ctx.target_branch))?;
        info!(remote = %self.config.git.remote, branch = %ctx.target_branch, "Pushed");

        let mut warnings = plan.warnings;
        let merge_request = if plan.propagates_merge {
            let iid = info_span!("propagate_merge").in_scope(|| {
                self.propagate_merge(&project, &plan.tag, &plan.changes, &mut warnings)
            })?;
            Some(iid)
        } else {
            None
        };

        Ok(ReleaseOutcome {
            version: plan.version,
            previous: plan.previous,
            changes: plan.changes,
            commit_id,
            tag: plan.tag,
            merge_request,
            warnings,
        })
    }

    /// Re-reads the release description from the tag, then opens and accepts
    /// a merge request from the release branch into the development branch.
    ///
    /// A tag that comes back without release notes is described with the
    /// changes `released` under it.
    fn propagate_merge(
        &self,
        project: &GitLabProject<'_>,
        tag: &str,
        released: &ChangeSet,
        warnings: &mut Vec<ReleaseWarning>,
    ) -> Result<u64> {
        let source = self.config.branches.release.as_str();
        let target = self.config.branches.development.as_str();

        let mut changes = project.tag_release_changes(tag)?;
        if changes.is_empty() {
            warnings.push(ReleaseWarning::TagWithoutReleaseNotes {
                tag: tag.to_string(),
            });
            changes = released.clone();
        }
        let title = self.config.merge_request.title_for(source, target);
        let description =
            merge_request_description(&changes, &self.config.merge_request.reviewers);

        let iid = project.create_merge_request(source, target, &title, &description)?;
        info!(iid, source, target, "Opened merge request");

        project.accept_merge_request(iid, &title)?;
        info!(iid, "Accepted merge request");
        Ok(iid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_request_description_without_reviewers() {
        let changes = ChangeSet::from(vec!["chng1", "chng2"]);
        assert_eq!(merge_request_description(&changes, &[]), "- chng1\n- chng2");
    }

    #[test]
    fn test_merge_request_description_with_reviewers() {
        let changes = ChangeSet::from(vec!["release_desc"]);
        let reviewers = vec!["brunabxs".to_string(), "alice".to_string()];
        assert_eq!(
            merge_request_description(&changes, &reviewers),
            "- release_desc\n\n- - - \n\n- [ ] @brunabxs\n- [ ] @alice"
        );
    }

    #[test]
    fn test_merge_request_description_round_trips_through_sanitize() {
        let changes = ChangeSet::from(vec!["a", "b"]);
        let reviewers = vec!["bob".to_string()];
        let description = merge_request_description(&changes, &reviewers);
        assert_eq!(crate::domain::sanitize(&description), changes);
    }
}
