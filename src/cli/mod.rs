//! Command line surface
//!
//! Every connection parameter can come from a flag or from the variables a
//! CI job already exports, so the binary runs unchanged inside a pipeline.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::ReleaseContext;

pub mod orchestration;

pub use orchestration::{
    merge_request_description, ReleaseOrchestrator, ReleaseOutcome, ReleasePlan,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "gitlab-changelog",
    version,
    about = "Record a release in the changelog, tag it and merge it back"
)]
pub struct Args {
    #[arg(short = 'e', long, env = "GITLAB_ENDPOINT", help = "Base URL of the GitLab server")]
    pub gitlab_endpoint: String,

    #[arg(
        short = 't',
        long,
        env = "GITLAB_TOKEN",
        hide_env_values = true,
        help = "Private token used for API calls"
    )]
    pub gitlab_token: String,

    #[arg(short = 'p', long, env = "CI_PROJECT_ID", help = "Project id or path")]
    pub project_id: String,

    #[arg(short = 's', long, env = "CI_COMMIT_SHA", help = "Commit being released")]
    pub commit_sha: String,

    #[arg(
        short = 'b',
        long,
        env = "CI_COMMIT_REF_NAME",
        help = "Branch the commit belongs to"
    )]
    pub target_branch: String,

    #[arg(
        short = 'f',
        long,
        default_value = "CHANGELOG.md",
        help = "Changelog file to update"
    )]
    pub changelog_file: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, help = "Show the release that would be made without changing anything")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Args {
    /// Build the immutable run parameters
    pub fn into_context(self) -> ReleaseContext {
        ReleaseContext {
            remote_endpoint: self.gitlab_endpoint,
            credential: self.gitlab_token,
            project_id: self.project_id,
            commit_sha: self.commit_sha,
            target_branch: self.target_branch,
            changelog_path: self.changelog_file,
        }
    }
}
