use std::fmt;
use std::path::PathBuf;

/// Immutable parameters of one orchestration run
///
/// Built by the CLI layer and only borrowed by the release core.
#[derive(Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    /// Base URL of the collaboration server, e.g. `https://gitlab.com`
    pub remote_endpoint: String,
    /// API token sent with every remote request
    pub credential: String,
    pub project_id: String,
    pub commit_sha: String,
    pub target_branch: String,
    pub changelog_path: PathBuf,
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for ReleaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseContext")
            .field("remote_endpoint", &self.remote_endpoint)
            .field("credential", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("commit_sha", &self.commit_sha)
            .field("target_branch", &self.target_branch)
            .field("changelog_path", &self.changelog_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_credential() {
        let ctx = ReleaseContext {
            remote_endpoint: "https://gitlab.example.com".to_string(),
            credential: "glpat-secret".to_string(),
            project_id: "42".to_string(),
            commit_sha: "abc123".to_string(),
            target_branch: "master".to_string(),
            changelog_path: PathBuf::from("CHANGELOG.md"),
        };

        let rendered = format!("{:?}", ctx);
        assert!(!rendered.contains("glpat-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("abc123"));
    }
}
