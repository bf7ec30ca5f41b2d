use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// An operation observed by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Stage(PathBuf),
    Commit(String),
    HeadCommitId,
    Push { remote: String, branch: String },
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    commit_id: String,
    commit_failure: Option<i32>,
    push_failure: Option<i32>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a mock whose HEAD is `commit_id`
    pub fn new(commit_id: impl Into<String>) -> Self {
        MockRepository {
            commit_id: commit_id.into(),
            commit_failure: None,
            push_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `commit` fail with exit code `code`
    pub fn fail_commit(mut self, code: i32) -> Self {
        self.commit_failure = Some(code);
        self
    }

    /// Make `push` fail with exit code `code`
    pub fn fail_push(mut self, code: i32) -> Self {
        self.push_failure = Some(code);
        self
    }

    /// All operations performed so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether a commit was attempted
    pub fn committed(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, GitCall::Commit(_)))
    }

    /// Whether a push was attempted
    pub fn pushed(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, GitCall::Push { .. }))
    }

    fn record(&self, call: GitCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("0000000000000000000000000000000000000000")
    }
}

impl Repository for MockRepository {
    fn stage(&self, path: &Path) -> Result<()> {
        self.record(GitCall::Stage(path.to_path_buf()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(GitCall::Commit(message.to_string()));
        match self.commit_failure {
            Some(code) => Err(ChangelogError::Commit { code: Some(code) }),
            None => Ok(()),
        }
    }

    fn head_commit_id(&self) -> Result<String> {
        self.record(GitCall::HeadCommitId);
        Ok(self.commit_id.clone())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(GitCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        match self.push_failure {
            Some(code) => Err(ChangelogError::Push { code: Some(code) }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_records_calls() {
        let repo = MockRepository::new("abc123");

        repo.stage(Path::new("CHANGELOG.md")).unwrap();
        repo.commit("Update changelog (master)").unwrap();
        assert_eq!(repo.head_commit_id().unwrap(), "abc123");
        repo.push("origin", "master").unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                GitCall::Stage(PathBuf::from("CHANGELOG.md")),
                GitCall::Commit("Update changelog (master)".to_string()),
                GitCall::HeadCommitId,
                GitCall::Push {
                    remote: "origin".to_string(),
                    branch: "master".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_mock_repository_commit_failure() {
        let repo = MockRepository::default().fail_commit(128);
        let err = repo.commit("msg").unwrap_err();
        assert!(matches!(err, ChangelogError::Commit { code: Some(128) }));
        assert!(repo.committed());
        assert!(!repo.pushed());
    }

    #[test]
    fn test_mock_repository_push_failure() {
        let repo = MockRepository::default().fail_push(1);
        let err = repo.push("origin", "develop").unwrap_err();
        assert!(matches!(err, ChangelogError::Push { code: Some(1) }));
    }
}
