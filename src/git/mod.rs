//! Local version control abstraction layer
//!
//! The release core only needs four operations from the local repository:
//! stage a file, commit, read the commit id of HEAD and push a branch.
//! They are expressed by the [Repository] trait so the orchestrator can run
//! against either implementation:
//!
//! - [system::SystemGit]: the `git` executable, with `git2` for discovery
//!   and HEAD lookup
//! - [mock::MockRepository]: records calls for tests
//!
//! ```rust
//! # use gitlab_changelog::git::Repository;
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> gitlab_changelog::Result<()> {
//! repo.stage(Path::new("CHANGELOG.md"))?;
//! repo.commit("Update changelog (master)")?;
//! let commit_id = repo.head_commit_id()?;
//! repo.push("origin", "master")?;
//! # let _ = commit_id;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::{GitCall, MockRepository};
pub use system::SystemGit;

use crate::error::Result;
use std::path::Path;

/// Local repository operations used by a release
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// A failing `git commit` must be reported as
/// [crate::error::ChangelogError::Commit] and a failing `git push` as
/// [crate::error::ChangelogError::Push], both carrying the exit code.
pub trait Repository: Send + Sync {
    /// Stage `path` for the next commit
    ///
    /// # Arguments
    /// * `path` - File to add, relative to the directory the repository was opened from
    fn stage(&self, path: &Path) -> Result<()>;

    /// Create a commit from the staged changes
    ///
    /// # Arguments
    /// * `message` - Commit message
    ///
    /// # Returns
    /// * `Ok(())` - The commit was created
    /// * `Err(ChangelogError::Commit)` - `git commit` exited with a non-zero status
    fn commit(&self, message: &str) -> Result<()>;

    /// Full id of the most recent commit on HEAD
    fn head_commit_id(&self) -> Result<String>;

    /// Push `branch` to `remote`
    ///
    /// # Returns
    /// * `Ok(())` - The branch was pushed
    /// * `Err(ChangelogError::Push)` - `git push` exited with a non-zero status
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}
