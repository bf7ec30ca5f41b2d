use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

use super::Repository;
use crate::error::{ChangelogError, Result};

/// Repository driven through the `git` executable
///
/// Commands run in the directory the repository was opened from, so paths
/// given to [Repository::stage] resolve the same way they do for the caller.
pub struct SystemGit {
    dir: PathBuf,
    work_tree: PathBuf,
}

impl SystemGit {
    /// Discover the repository containing `path`
    ///
    /// # Returns
    /// * `Ok(SystemGit)` - Repository found
    /// * `Err(ChangelogError::Git)` - `path` is not inside a repository
    /// * `Err(ChangelogError::Config)` - The repository is bare
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dir = path.as_ref().to_path_buf();
        let repo = git2::Repository::discover(&dir)?;
        let work_tree = repo
            .workdir()
            .ok_or_else(|| ChangelogError::config("Bare repositories are not supported"))?
            .to_path_buf();
        debug!(work_tree = %work_tree.display(), "Opened repository");

        Ok(SystemGit { dir, work_tree })
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.dir);
        cmd
    }

    fn run(&self, args: &[&OsStr]) -> Result<ExitStatus> {
        debug!(?args, "Running git");
        let status = self.git_cmd().args(args).status()?;
        debug!(?args, code = ?status.code(), "git finished");
        Ok(status)
    }
}

impl Repository for SystemGit {
    fn stage(&self, path: &Path) -> Result<()> {
        let status = self.run(&[OsStr::new("add"), path.as_os_str()])?;
        if !status.success() {
            return Err(ChangelogError::Commit {
                code: status.code(),
            });
        }
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let status = self.run(&[
            OsStr::new("commit"),
            OsStr::new("-m"),
            OsStr::new(message),
        ])?;
        if !status.success() {
            return Err(ChangelogError::Commit {
                code: status.code(),
            });
        }
        Ok(())
    }

    fn head_commit_id(&self) -> Result<String> {
        // Reopened on each call so SystemGit stays Send + Sync.
        let repo = git2::Repository::open(&self.work_tree)?;
        let commit = repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let status = self.run(&[
            OsStr::new("push"),
            OsStr::new(remote),
            OsStr::new(branch),
        ])?;
        if !status.success() {
            return Err(ChangelogError::Push {
                code: status.code(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, git2::Repository) {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Release Bot").unwrap();
        config.set_str("user.email", "release@example.com").unwrap();
        (dir, repo)
    }

    #[test]
    fn test_open_outside_repository() {
        let dir = TempDir::new().unwrap();
        let result = SystemGit::open(dir.path());
        assert!(matches!(result, Err(ChangelogError::Git(_))));
    }

    #[test]
    fn test_head_commit_id_of_unborn_branch_fails() {
        let (dir, _repo) = init_repo();
        let git = SystemGit::open(dir.path()).unwrap();
        assert!(matches!(git.head_commit_id(), Err(ChangelogError::Git(_))));
    }

    #[test]
    fn test_stage_commit_and_read_head() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("CHANGELOG.md"), "1.0.0\n").unwrap();

        let git = SystemGit::open(dir.path()).unwrap();
        git.stage(Path::new("CHANGELOG.md")).unwrap();
        git.commit("Update changelog (master)").unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(git.head_commit_id().unwrap(), head.id().to_string());
        assert_eq!(head.message(), Some("Update changelog (master)\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stage_non_utf8_path() {
        use std::os::unix::ffi::OsStrExt;

        let (dir, repo) = init_repo();
        let name = OsStr::from_bytes(b"CHANGE\xffLOG.md");
        fs::write(dir.path().join(name), "1.0.0\n").unwrap();

        let git = SystemGit::open(dir.path()).unwrap();
        git.stage(Path::new(name)).unwrap();
        git.commit("Update changelog (master)").unwrap();

        let tree = repo.head().unwrap().peel_to_tree().unwrap();
        assert!(tree
            .iter()
            .any(|entry| entry.name_bytes() == b"CHANGE\xffLOG.md"));
    }

    #[test]
    fn test_commit_without_changes_reports_exit_code() {
        let (dir, _repo) = init_repo();
        let git = SystemGit::open(dir.path()).unwrap();

        let err = git.commit("nothing staged").unwrap_err();
        assert!(matches!(err, ChangelogError::Commit { code: Some(1) }));
    }

    #[test]
    fn test_push_to_unknown_remote_fails() {
        let (dir, _repo) = init_repo();
        fs::write(dir.path().join("CHANGELOG.md"), "1.0.0\n").unwrap();
        let git = SystemGit::open(dir.path()).unwrap();
        git.stage(Path::new("CHANGELOG.md")).unwrap();
        git.commit("initial").unwrap();

        let err = git.push("nowhere", "master").unwrap_err();
        assert!(matches!(err, ChangelogError::Push { code: Some(_) }));
    }
}
