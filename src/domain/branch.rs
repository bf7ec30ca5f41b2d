use crate::config::BranchesConfig;
use crate::domain::version::BumpPolicy;

/// Role of the branch a release is being cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRole {
    Release,
    Development,
    Other,
}

/// Represents the target branch together with its configured role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub role: BranchRole,
}

impl BranchContext {
    /// Classify `name` against the configured release and development branches
    pub fn new(name: impl Into<String>, branches: &BranchesConfig) -> Self {
        let name = name.into();
        let role = if name == branches.release {
            BranchRole::Release
        } else if name == branches.development {
            BranchRole::Development
        } else {
            BranchRole::Other
        };

        BranchContext { name, role }
    }

    /// Release candidates are cut from the development branch, patches elsewhere
    pub fn bump_policy(&self) -> BumpPolicy {
        match self.role {
            BranchRole::Development => BumpPolicy::ReleaseCandidate,
            BranchRole::Release | BranchRole::Other => BumpPolicy::Patch,
        }
    }

    /// Check if releases on this branch are merged back into development
    pub fn is_release_branch(&self) -> bool {
        self.role == BranchRole::Release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_branch() {
        let branch = BranchContext::new("master", &BranchesConfig::default());
        assert!(branch.is_release_branch());
        assert_eq!(branch.bump_policy(), BumpPolicy::Patch);
    }

    #[test]
    fn test_develop_branch() {
        let branch = BranchContext::new("develop", &BranchesConfig::default());
        assert!(!branch.is_release_branch());
        assert_eq!(branch.bump_policy(), BumpPolicy::ReleaseCandidate);
    }

    #[test]
    fn test_other_branch() {
        let branch = BranchContext::new("hotfix/login", &BranchesConfig::default());
        assert_eq!(branch.role, BranchRole::Other);
        assert_eq!(branch.bump_policy(), BumpPolicy::Patch);
        assert!(!branch.is_release_branch());
    }

    #[test]
    fn test_main_is_not_release_unless_configured() {
        let defaults = BranchesConfig::default();
        assert!(!BranchContext::new("main", &defaults).is_release_branch());

        let custom = BranchesConfig {
            release: "main".to_string(),
            development: "next".to_string(),
        };
        assert!(BranchContext::new("main", &custom).is_release_branch());
        assert_eq!(
            BranchContext::new("next", &custom).bump_policy(),
            BumpPolicy::ReleaseCandidate
        );
    }
}
