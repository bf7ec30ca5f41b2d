use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LOCAL_CONFIG_FILE: &str = "./gitlab-changelog.toml";
const USER_CONFIG_FILE: &str = ".gitlab-changelog.toml";

/// Represents the complete configuration for gitlab-changelog.
///
/// Contains branch roles, git settings, tag and merge request formatting,
/// remote transport options and logging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub merge_request: MergeRequestConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_release_branch() -> String {
    "master".to_string()
}

fn default_development_branch() -> String {
    "develop".to_string()
}

/// Roles of the long-lived branches.
///
/// Releases on `release` are propagated back into `development` by merge
/// request; releases on `development` produce release candidates.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_release_branch")]
    pub release: String,

    #[serde(default = "default_development_branch")]
    pub development: String,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            release: default_release_branch(),
            development: default_development_branch(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    "Update changelog ({branch})".to_string()
}

/// Local git settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Template for the changelog commit; `{branch}` is the target branch.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            commit_message: default_commit_message(),
        }
    }
}

impl GitConfig {
    pub fn commit_message_for(&self, branch: &str) -> String {
        self.commit_message.replace("{branch}", branch)
    }
}

fn default_tag_format() -> String {
    "{version}".to_string()
}

/// Tag naming settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_tag_format")]
    pub format: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            format: default_tag_format(),
        }
    }
}

fn default_merge_request_title() -> String {
    "Automatic merge branch '{source}' into '{target}'".to_string()
}

/// Settings for the merge request that propagates a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MergeRequestConfig {
    /// Usernames added as a `- [ ] @name` checklist to the description.
    #[serde(default)]
    pub reviewers: Vec<String>,

    /// Title and merge commit message; `{source}` and `{target}` are branch names.
    #[serde(default = "default_merge_request_title")]
    pub title: String,
}

impl Default for MergeRequestConfig {
    fn default() -> Self {
        MergeRequestConfig {
            reviewers: Vec::new(),
            title: default_merge_request_title(),
        }
    }
}

impl MergeRequestConfig {
    pub fn title_for(&self, source: &str, target: &str) -> String {
        self.title
            .replace("{source}", source)
            .replace("{target}", target)
    }
}

fn default_api_prefix() -> String {
    "/api/v4".to_string()
}

/// Transport options for the collaboration API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Request timeout; the transport default applies when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            api_prefix: default_api_prefix(),
            accept_invalid_certs: false,
            timeout_secs: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.tags.format.contains("{version}") {
            return Err(ChangelogError::config(format!(
                "Tag format '{}' must contain the {{version}} placeholder",
                self.tags.format
            )));
        }
        if self.branches.release == self.branches.development {
            return Err(ChangelogError::config(format!(
                "Release and development branch are both '{}'",
                self.branches.release
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitlab-changelog.toml` in current directory
/// 3. `.gitlab-changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses and validates a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ChangelogError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branches() {
        let config = Config::default();
        assert_eq!(config.branches.release, "master");
        assert_eq!(config.branches.development, "develop");
    }

    #[test]
    fn test_commit_message_template() {
        let git = GitConfig::default();
        assert_eq!(git.commit_message_for("develop"), "Update changelog (develop)");
    }

    #[test]
    fn test_merge_request_title_template() {
        let mr = MergeRequestConfig::default();
        assert_eq!(
            mr.title_for("master", "develop"),
            "Automatic merge branch 'master' into 'develop'"
        );
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = parse_config("[branches]\nrelease = \"main\"\n").unwrap();
        assert_eq!(config.branches.release, "main");
        assert_eq!(config.branches.development, "develop");
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_tag_format_requires_placeholder() {
        let err = parse_config("[tags]\nformat = \"release\"\n").unwrap_err();
        assert!(matches!(err, ChangelogError::Config(_)));
    }

    #[test]
    fn test_identical_branches_rejected() {
        let err =
            parse_config("[branches]\nrelease = \"main\"\ndevelopment = \"main\"\n").unwrap_err();
        assert!(err.to_string().contains("main"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = parse_config("[branches\n").unwrap_err();
        assert!(matches!(err, ChangelogError::Config(_)));
    }
}
