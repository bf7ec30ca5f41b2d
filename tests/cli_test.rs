// tests/cli_test.rs
use std::env;
use std::path::PathBuf;
use std::process::Command;

use clap::Parser;
use gitlab_changelog::cli::Args;
use serial_test::serial;

const ENV_VARS: [&str; 5] = [
    "GITLAB_ENDPOINT",
    "GITLAB_TOKEN",
    "CI_PROJECT_ID",
    "CI_COMMIT_SHA",
    "CI_COMMIT_REF_NAME",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_flags_build_context() {
    clear_env();
    let args = Args::try_parse_from([
        "gitlab-changelog",
        "-e",
        "https://gitlab.example.com",
        "-t",
        "secret",
        "-p",
        "42",
        "-s",
        "abc123",
        "-b",
        "master",
    ])
    .unwrap();

    assert!(!args.dry_run);
    assert!(!args.verbose);
    assert_eq!(args.config, None);

    let ctx = args.into_context();
    assert_eq!(ctx.remote_endpoint, "https://gitlab.example.com");
    assert_eq!(ctx.credential, "secret");
    assert_eq!(ctx.project_id, "42");
    assert_eq!(ctx.commit_sha, "abc123");
    assert_eq!(ctx.target_branch, "master");
    assert_eq!(ctx.changelog_path, PathBuf::from("CHANGELOG.md"));
}

#[test]
#[serial]
fn test_ci_environment_fallback() {
    clear_env();
    env::set_var("GITLAB_ENDPOINT", "https://gitlab.com");
    env::set_var("GITLAB_TOKEN", "glpat-env");
    env::set_var("CI_PROJECT_ID", "group/app");
    env::set_var("CI_COMMIT_SHA", "def456");
    env::set_var("CI_COMMIT_REF_NAME", "develop");

    let args = Args::try_parse_from([
        "gitlab-changelog",
        "--changelog-file",
        "docs/CHANGES.md",
        "--dry-run",
    ])
    .unwrap();
    clear_env();

    assert!(args.dry_run);
    let ctx = args.into_context();
    assert_eq!(ctx.credential, "glpat-env");
    assert_eq!(ctx.project_id, "group/app");
    assert_eq!(ctx.target_branch, "develop");
    assert_eq!(ctx.changelog_path, PathBuf::from("docs/CHANGES.md"));
}

#[test]
#[serial]
fn test_flag_overrides_environment() {
    clear_env();
    env::set_var("GITLAB_ENDPOINT", "https://gitlab.com");
    env::set_var("GITLAB_TOKEN", "glpat-env");
    env::set_var("CI_PROJECT_ID", "1");
    env::set_var("CI_COMMIT_SHA", "def456");
    env::set_var("CI_COMMIT_REF_NAME", "develop");

    let args =
        Args::try_parse_from(["gitlab-changelog", "--target-branch", "master", "-v"]).unwrap();
    clear_env();

    assert!(args.verbose);
    assert_eq!(args.target_branch, "master");
}

#[test]
#[serial]
fn test_missing_required_parameters() {
    clear_env();
    let result = Args::try_parse_from(["gitlab-changelog", "-e", "https://gitlab.com"]);
    assert!(result.is_err());
}

#[test]
fn test_help_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_gitlab-changelog"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("gitlab-changelog"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("GITLAB_TOKEN"));
}

#[test]
#[serial]
fn test_invalid_endpoint_exits_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_gitlab-changelog"))
        .args([
            "-e", "not a url", "-t", "token", "-p", "1", "-s", "abc", "-b", "master", "-c",
        ])
        .arg(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("fixtures")
                .join("partial.toml"),
        )
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("configuration failed"));
}
