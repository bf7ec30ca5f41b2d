use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met during a release run.
/// They are reported to the user but never change the sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseWarning {
    /// Changelog file does not exist; it is created by the first write
    MissingChangelog { path: PathBuf },
    /// First line of the changelog carries no version token
    ChangelogWithoutVersion { path: PathBuf },
    /// The merge request for the commit has no usable description, so the
    /// commit title was used instead
    EmptyMergeRequestDescription { iid: u64 },
    /// The tag read back for merge propagation carries no release notes, so
    /// the released changes were used instead
    TagWithoutReleaseNotes { tag: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::MissingChangelog { path } => {
                write!(
                    f,
                    "Changelog '{}' not found, starting from the initial version",
                    path.display()
                )
            }
            ReleaseWarning::ChangelogWithoutVersion { path } => {
                write!(
                    f,
                    "No version on the first line of '{}', starting from the initial version",
                    path.display()
                )
            }
            ReleaseWarning::EmptyMergeRequestDescription { iid } => {
                write!(
                    f,
                    "Merge request !{} has no change entries, using the commit title",
                    iid
                )
            }
            ReleaseWarning::TagWithoutReleaseNotes { tag } => {
                write!(
                    f,
                    "Tag '{}' has no release notes, describing the merge request with the released changes",
                    tag
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_changelog_display() {
        let warning = ReleaseWarning::MissingChangelog {
            path: PathBuf::from("CHANGELOG.md"),
        };
        assert_eq!(
            warning.to_string(),
            "Changelog 'CHANGELOG.md' not found, starting from the initial version"
        );
    }

    #[test]
    fn test_empty_description_display() {
        let warning = ReleaseWarning::EmptyMergeRequestDescription { iid: 12 };
        assert!(warning.to_string().contains("!12"));
        assert!(warning.to_string().contains("commit title"));
    }

    #[test]
    fn test_tag_without_release_notes_display() {
        let warning = ReleaseWarning::TagWithoutReleaseNotes {
            tag: "1.0.1".to_string(),
        };
        assert!(warning.to_string().starts_with("Tag '1.0.1' has no release notes"));
    }
}
