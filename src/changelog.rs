//! Changelog document reading and prepending
//!
//! The document is plain text whose first line holds the most recent version.
//! New entries are prepended by reading the whole file and rewriting it, so
//! the most-recent-first ordering holds after every write.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::boundary::ReleaseWarning;
use crate::domain::{extract_version, ChangeSet, SemanticVersion};
use crate::error::{ChangelogError, Result};

const NAIVE_TIMESTAMP_FORMAT: &str = "%a, %b %d %Y %H:%M:%S";

/// Formats a wall-clock timestamp, e.g. `Wed, Feb 15 2017 13:05:12  `.
///
/// The clock carries no zone information, so the offset and zone name
/// fields are empty, leaving two trailing spaces.
pub fn format_naive_timestamp(at: &NaiveDateTime) -> String {
    format!("{}  ", at.format(NAIVE_TIMESTAMP_FORMAT))
}

/// One release block of the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: SemanticVersion,
    pub changes: ChangeSet,
    pub released_at: String,
}

impl ChangelogEntry {
    /// Create an entry stamped with the local wall-clock time
    pub fn new(version: SemanticVersion, changes: ChangeSet) -> Self {
        let now = Local::now().naive_local();
        Self::with_timestamp(version, changes, format_naive_timestamp(&now))
    }

    pub fn with_timestamp(
        version: SemanticVersion,
        changes: ChangeSet,
        released_at: impl Into<String>,
    ) -> Self {
        ChangelogEntry {
            version,
            changes,
            released_at: released_at.into(),
        }
    }

    /// Renders the block that precedes the previous document content.
    pub fn render(&self) -> String {
        let changes = self
            .changes
            .iter()
            .map(|change| format!("  - {}", change))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{}\n\n{}\n\n", self.version, changes, self.released_at)
    }
}

/// Reads a changelog, treating a missing file as an empty document.
pub fn read_document(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Version read from a changelog, with the reason it is absent if it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentVersion {
    pub version: Option<SemanticVersion>,
    pub warning: Option<ReleaseWarning>,
}

/// Extracts the current version from the first line of the changelog.
///
/// A missing file, an empty file or a first line without a version token
/// yields no version together with the matching warning.
pub fn read_current_version(path: &Path) -> Result<CurrentVersion> {
    let Some(content) = read_document(path)? else {
        debug!(path = %path.display(), "Changelog does not exist yet");
        return Ok(CurrentVersion {
            version: None,
            warning: Some(ReleaseWarning::MissingChangelog {
                path: path.to_path_buf(),
            }),
        });
    };

    let version = version_from_document(&content)?;
    debug!(path = %path.display(), version = ?version.map(|v| v.to_string()), "Read current version");
    let warning = version
        .is_none()
        .then(|| ReleaseWarning::ChangelogWithoutVersion {
            path: path.to_path_buf(),
        });
    Ok(CurrentVersion { version, warning })
}

/// Version token on the first line of `content`, if any.
pub fn version_from_document(content: &str) -> Result<Option<SemanticVersion>> {
    let first_line = content.lines().next().unwrap_or_default();
    extract_version(first_line)
}

/// Prepends `entry` to the document at `path`.
///
/// The previous content is kept verbatim after the new block. Fails with
/// `NoChanges` before touching the file when the entry has no changes.
/// Returns the full rewritten document.
pub fn prepend_entry(path: &Path, entry: &ChangelogEntry) -> Result<String> {
    if entry.changes.is_empty() {
        return Err(ChangelogError::NoChanges);
    }

    let previous = read_document(path)?.unwrap_or_default();
    let mut document = entry.render();
    document.push_str(&previous);

    fs::write(path, &document)?;
    debug!(
        path = %path.display(),
        version = %entry.version,
        changes = entry.changes.len(),
        "Prepended changelog entry"
    );
    Ok(document)
}

/// Builds an entry stamped with the current time and prepends it.
pub fn append_entry(
    version: &SemanticVersion,
    changes: &ChangeSet,
    path: &Path,
) -> Result<String> {
    prepend_entry(path, &ChangelogEntry::new(*version, changes.clone()))
}
