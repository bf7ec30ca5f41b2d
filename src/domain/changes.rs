//! Normalization of free-form collaboration text into change entries

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Ordered list of sanitized, single-line change descriptions
///
/// Order follows the source text and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        ChangeSet::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    /// Render as a markdown list, one `- <entry>` line per change.
    pub fn to_bullet_list(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("- {}", entry))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<String>> for ChangeSet {
    fn from(entries: Vec<String>) -> Self {
        ChangeSet { entries }
    }
}

impl From<Vec<&str>> for ChangeSet {
    fn from(entries: Vec<&str>) -> Self {
        entries.into_iter().map(str::to_string).collect::<Vec<_>>().into()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.join("\n"))
    }
}

// Task-list item addressed to a user, e.g. "- [ ] @reviewer".
fn member_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[-*]\s*(?:\[[xX\s]*\]\s*)?@\s*[a-zA-Z0-9.\-]+")
            .expect("member reference pattern is valid")
    })
}

// Leading bullet runs such as "- - -", "***" or "-*".
fn bullet_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[-*]\s*)+").expect("bullet pattern is valid"))
}

fn clean_line(line: &str) -> String {
    let line = line.trim();
    let line = member_reference_regex().replace(line, "");
    let line = line.trim();
    bullet_run_regex().replace(line, "").trim().to_string()
}

/// Splits `text` into lines and keeps only those describing a change.
///
/// Each line is trimmed, stripped of a leading `@user` task-list reference and
/// of any leading bullet markers; lines left empty are dropped.
pub fn sanitize(text: &str) -> ChangeSet {
    text.split('\n')
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .into()
}
