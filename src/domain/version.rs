use crate::error::{ChangelogError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Semantic version with an optional release-candidate counter
///
/// Serialized as `MAJOR.MINOR.PATCH` or `MAJOR.MINOR.PATCH-rc.N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub rc: Option<u64>,
}

/// Rule selecting which component of a version is incremented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpPolicy {
    Patch,
    Minor,
    Major,
    ReleaseCandidate,
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([0-9]+)\.([0-9]+)\.([0-9]+)(?:-rc\.([0-9]+))?")
            .expect("version pattern is valid")
    })
}

fn parse_component(raw: &str, text: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| {
        ChangelogError::invalid_version(format!(
            "component '{}' of '{}' is out of range",
            raw, text
        ))
    })
}

/// Scans `text` for the first version token.
///
/// Returns `Ok(None)` when no token is present (an empty changelog is not an
/// error). A token whose numbers cannot be represented is `InvalidVersion`.
pub fn extract_version(text: &str) -> Result<Option<SemanticVersion>> {
    let Some(captures) = version_regex().captures(text) else {
        return Ok(None);
    };

    let major = parse_component(&captures[1], text)?;
    let minor = parse_component(&captures[2], text)?;
    let patch = parse_component(&captures[3], text)?;
    let rc = captures
        .get(4)
        .map(|m| parse_component(m.as_str(), text))
        .transpose()?;

    Ok(Some(SemanticVersion {
        major,
        minor,
        patch,
        rc,
    }))
}

/// Computes the version that follows `current` under `policy`.
///
/// Without a current version the seed is `0.0.0`, or `0.0.1-rc.0` for release
/// candidates, so the first release candidate is `0.0.1-rc.1`.
pub fn next_version(current: Option<&SemanticVersion>, policy: BumpPolicy) -> SemanticVersion {
    let seed = match (current, policy) {
        (Some(version), _) => *version,
        (None, BumpPolicy::ReleaseCandidate) => SemanticVersion::release_candidate(0, 0, 1, 0),
        (None, _) => SemanticVersion::new(0, 0, 0),
    };
    seed.bump(policy)
}

impl SemanticVersion {
    /// Create a stable version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            rc: None,
        }
    }

    /// Create a release-candidate version
    pub fn release_candidate(major: u64, minor: u64, patch: u64, rc: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            rc: Some(rc),
        }
    }

    /// Parse a version from text that is required to contain one.
    ///
    /// Unlike [`extract_version`], a missing token is an error here.
    pub fn parse(text: &str) -> Result<Self> {
        text.parse()
    }

    /// Bump version according to policy
    pub fn bump(&self, policy: BumpPolicy) -> Self {
        match policy {
            BumpPolicy::Major => SemanticVersion::new(self.major + 1, 0, 0),
            BumpPolicy::Minor => SemanticVersion::new(self.major, self.minor + 1, 0),
            BumpPolicy::Patch => SemanticVersion::new(self.major, self.minor, self.patch + 1),
            BumpPolicy::ReleaseCandidate => SemanticVersion {
                rc: Some(self.rc.map_or(1, |rc| rc + 1)),
                ..*self
            },
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        extract_version(s)?.ok_or_else(|| {
            ChangelogError::invalid_version(format!(
                "'{}' does not contain a MAJOR.MINOR.PATCH version",
                s
            ))
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(rc) = self.rc {
            write!(f, "-rc.{}", rc)?;
        }
        Ok(())
    }
}

impl FromStr for BumpPolicy {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "patch" => Ok(BumpPolicy::Patch),
            "minor" => Ok(BumpPolicy::Minor),
            "major" => Ok(BumpPolicy::Major),
            "rc" | "release-candidate" | "releasecandidate" => Ok(BumpPolicy::ReleaseCandidate),
            other => Err(ChangelogError::config(format!(
                "Unknown bump policy: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpPolicy::Patch => "patch",
            BumpPolicy::Minor => "minor",
            BumpPolicy::Major => "major",
            BumpPolicy::ReleaseCandidate => "rc",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(current: &str, policy: BumpPolicy) -> String {
        let current = SemanticVersion::parse(current).unwrap();
        next_version(Some(&current), policy).to_string()
    }

    #[test]
    fn test_extract_stable_version() {
        let v = extract_version("1.2.3").unwrap().unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_extract_rc_version() {
        let v = extract_version("1.2.3-rc.1").unwrap().unwrap();
        assert_eq!(v, SemanticVersion::release_candidate(1, 2, 3, 1));
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let v = extract_version("Release 4.5.6-RC.7 notes").unwrap().unwrap();
        assert_eq!(v, SemanticVersion::release_candidate(4, 5, 6, 7));
    }

    #[test]
    fn test_extract_first_match_only() {
        let v = extract_version("1.2.3 replaces 1.2.2").unwrap().unwrap();
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_extract_absent() {
        assert_eq!(extract_version("").unwrap(), None);
        assert_eq!(extract_version("Changelog").unwrap(), None);
        assert_eq!(extract_version("1.2").unwrap(), None);
    }

    #[test]
    fn test_extract_ignores_non_ascii_digits() {
        assert_eq!(extract_version("Release ٣.٠.١").unwrap(), None);
        assert_eq!(
            extract_version("٣.٠.١ then 2.0.1").unwrap(),
            Some(SemanticVersion::new(2, 0, 1))
        );
    }

    #[test]
    fn test_extract_overflow_is_invalid() {
        let err = extract_version("99999999999999999999.0.0").unwrap_err();
        assert!(matches!(err, ChangelogError::InvalidVersion(_)));
    }

    #[test]
    fn test_parse_invalid_version() {
        let err = SemanticVersion::parse("abc").unwrap_err();
        assert!(matches!(err, ChangelogError::InvalidVersion(_)));
    }

    #[test]
    fn test_no_version_seeds() {
        assert_eq!(next_version(None, BumpPolicy::Patch).to_string(), "0.0.1");
        assert_eq!(next_version(None, BumpPolicy::Minor).to_string(), "0.1.0");
        assert_eq!(next_version(None, BumpPolicy::Major).to_string(), "1.0.0");
        assert_eq!(
            next_version(None, BumpPolicy::ReleaseCandidate).to_string(),
            "0.0.1-rc.1"
        );
    }

    #[test]
    fn test_stable_version_bumps() {
        assert_eq!(next("1.2.3", BumpPolicy::ReleaseCandidate), "1.2.3-rc.1");
        assert_eq!(next("1.2.3", BumpPolicy::Patch), "1.2.4");
        assert_eq!(next("1.2.3", BumpPolicy::Minor), "1.3.0");
        assert_eq!(next("1.2.3", BumpPolicy::Major), "2.0.0");
    }

    #[test]
    fn test_rc_version_bumps() {
        assert_eq!(next("1.2.3-rc.3", BumpPolicy::ReleaseCandidate), "1.2.3-rc.4");
        assert_eq!(next("1.2.3-rc.3", BumpPolicy::Patch), "1.2.4");
        assert_eq!(next("1.2.3-rc.3", BumpPolicy::Minor), "1.3.0");
        assert_eq!(next("1.2.3-rc.3", BumpPolicy::Major), "2.0.0");
    }

    #[test]
    fn test_version_display() {
        assert_eq!(SemanticVersion::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(
            SemanticVersion::release_candidate(0, 0, 1, 2).to_string(),
            "0.0.1-rc.2"
        );
    }

    #[test]
    fn test_bump_policy_parse() {
        assert_eq!("rc".parse::<BumpPolicy>().unwrap(), BumpPolicy::ReleaseCandidate);
        assert_eq!("MAJOR".parse::<BumpPolicy>().unwrap(), BumpPolicy::Major);
        assert!("huge".parse::<BumpPolicy>().is_err());
    }
}
