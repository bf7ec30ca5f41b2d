use crate::domain::version::SemanticVersion;
use crate::error::{ChangelogError, Result};

/// Tag naming pattern (e.g., "{version}", "v{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern, rejecting patterns without a placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains("{version}") {
            return Err(ChangelogError::config(
                "Tag pattern must contain {version} placeholder",
            ));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format_plain() {
        let pattern = TagPattern::new("{version}").unwrap();
        assert_eq!(pattern.format(&SemanticVersion::new(1, 2, 3)), "1.2.3");
    }

    #[test]
    fn test_pattern_format_with_prefix() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert_eq!(
            pattern.format(&SemanticVersion::release_candidate(1, 2, 3, 4)),
            "v1.2.3-rc.4"
        );
    }

    #[test]
    fn test_pattern_without_placeholder() {
        assert!(TagPattern::new("release").is_err());
    }
}
