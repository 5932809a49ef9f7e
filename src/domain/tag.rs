use crate::domain::Version;
use crate::error::{ChangelogTagError, Result};

/// Placeholder substituted with the version in tag patterns and messages
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// An annotated tag to be created for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub message: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a tag pattern, rejecting patterns without exactly one `{version}`
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches(VERSION_PLACEHOLDER).count() != 1 {
            return Err(ChangelogTagError::config(format!(
                "Tag pattern '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace(VERSION_PLACEHOLDER, version.as_str())
    }

    /// Build the annotated tag for `version`, rendering `message_template`
    /// with the same placeholder.
    pub fn tag_for(&self, version: &Version, message_template: &str) -> Tag {
        Tag::new(
            self.format(version),
            message_template.replace(VERSION_PLACEHOLDER, version.as_str()),
        )
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}
