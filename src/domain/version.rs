use crate::error::{ChangelogTagError, Result};
use std::fmt;

/// A dotted numeric release version as written in the changelog (e.g. `1.2.3`).
///
/// Only the shape is checked. Components are never converted to integers, so
/// arbitrarily long ones are accepted and the tag name matches the changelog
/// text byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
}

impl Version {
    /// Parse and validate a version string.
    ///
    /// Accepts two or more dot-separated runs of ASCII digits. Anything else
    /// (empty input, a `v` prefix, pre-release suffixes, stray whitespace) is a
    /// [`ChangelogTagError::Validation`].
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(ChangelogTagError::validation("version string is empty"));
        }

        let mut count = 0;
        for part in input.split('.') {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(ChangelogTagError::validation(format!(
                    "'{}' is not a dotted numeric version",
                    input
                )));
            }
            count += 1;
        }

        if count < 2 {
            return Err(ChangelogTagError::validation(format!(
                "'{}' needs at least two components (e.g. 1.0)",
                input
            )));
        }

        Ok(Version {
            raw: input.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
