//! Reading release headings out of a Keep-a-Changelog style document.
//!
//! Changelogs are maintained newest-first, so the first heading in document
//! order is the current release. No sorting or version comparison happens
//! here; a changelog whose topmost heading is not the highest version still
//! yields that topmost heading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::VersionHeading;
use crate::error::{ChangelogTagError, Result};

/// `## [1.2.3]` optionally followed by `- <date>`. Whitespace between `##`
/// and `[` is optional. Non-numeric headings like `## [Unreleased]` never match.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^##\s*\[(?P<version>\d+(?:\.\d+)+)\](?:\s*-\s*(?P<date>.*))?")
        .expect("Invalid heading regex")
});

/// The changelog text, read once and never modified
#[derive(Debug, Clone)]
pub struct ChangelogDocument {
    text: String,
}

impl ChangelogDocument {
    pub fn from_text(text: impl Into<String>) -> Self {
        ChangelogDocument { text: text.into() }
    }

    /// Read the changelog at `path`; a missing file is an I/O error naming the path.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ChangelogTagError::Io(io::Error::new(
                e.kind(),
                format!("cannot read changelog {}: {}", path.display(), e),
            ))
        })?;
        Ok(ChangelogDocument { text })
    }

    /// All release headings in document order.
    pub fn headings(&self) -> Vec<VersionHeading> {
        self.text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let caps = HEADING_RE.captures(line)?;
                let version = caps.name("version")?.as_str();
                let date = caps
                    .name("date")
                    .map(|m| m.as_str().trim())
                    .filter(|d| !d.is_empty())
                    .map(str::to_string);
                Some(VersionHeading::new(version, date, index + 1))
            })
            .collect()
    }

    /// The first release heading, or [`ChangelogTagError::InputFormat`] when
    /// the document has none.
    pub fn latest_heading(&self) -> Result<VersionHeading> {
        self.headings().into_iter().next().ok_or_else(|| {
            ChangelogTagError::input_format(
                "no release heading of the form '## [X.Y.Z] - <date>' found",
            )
        })
    }
}

/// Finds the current release version in a changelog file
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    changelog_path: PathBuf,
}

impl VersionExtractor {
    pub fn new(changelog_path: impl Into<PathBuf>) -> Self {
        VersionExtractor {
            changelog_path: changelog_path.into(),
        }
    }

    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }

    /// Read the changelog and return its newest heading.
    pub fn extract(&self) -> Result<VersionHeading> {
        tracing::debug!(path = %self.changelog_path.display(), "reading changelog");
        let heading = ChangelogDocument::read(&self.changelog_path)?
            .latest_heading()
            .map_err(|e| match e {
                ChangelogTagError::InputFormat(msg) => ChangelogTagError::input_format(format!(
                    "{} in {}",
                    msg,
                    self.changelog_path.display()
                )),
                other => other,
            })?;
        tracing::debug!(
            version = %heading.version,
            line = heading.line,
            "found latest release heading"
        );
        Ok(heading)
    }
}
