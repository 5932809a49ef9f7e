/// A release heading parsed from the changelog, e.g. `## [1.2.3] - 2024-05-01`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionHeading {
    /// Version exactly as written between the brackets
    pub version: String,
    /// Free-form text after the `-` separator; never validated
    pub date: Option<String>,
    /// 1-based line number of the heading in the changelog
    pub line: usize,
}

impl VersionHeading {
    pub fn new(version: impl Into<String>, date: Option<String>, line: usize) -> Self {
        VersionHeading {
            version: version.into(),
            date,
            line,
        }
    }
}
