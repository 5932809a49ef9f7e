use std::fmt;

/// Non-fatal conditions met while releasing.
/// These are reported to the user but never change the exit status.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The newest changelog heading carries no date
    HeadingWithoutDate { version: String, line: usize },
    /// The tag exists locally but the remote does not advertise it
    LocalTagNotOnRemote { tag: String, remote: String },
    /// A post-create or post-push hook failed after the tag was made
    HookFailed { hook: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::HeadingWithoutDate { version, line } => {
                write!(
                    f,
                    "Changelog heading for {} (line {}) has no release date",
                    version, line
                )
            }
            BoundaryWarning::LocalTagNotOnRemote { tag, remote } => {
                write!(
                    f,
                    "Tag '{}' exists locally but not on '{}'; run `git push {} {}` to publish it",
                    tag, remote, remote, tag
                )
            }
            BoundaryWarning::HookFailed { hook, reason } => {
                write!(f, "Hook {} failed: {}", hook, reason)
            }
        }
    }
}
