use thiserror::Error;

/// Unified error type for changelog-tag operations
#[derive(Error, Debug)]
pub enum ChangelogTagError {
    /// The changelog has no heading a version can be read from
    #[error("Changelog format error: {0}")]
    InputFormat(String),

    /// A version string failed the shape check before any tag operation
    #[error("Invalid version: {0}")]
    Validation(String),

    /// The remote rejected the tag because it already exists there
    #[error("Tag conflict: {0}")]
    Conflict(String),

    /// Network or authentication failure talking to the remote
    #[error("Remote transport failed: {0}")]
    Transport(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hook failed: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changelog-tag
pub type Result<T> = std::result::Result<T, ChangelogTagError>;

impl ChangelogTagError {
    pub fn input_format(msg: impl Into<String>) -> Self {
        ChangelogTagError::InputFormat(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ChangelogTagError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ChangelogTagError::Conflict(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        ChangelogTagError::Transport(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogTagError::Config(msg.into())
    }

    pub fn hook(msg: impl Into<String>) -> Self {
        ChangelogTagError::Hook(msg.into())
    }

    /// Map a libgit2 error raised while talking to a remote.
    ///
    /// Network, SSH, HTTP and authentication failures become
    /// [`ChangelogTagError::Transport`]; everything else stays a plain git error.
    pub fn from_remote(err: git2::Error) -> Self {
        let transport_class = matches!(
            err.class(),
            git2::ErrorClass::Net
                | git2::ErrorClass::Ssh
                | git2::ErrorClass::Http
                | git2::ErrorClass::Ssl
        );
        if transport_class || err.code() == git2::ErrorCode::Auth {
            ChangelogTagError::Transport(err.message().to_string())
        } else {
            ChangelogTagError::Git(err)
        }
    }
}
