use std::cell::{Cell, RefCell};
use std::path::Path;

use git2::{Cred, CredentialType, Direction, ErrorCode, Remote, RemoteCallbacks};

use super::TagRepository;
use crate::error::{ChangelogTagError, Result};

/// Give up after this many credential attempts instead of letting libgit2 loop
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: git2::Repository,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::discover(path).map_err(|e| {
            ChangelogTagError::Git(git2::Error::new(
                e.code(),
                e.class(),
                format!("Not in a git repository ({}): {}", path.display(), e.message()),
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: git2::Repository) -> Self {
        Git2Repository { repo }
    }

    fn find_remote(&self, remote: &str) -> Result<Remote<'_>> {
        self.repo.find_remote(remote).map_err(|e| {
            ChangelogTagError::config(format!("Remote '{}' is not configured: {}", remote, e))
        })
    }
}

/// Credentials callback: SSH keys from ~/.ssh, then the SSH agent, then git's
/// credential helpers for HTTPS, then default credentials.
fn remote_callbacks<'a>(config: &'a git2::Config, attempts: &'a Cell<usize>) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        attempts.set(attempts.get() + 1);
        if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::new(
                ErrorCode::Auth,
                git2::ErrorClass::Net,
                format!("authentication failed for {}", url),
            ));
        }

        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(cred) = Cred::credential_helper(config, url, username_from_url) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

/// Classify the status string a remote attaches to a rejected ref update
fn rejection_error(refname: &str, status: &str) -> ChangelogTagError {
    let lowered = status.to_lowercase();
    if lowered.contains("already exists") || lowered.contains("non-fast-forward") {
        ChangelogTagError::conflict(format!("remote rejected {}: {}", refname, status))
    } else {
        ChangelogTagError::transport(format!("remote rejected {}: {}", refname, status))
    }
}

impl TagRepository for Git2Repository {
    fn exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) if e.code() == ErrorCode::InvalidSpec => Err(ChangelogTagError::validation(
                format!("'{}' is not a valid tag name", name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn exists_on_remote(&self, remote: &str, name: &str) -> Result<bool> {
        let config = self.repo.config()?;
        let attempts = Cell::new(0);
        let mut remote = self.find_remote(remote)?;

        let connection = remote
            .connect_auth(
                Direction::Fetch,
                Some(remote_callbacks(&config, &attempts)),
                None,
            )
            .map_err(ChangelogTagError::from_remote)?;

        let refname = format!("refs/tags/{}", name);
        let found = connection
            .list()
            .map_err(ChangelogTagError::from_remote)?
            .iter()
            .any(|head| head.name() == refname);

        Ok(found)
    }

    fn create(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| {
                if e.code() == ErrorCode::Exists {
                    ChangelogTagError::conflict(format!("tag '{}' already exists locally", name))
                } else {
                    ChangelogTagError::Git(e)
                }
            })?;

        tracing::debug!(tag = name, commit = %head.id(), "annotated tag created");
        Ok(())
    }

    fn push(&self, remote_name: &str, name: &str) -> Result<()> {
        let config = self.repo.config()?;
        let attempts = Cell::new(0);
        let rejection: RefCell<Option<(String, String)>> = RefCell::new(None);
        let mut remote = self.find_remote(remote_name)?;

        let mut callbacks = remote_callbacks(&config, &attempts);
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                *rejection.borrow_mut() = Some((refname.to_string(), status.to_string()));
            }
            Ok(())
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        if let Err(e) = remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            let err = if e.code() == ErrorCode::NotFastForward {
                ChangelogTagError::conflict(format!("remote rejected tag '{}': {}", name, e))
            } else {
                ChangelogTagError::from_remote(e)
            };
            return Err(self.conflict_if_on_remote(remote_name, name, err));
        }

        if let Some((refname, status)) = rejection.borrow_mut().take() {
            return Err(rejection_error(&refname, &status));
        }

        tracing::debug!(tag = name, "tag pushed");
        Ok(())
    }
}

impl Git2Repository {
    /// libgit2 checks fast-forwards client side and reports a diverging tag as
    /// a generic object error. If the remote already advertises the tag, the
    /// failed push is a conflict regardless of how libgit2 phrased it.
    fn conflict_if_on_remote(
        &self,
        remote: &str,
        name: &str,
        err: ChangelogTagError,
    ) -> ChangelogTagError {
        match err {
            ChangelogTagError::Git(e) => {
                if matches!(self.exists_on_remote(remote, name), Ok(true)) {
                    ChangelogTagError::conflict(format!(
                        "tag '{}' already exists on {}: {}",
                        name,
                        remote,
                        e.message()
                    ))
                } else {
                    ChangelogTagError::Git(e)
                }
            }
            other => other,
        }
    }
}
