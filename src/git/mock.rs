use crate::error::{ChangelogTagError, Result};
use crate::git::TagRepository;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

/// Mock repository for testing without actual git operations
///
/// Local tags map name to annotation message. Remote tags are tracked as a
/// plain set shared by every remote name. Pushing a tag the remote already
/// has is a conflict, mirroring a real remote refusing to move a tag.
#[derive(Debug, Default)]
pub struct MockRepository {
    local_tags: RefCell<BTreeMap<String, String>>,
    remote_tags: RefCell<BTreeSet<String>>,
    pushes: RefCell<Vec<(String, String)>>,
    creates: Cell<usize>,
    offline: Cell<bool>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a local tag
    pub fn add_tag(&self, name: impl Into<String>, message: impl Into<String>) {
        self.local_tags
            .borrow_mut()
            .insert(name.into(), message.into());
    }

    /// Make the remote advertise a tag that is not present locally
    pub fn add_remote_tag(&self, name: impl Into<String>) {
        self.remote_tags.borrow_mut().insert(name.into());
    }

    /// Make every remote operation fail with a transport error
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Annotation message of a local tag
    pub fn tag_message(&self, name: &str) -> Option<String> {
        self.local_tags.borrow().get(name).cloned()
    }

    pub fn remote_has(&self, name: &str) -> bool {
        self.remote_tags.borrow().contains(name)
    }

    /// `(remote, tag)` pairs pushed so far
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.borrow().clone()
    }

    /// Number of tags created through the trait
    pub fn create_count(&self) -> usize {
        self.creates.get()
    }

    fn check_online(&self, remote: &str) -> Result<()> {
        if self.offline.get() {
            return Err(ChangelogTagError::transport(format!(
                "could not connect to remote '{}'",
                remote
            )));
        }
        Ok(())
    }
}

impl TagRepository for MockRepository {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.local_tags.borrow().contains_key(name))
    }

    fn exists_on_remote(&self, remote: &str, name: &str) -> Result<bool> {
        self.check_online(remote)?;
        Ok(self.remote_has(name))
    }

    fn create(&self, name: &str, message: &str) -> Result<()> {
        if self.local_tags.borrow().contains_key(name) {
            return Err(ChangelogTagError::conflict(format!(
                "tag '{}' already exists locally",
                name
            )));
        }
        self.add_tag(name, message);
        self.creates.set(self.creates.get() + 1);
        Ok(())
    }

    fn push(&self, remote: &str, name: &str) -> Result<()> {
        self.check_online(remote)?;
        if !self.local_tags.borrow().contains_key(name) {
            return Err(ChangelogTagError::Git(git2::Error::from_str(&format!(
                "src refspec refs/tags/{} does not match any",
                name
            ))));
        }
        if self.remote_has(name) {
            return Err(ChangelogTagError::conflict(format!(
                "remote rejected refs/tags/{}: already exists",
                name
            )));
        }
        self.remote_tags.borrow_mut().insert(name.to_string());
        self.pushes
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }
}
