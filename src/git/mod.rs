//! Tag operations abstraction layer
//!
//! The release flow only ever needs four things from version control: ask
//! whether a tag exists (locally or on a remote), create an annotated tag at
//! HEAD, and push that tag. [TagRepository] captures exactly that surface so
//! the publisher can run against a real repository or an in-memory fake.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use changelog_tag::git::TagRepository;
//! # fn example<R: TagRepository>(repo: &R) -> changelog_tag::Result<()> {
//! if !repo.exists("v1.0.0")? {
//!     repo.create("v1.0.0", "Release version 1.0.0")?;
//!     repo.push("origin", "v1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations needed to publish a release tag
///
/// ## Error Handling
///
/// Implementations map network and authentication failures to
/// [crate::error::ChangelogTagError::Transport] and a remote refusing a tag
/// that already exists there to [crate::error::ChangelogTagError::Conflict].
pub trait TagRepository {
    /// Whether a tag with exactly this name exists in the local repository
    fn exists(&self, name: &str) -> Result<bool>;

    /// Whether `refs/tags/<name>` is advertised by the named remote
    ///
    /// This contacts the remote and may fail with a transport error.
    fn exists_on_remote(&self, remote: &str, name: &str) -> Result<bool>;

    /// Create an annotated tag at the current HEAD commit
    ///
    /// # Arguments
    /// * `name` - Name for the new tag (e.g. "v1.2.3")
    /// * `message` - Annotation message stored in the tag object
    fn create(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// # Returns
    /// * `Ok(())` - The remote accepted the tag
    /// * `Err(Conflict)` - The remote already has a different tag with this name
    /// * `Err(Transport)` - Network or authentication failure
    fn push(&self, remote: &str, name: &str) -> Result<()>;
}
