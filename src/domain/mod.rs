//! Domain logic - pure release rules independent of git and the filesystem

pub mod heading;
pub mod tag;
pub mod version;

pub use heading::VersionHeading;
pub use tag::{Tag, TagPattern};
pub use version::Version;
