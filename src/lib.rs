pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logging;
pub mod publisher;
pub mod ui;
pub mod version_file;

pub use error::{ChangelogTagError, Result};
