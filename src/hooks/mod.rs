//! Release hooks
//!
//! Optional user scripts run around tag publication:
//! - pre-tag-create: Before tag creation; a failure aborts the release
//! - post-tag-create: After the tag is created locally
//! - post-push: After the tag is pushed to the remote

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, HookType};

use std::path::PathBuf;

/// Resolved hook script paths; unset hooks are skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookSet {
    pub pre_tag_create: Option<PathBuf>,
    pub post_tag_create: Option<PathBuf>,
    pub post_push: Option<PathBuf>,
}

impl HookSet {
    pub fn script_for(&self, hook_type: HookType) -> Option<&PathBuf> {
        match hook_type {
            HookType::PreTagCreate => self.pre_tag_create.as_ref(),
            HookType::PostTagCreate => self.post_tag_create.as_ref(),
            HookType::PostPush => self.post_push.as_ref(),
        }
    }
}
