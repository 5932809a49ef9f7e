pub mod orchestration;

pub use orchestration::{run_tag, run_update_version, TagReport, UpdateReport, WorkflowArgs};
