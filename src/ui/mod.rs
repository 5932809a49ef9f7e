//! User interface module - terminal output for the release commands.
//!
//! - `formatter` - Styling and message rendering
//! - This module - Report printers composed from the formatter

pub mod formatter;

pub use formatter::{
    describe_heading, describe_outcome, describe_update, display_boundary_warning,
    display_error, display_manual_push_instruction, display_status, display_success,
};

use crate::cli::orchestration::{TagReport, UpdateReport};
use crate::publisher::PublishOutcome;
use crate::version_file::VersionFileUpdate;

/// Print the result of the version-file update step
pub fn display_update_report(report: &UpdateReport) {
    display_status(&format!(
        "Latest version from changelog: {}",
        describe_heading(&report.heading)
    ));
    for warning in &report.warnings {
        display_boundary_warning(warning);
    }
    match report.update {
        VersionFileUpdate::Unchanged { .. } => display_status(&describe_update(&report.update)),
        VersionFileUpdate::Updated { .. } => display_success(&describe_update(&report.update)),
    }
}

/// Print the result of the tag step
pub fn display_tag_report(report: &TagReport) {
    display_status(&format!(
        "Latest version from changelog: {}",
        describe_heading(&report.heading)
    ));
    for warning in &report.publish.warnings {
        display_boundary_warning(warning);
    }

    let message = describe_outcome(&report.publish.outcome, &report.remote);
    match &report.publish.outcome {
        PublishOutcome::Skipped { .. }
        | PublishOutcome::WouldCreate { .. }
        | PublishOutcome::WouldPush { .. } => display_status(&message),
        PublishOutcome::Pushed { .. } => display_success(&message),
        PublishOutcome::Created { tag, pushed } => {
            display_success(&message);
            if !pushed {
                display_manual_push_instruction(&tag.name, &report.remote);
            }
        }
    }
}
