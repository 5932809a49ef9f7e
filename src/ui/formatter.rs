//! Pure formatting functions for UI output.
//!
//! Plain-text renderers return `String`s so they can be tested; the
//! `display_*` functions add styling and print.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::VersionHeading;
use crate::publisher::{PublishOutcome, TagLocation};
use crate::version_file::VersionFileUpdate;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

pub fn describe_heading(heading: &VersionHeading) -> String {
    match &heading.date {
        Some(date) => format!("{} ({})", heading.version, date),
        None => heading.version.clone(),
    }
}

pub fn describe_update(update: &VersionFileUpdate) -> String {
    match update {
        VersionFileUpdate::Unchanged { version } => {
            format!("Version already at {}; nothing to do", version)
        }
        VersionFileUpdate::Updated {
            previous: Some(previous),
            current,
        } => format!("Updated version: {} -> {}", previous, current),
        VersionFileUpdate::Updated {
            previous: None,
            current,
        } => format!("Wrote version {}", current),
    }
}

pub fn describe_outcome(outcome: &PublishOutcome, remote: &str) -> String {
    match outcome {
        PublishOutcome::Skipped { tag, location } => {
            let place = match location {
                TagLocation::Local => "locally".to_string(),
                TagLocation::Remote => format!("on {}", remote),
                TagLocation::Both => format!("locally and on {}", remote),
            };
            format!("Tag {} already exists {}. No action needed", tag, place)
        }
        PublishOutcome::WouldCreate { tag } => format!(
            "Dry run: would create tag {} (\"{}\") and push it to {}",
            tag.name, tag.message, remote
        ),
        PublishOutcome::WouldPush { tag } => format!(
            "Dry run: tag {} exists locally only; would push it to {}",
            tag, remote
        ),
        PublishOutcome::Pushed { tag } => {
            format!("Pushed existing tag {} to {}", tag, remote)
        }
        PublishOutcome::Created { tag, pushed: true } => {
            format!("Created and pushed tag {} to {}", tag.name, remote)
        }
        PublishOutcome::Created { tag, pushed: false } => {
            format!("Created tag {} locally", tag.name)
        }
    }
}
