//! Release workflow orchestration
//!
//! Glue between the configuration and the two release steps. Kept free of
//! clap and terminal output so the workflow can be driven from tests with a
//! mock repository and an in-memory file store.

use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::changelog::VersionExtractor;
use crate::config::Config;
use crate::domain::VersionHeading;
use crate::error::Result;
use crate::git::TagRepository;
use crate::publisher::{PublishReport, TagPublisher};
use crate::version_file::{update_version_file, FileWriter, VersionFileUpdate};

/// Command-line overrides for a workflow run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Project root the configured paths are relative to
    pub root: PathBuf,

    pub changelog: Option<PathBuf>,

    pub version_file: Option<PathBuf>,

    pub remote: Option<String>,

    /// Preview mode - don't create tags or push
    pub dry_run: bool,

    /// Create the tag locally without pushing
    pub no_push: bool,
}

impl WorkflowArgs {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        WorkflowArgs {
            root: root.into(),
            ..WorkflowArgs::default()
        }
    }

    /// Apply path and remote overrides onto a loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(changelog) = &self.changelog {
            config.paths.changelog = changelog.clone();
        }
        if let Some(version_file) = &self.version_file {
            config.paths.version_file = version_file.clone();
        }
        if let Some(remote) = &self.remote {
            config.tag.remote = remote.clone();
        }
    }
}

/// Result of the version-file update step
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub heading: VersionHeading,
    pub version_file: PathBuf,
    pub update: VersionFileUpdate,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of the tag step
#[derive(Debug, Clone, PartialEq)]
pub struct TagReport {
    pub heading: VersionHeading,
    pub remote: String,
    pub publish: PublishReport,
}

/// Read the newest heading from the configured changelog
pub fn extract_heading(config: &Config, root: &Path) -> Result<VersionHeading> {
    VersionExtractor::new(config.changelog_path(root)).extract()
}

/// Extract the version from the changelog and write it to the version file.
pub fn run_update_version<W: FileWriter + ?Sized>(
    config: &Config,
    root: &Path,
    writer: &W,
) -> Result<UpdateReport> {
    let heading = extract_heading(config, root)?;
    let mut warnings = Vec::new();
    if heading.date.is_none() {
        warnings.push(BoundaryWarning::HeadingWithoutDate {
            version: heading.version.clone(),
            line: heading.line,
        });
    }

    let version_file = config.version_file_path(root);
    let update = update_version_file(writer, &version_file, &heading.version)?;

    Ok(UpdateReport {
        heading,
        version_file,
        update,
        warnings,
    })
}

/// Re-derive the version from the changelog and publish its tag.
pub fn run_tag<R: TagRepository + ?Sized>(
    config: &Config,
    args: &WorkflowArgs,
    repo: &R,
) -> Result<TagReport> {
    let mut options = config.tag.publish_options()?;
    options.dry_run = args.dry_run;
    options.push = !args.no_push;

    let heading = extract_heading(config, &args.root)?;
    let publisher = TagPublisher::new(repo, options).with_hooks(config.hooks.resolve(&args.root));
    let publish = publisher.publish(&heading.version)?;

    Ok(TagReport {
        heading,
        remote: publisher.options().remote.clone(),
        publish,
    })
}
