//! Idempotent publication of the release tag.
//!
//! Per invocation the publisher walks
//! `CheckExistence -> {Skip | Create -> Push} -> {Done | Failed}` with no
//! persisted state in between. A tag that already exists is left alone and
//! the run succeeds, so re-running the pipeline is always safe. A tag that
//! exists locally but not on the remote is what a failed push leaves behind;
//! the rerun pushes it without creating it again. There is no
//! locking: two concurrent runs can both see the tag as missing, in which
//! case the later push is rejected and surfaces as a conflict.

use crate::boundary::BoundaryWarning;
use crate::domain::{Tag, TagPattern, Version};
use crate::error::Result;
use crate::git::TagRepository;
use crate::hooks::{HookContext, HookExecutor, HookSet, HookType};

/// Knobs for a publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    pub pattern: TagPattern,
    /// Annotation message; `{version}` is replaced with the version
    pub message_template: String,
    pub remote: String,
    /// Also ask the remote whether the tag exists before creating it
    pub check_remote: bool,
    /// Push after creating; when false the tag stays local
    pub push: bool,
    /// Stop after the existence check
    pub dry_run: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        PublishOptions {
            pattern: TagPattern::default(),
            message_template: "Release version {version}".to_string(),
            remote: "origin".to_string(),
            check_remote: true,
            push: true,
            dry_run: false,
        }
    }
}

/// Where an existing tag was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLocation {
    Local,
    Remote,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The tag already existed; nothing was changed
    Skipped { tag: String, location: TagLocation },
    /// Dry run: the tag would have been created
    WouldCreate { tag: Tag },
    /// Dry run: the existing local tag would have been pushed
    WouldPush { tag: String },
    /// An existing local tag missing from the remote was pushed
    Pushed { tag: String },
    /// The tag was created, and pushed unless pushing was disabled
    Created { tag: Tag, pushed: bool },
}

impl PublishOutcome {
    pub fn tag_name(&self) -> &str {
        match self {
            PublishOutcome::Skipped { tag, .. }
            | PublishOutcome::WouldPush { tag }
            | PublishOutcome::Pushed { tag } => tag,
            PublishOutcome::WouldCreate { tag } | PublishOutcome::Created { tag, .. } => &tag.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub outcome: PublishOutcome,
    pub warnings: Vec<BoundaryWarning>,
}

/// Ensures the annotated tag for a version exists on the remote exactly once
pub struct TagPublisher<'a, R: TagRepository + ?Sized> {
    repo: &'a R,
    options: PublishOptions,
    hooks: HookSet,
}

impl<'a, R: TagRepository + ?Sized> TagPublisher<'a, R> {
    pub fn new(repo: &'a R, options: PublishOptions) -> Self {
        TagPublisher {
            repo,
            options,
            hooks: HookSet::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn options(&self) -> &PublishOptions {
        &self.options
    }

    /// Publish the tag for `version`.
    ///
    /// The version is validated before the repository is touched. Transport
    /// and conflict errors from the repository are returned as-is; nothing is
    /// retried.
    pub fn publish(&self, version: &str) -> Result<PublishReport> {
        let version = Version::parse(version)?;
        let tag = self
            .options
            .pattern
            .tag_for(&version, &self.options.message_template);
        let remote = self.options.remote.as_str();
        let mut warnings = Vec::new();

        let span = tracing::info_span!("publish", tag = %tag.name, remote);
        let _guard = span.enter();

        let local = self.repo.exists(&tag.name)?;
        let on_remote = if self.options.check_remote {
            Some(self.repo.exists_on_remote(remote, &tag.name)?)
        } else {
            None
        };
        tracing::debug!(local, ?on_remote, "existence check");

        let location = match (local, on_remote) {
            (true, Some(true)) => Some(TagLocation::Both),
            (true, _) => Some(TagLocation::Local),
            (false, Some(true)) => Some(TagLocation::Remote),
            (false, _) => None,
        };

        if local && on_remote == Some(false) && self.options.push {
            return self.push_existing(tag, &version, warnings);
        }

        if let Some(location) = location {
            if local && on_remote == Some(false) {
                warnings.push(BoundaryWarning::LocalTagNotOnRemote {
                    tag: tag.name.clone(),
                    remote: remote.to_string(),
                });
            }
            tracing::info!(?location, "tag already exists, skipping");
            return Ok(PublishReport {
                outcome: PublishOutcome::Skipped {
                    tag: tag.name,
                    location,
                },
                warnings,
            });
        }

        if self.options.dry_run {
            return Ok(PublishReport {
                outcome: PublishOutcome::WouldCreate { tag },
                warnings,
            });
        }

        self.run_hook(HookType::PreTagCreate, &tag, &version, &mut warnings)?;

        self.repo.create(&tag.name, &tag.message)?;
        tracing::info!("tag created");
        self.run_hook(HookType::PostTagCreate, &tag, &version, &mut warnings)?;

        if !self.options.push {
            return Ok(PublishReport {
                outcome: PublishOutcome::Created { tag, pushed: false },
                warnings,
            });
        }

        self.repo.push(remote, &tag.name)?;
        tracing::info!("tag pushed");
        self.run_hook(HookType::PostPush, &tag, &version, &mut warnings)?;

        Ok(PublishReport {
            outcome: PublishOutcome::Created { tag, pushed: true },
            warnings,
        })
    }

    /// Push a local tag the remote does not have yet. The tag object is pushed
    /// as is, so its message and target stay those of the earlier run.
    fn push_existing(
        &self,
        tag: Tag,
        version: &Version,
        mut warnings: Vec<BoundaryWarning>,
    ) -> Result<PublishReport> {
        if self.options.dry_run {
            return Ok(PublishReport {
                outcome: PublishOutcome::WouldPush { tag: tag.name },
                warnings,
            });
        }

        self.repo.push(&self.options.remote, &tag.name)?;
        tracing::info!("existing local tag pushed");
        self.run_hook(HookType::PostPush, &tag, version, &mut warnings)?;

        Ok(PublishReport {
            outcome: PublishOutcome::Pushed { tag: tag.name },
            warnings,
        })
    }

    /// Run a configured hook. Blocking hooks propagate their error; the
    /// others turn a failure into a warning.
    fn run_hook(
        &self,
        hook_type: HookType,
        tag: &Tag,
        version: &Version,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<()> {
        let Some(script) = self.hooks.script_for(hook_type) else {
            return Ok(());
        };

        let context = HookContext {
            hook_type,
            tag: tag.name.clone(),
            version: version.to_string(),
            remote: self.options.remote.clone(),
        };

        match HookExecutor::execute(script, &context) {
            Ok(()) => Ok(()),
            Err(e) if hook_type.is_blocking() => Err(e),
            Err(e) => {
                tracing::warn!(hook = hook_type.name(), error = %e, "hook failed");
                warnings.push(BoundaryWarning::HookFailed {
                    hook: hook_type.name().to_string(),
                    reason: e.to_string(),
                });
                Ok(())
            }
        }
    }
}
