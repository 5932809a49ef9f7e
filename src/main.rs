use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use changelog_tag::cli::{run_tag, run_update_version, WorkflowArgs};
use changelog_tag::config::{self, Config};
use changelog_tag::git::Git2Repository;
use changelog_tag::ui;
use changelog_tag::version_file::FsFileWriter;
use changelog_tag::{cli, logging};

#[derive(Parser)]
#[command(
    name = "changelog-tag",
    version,
    about = "Derive the release version from the changelog and publish it as a git tag"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = ".", help = "Project root directory")]
    root: PathBuf,

    #[arg(long, global = true, help = "Changelog path relative to the root")]
    changelog: Option<PathBuf>,

    #[arg(long, global = true, help = "Version file path relative to the root")]
    version_file: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v debug, -vv trace)")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Write the newest changelog version into the version file
    UpdateVersion,
    /// Create and push the tag for the newest changelog version
    Tag(TagArgs),
    /// Update the version file, then publish the tag (default)
    Release(TagArgs),
    /// Print the newest changelog version
    Show,
}

#[derive(clap::Args, Default)]
struct TagArgs {
    #[arg(long, help = "Remote to check and push to")]
    remote: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Create the tag locally but do not push it")]
    no_push: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let command = args.command.unwrap_or(Command::Release(TagArgs::default()));

    let tag_args = match &command {
        Command::Tag(tag_args) | Command::Release(tag_args) => Some(tag_args),
        Command::UpdateVersion | Command::Show => None,
    };
    let workflow = WorkflowArgs {
        root: args.root.clone(),
        changelog: args.changelog.clone(),
        version_file: args.version_file.clone(),
        remote: tag_args.and_then(|t| t.remote.clone()),
        dry_run: tag_args.is_some_and(|t| t.dry_run),
        no_push: tag_args.is_some_and(|t| t.no_push),
    };

    let mut config = config::load_config(args.config.as_deref(), &args.root)
        .context("Error loading config")?;
    workflow.apply(&mut config);

    match command {
        Command::Show => {
            let heading = cli::orchestration::extract_heading(&config, &workflow.root)?;
            println!("{}", heading.version);
            if let Some(date) = heading.date {
                tracing::info!(date = %date, line = heading.line, "release heading");
            }
        }
        Command::UpdateVersion => update_version(&config, &workflow)?,
        Command::Tag(_) => tag(&config, &workflow)?,
        Command::Release(_) => {
            if workflow.dry_run {
                ui::display_status("Dry run: version file left untouched");
            } else {
                update_version(&config, &workflow)?;
            }
            tag(&config, &workflow)?;
        }
    }

    Ok(())
}

fn update_version(config: &Config, workflow: &WorkflowArgs) -> Result<()> {
    ui::display_status(&format!(
        "Reading changelog from: {}",
        config.changelog_path(&workflow.root).display()
    ));
    let report = run_update_version(config, &workflow.root, &FsFileWriter)?;
    ui::display_update_report(&report);
    Ok(())
}

fn tag(config: &Config, workflow: &WorkflowArgs) -> Result<()> {
    let repo = Git2Repository::open(&workflow.root)?;
    let report = run_tag(config, workflow, &repo)?;
    ui::display_tag_report(&report);
    Ok(())
}
