// tests/integration_test.rs
mod common;

use changelog_tag::cli::{run_tag, run_update_version, WorkflowArgs};
use changelog_tag::config::Config;
use changelog_tag::git::{Git2Repository, TagRepository};
use changelog_tag::publisher::{PublishOutcome, TagLocation};
use changelog_tag::version_file::{FsFileWriter, VersionFileUpdate};
use changelog_tag::ChangelogTagError;
use common::{commit_all, read, tag_message, tag_names, TestProject, TWO_RELEASES};
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_changelog-tag"))
}

#[test]
fn test_help() {
    let output = bin().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("changelog-tag"));
    assert!(stdout.contains("update-version"));
    assert!(stdout.contains("release"));
}

#[test]
fn test_version_flag() {
    let output = bin().arg("--version").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_end_to_end_release_with_git2() {
    let project = TestProject::new(TWO_RELEASES);
    let config = Config::default();
    let args = WorkflowArgs::with_root(&project.work);
    let repo = Git2Repository::open(&project.work).unwrap();

    let update = run_update_version(&config, &project.work, &FsFileWriter).unwrap();
    assert_eq!(update.heading.version, "0.2.0");
    assert_eq!(
        update.update,
        VersionFileUpdate::Updated {
            previous: None,
            current: "0.2.0".to_string()
        }
    );
    assert_eq!(read(&project.work.join("VERSION")), "0.2.0\n");

    let first = run_tag(&config, &args, &repo).unwrap();
    assert!(matches!(
        first.publish.outcome,
        PublishOutcome::Created { pushed: true, .. }
    ));
    assert_eq!(
        tag_message(&project.repo(), "v0.2.0").as_deref(),
        Some("Release version 0.2.0")
    );
    assert_eq!(
        tag_message(&project.origin_repo(), "v0.2.0").as_deref(),
        Some("Release version 0.2.0")
    );
    assert_eq!(tag_names(&project.repo()), vec!["v0.2.0"]);

    // Second pipeline run with no changelog change is a no-op.
    let update = run_update_version(&config, &project.work, &FsFileWriter).unwrap();
    assert!(matches!(update.update, VersionFileUpdate::Unchanged { .. }));
    let second = run_tag(&config, &args, &repo).unwrap();
    assert_eq!(
        second.publish.outcome,
        PublishOutcome::Skipped {
            tag: "v0.2.0".to_string(),
            location: TagLocation::Both
        }
    );
    assert_eq!(tag_names(&project.repo()), vec!["v0.2.0"]);
    assert_eq!(tag_names(&project.origin_repo()), vec!["v0.2.0"]);
}

#[test]
fn test_new_changelog_entry_creates_next_tag() {
    let project = TestProject::new(TWO_RELEASES);
    let config = Config::default();
    let args = WorkflowArgs::with_root(&project.work);
    let repo = Git2Repository::open(&project.work).unwrap();

    run_tag(&config, &args, &repo).unwrap();

    project.write_changelog(&format!(
        "## [0.3.0] - 2025-03-01\n- More\n\n{}",
        TWO_RELEASES
    ));
    commit_all(&project.repo(), "docs: changelog for 0.3.0");

    let report = run_tag(&config, &args, &repo).unwrap();
    assert_eq!(report.publish.outcome.tag_name(), "v0.3.0");

    assert_eq!(tag_names(&project.origin_repo()), vec!["v0.2.0", "v0.3.0"]);
}

#[test]
fn test_tag_on_remote_only_is_not_recreated() {
    let project = TestProject::new(TWO_RELEASES);
    let repo = Git2Repository::open(&project.work).unwrap();

    // Tag published from another checkout: push it, then drop the local copy.
    repo.create("v0.2.0", "Release version 0.2.0").unwrap();
    repo.push("origin", "v0.2.0").unwrap();
    project.repo().tag_delete("v0.2.0").unwrap();
    assert!(!repo.exists("v0.2.0").unwrap());

    let report = run_tag(
        &Config::default(),
        &WorkflowArgs::with_root(&project.work),
        &repo,
    )
    .unwrap();
    assert_eq!(
        report.publish.outcome,
        PublishOutcome::Skipped {
            tag: "v0.2.0".to_string(),
            location: TagLocation::Remote
        }
    );
    assert!(!repo.exists("v0.2.0").unwrap());
}

#[test]
fn test_push_of_diverging_tag_is_conflict() {
    let project = TestProject::new(TWO_RELEASES);
    let repo = Git2Repository::open(&project.work).unwrap();

    repo.create("v0.2.0", "Release version 0.2.0").unwrap();
    repo.push("origin", "v0.2.0").unwrap();

    // Another tag object under the same name, as a concurrent run would create.
    project.repo().tag_delete("v0.2.0").unwrap();
    repo.create("v0.2.0", "Release version 0.2.0 (rebuilt)").unwrap();

    let err = repo.push("origin", "v0.2.0").unwrap_err();
    assert!(
        matches!(err, ChangelogTagError::Conflict(_)),
        "expected conflict, got {:?}",
        err
    );
    assert_eq!(
        tag_message(&project.origin_repo(), "v0.2.0").as_deref(),
        Some("Release version 0.2.0")
    );
}

#[test]
fn test_local_only_tag_is_pushed_on_rerun() {
    let project = TestProject::new(TWO_RELEASES);
    let repo = Git2Repository::open(&project.work).unwrap();

    // A previous run created the tag but its push never reached origin.
    repo.create("v0.2.0", "Release version 0.2.0").unwrap();
    assert!(tag_names(&project.origin_repo()).is_empty());

    let report = run_tag(
        &Config::default(),
        &WorkflowArgs::with_root(&project.work),
        &repo,
    )
    .unwrap();
    assert_eq!(
        report.publish.outcome,
        PublishOutcome::Pushed {
            tag: "v0.2.0".to_string()
        }
    );
    assert_eq!(
        tag_message(&project.origin_repo(), "v0.2.0").as_deref(),
        Some("Release version 0.2.0")
    );
}

#[test]
fn test_missing_remote_is_config_error() {
    let project = TestProject::new(TWO_RELEASES);
    let repo = Git2Repository::open(&project.work).unwrap();
    let args = WorkflowArgs {
        remote: Some("nowhere".to_string()),
        ..WorkflowArgs::with_root(&project.work)
    };
    let mut config = Config::default();
    args.apply(&mut config);

    let err = run_tag(&config, &args, &repo).unwrap_err();
    assert!(matches!(err, ChangelogTagError::Config(_)));
    assert!(!repo.exists("v0.2.0").unwrap());
}

#[test]
fn test_binary_release_then_rerun() {
    let project = TestProject::new(TWO_RELEASES);

    let output = bin()
        .arg("--root")
        .arg(&project.work)
        .arg("release")
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Created and pushed tag v0.2.0"), "stdout: {}", stdout);
    assert_eq!(read(&project.work.join("VERSION")), "0.2.0\n");

    let output = bin()
        .arg("--root")
        .arg(&project.work)
        .arg("tag")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("already exists"), "stdout: {}", stdout);
}

#[test]
fn test_binary_fails_without_heading() {
    let project = TestProject::new("# Changelog\n\n## [Unreleased]\n");

    let output = bin()
        .arg("--root")
        .arg(&project.work)
        .arg("update-version")
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no release heading"), "stderr: {}", stderr);
    assert!(!project.work.join("VERSION").exists());
}

#[test]
fn test_binary_show() {
    let project = TestProject::new(TWO_RELEASES);

    let output = bin()
        .arg("--root")
        .arg(&project.work)
        .arg("show")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "0.2.0\n");
}
