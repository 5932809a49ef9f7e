#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TWO_RELEASES: &str = "# Changelog\n\n## [Unreleased]\n\n## [0.2.0] - 2025-01-01\n### Added\n- Tagging from the changelog\n\n## [0.1.0] - 2024-01-01\n- Initial release\n";

/// A working repository with one commit and a bare `origin` next to it
pub struct TestProject {
    pub dir: TempDir,
    pub work: PathBuf,
    pub origin: PathBuf,
}

impl TestProject {
    pub fn new(changelog: &str) -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let work = dir.path().join("work");
        let origin = dir.path().join("origin.git");

        Repository::init_bare(&origin).expect("Could not init bare origin");
        let repo = Repository::init(&work).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        repo.remote("origin", origin.to_str().expect("utf-8 temp path"))
            .expect("Could not add origin");

        fs::write(work.join("CHANGELOG.md"), changelog).expect("Could not write changelog");
        commit_all(&repo, "Initial commit");

        TestProject { dir, work, origin }
    }

    pub fn repo(&self) -> Repository {
        Repository::open(&self.work).expect("Could not open work repo")
    }

    pub fn origin_repo(&self) -> Repository {
        Repository::open_bare(&self.origin).expect("Could not open origin")
    }

    pub fn write_changelog(&self, content: &str) {
        fs::write(self.work.join("CHANGELOG.md"), content).expect("Could not write changelog");
    }
}

pub fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().expect("Could not get index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("Could not add files");
    index.write().expect("Could not write index");
    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").expect("Could not build signature");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit");
}

/// Annotation message of a tag, or None for missing/lightweight tags
pub fn tag_message(repo: &Repository, name: &str) -> Option<String> {
    let reference = repo.find_reference(&format!("refs/tags/{}", name)).ok()?;
    let tag = reference.peel_to_tag().ok()?;
    tag.message().ok().flatten().map(|m| m.trim_end().to_string())
}

/// Sorted tag names of a repository
pub fn tag_names(repo: &Repository) -> Vec<String> {
    let mut names: Vec<String> = repo
        .tag_names(None)
        .expect("Could not list tags")
        .iter()
        .flatten()
        .flatten()
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("Could not read file")
}
