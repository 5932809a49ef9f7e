use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::{ChangelogTagError, Result};
use crate::hooks::HookSet;
use crate::publisher::PublishOptions;

/// File name looked up in the project root and the user config directory
pub const CONFIG_FILE_NAME: &str = "changelog-tag.toml";

/// Represents the complete configuration for changelog-tag.
///
/// Every section is optional; missing values fall back to the conventional
/// defaults (`CHANGELOG.md`, `VERSION`, tags named `v{version}` pushed to `origin`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

fn default_changelog() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_version_file() -> PathBuf {
    PathBuf::from("VERSION")
}

/// Locations of the changelog and the version file, relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            changelog: default_changelog(),
            version_file: default_version_file(),
        }
    }
}

fn default_tag_name() -> String {
    "v{version}".to_string()
}

fn default_tag_message() -> String {
    "Release version {version}".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// How release tags are named, annotated and published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Tag name pattern; must contain `{version}` exactly once
    #[serde(default = "default_tag_name")]
    pub name: String,

    #[serde(default = "default_tag_message")]
    pub message: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_true")]
    pub check_remote: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            name: default_tag_name(),
            message: default_tag_message(),
            remote: default_remote(),
            check_remote: true,
        }
    }
}

impl TagConfig {
    /// Validate the pattern and build publisher options (push on, dry run off).
    pub fn publish_options(&self) -> Result<PublishOptions> {
        Ok(PublishOptions {
            pattern: TagPattern::new(self.name.as_str())?,
            message_template: self.message.clone(),
            remote: self.remote.clone(),
            check_remote: self.check_remote,
            ..PublishOptions::default()
        })
    }
}

/// Optional hook scripts, relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HooksConfig {
    #[serde(default)]
    pub pre_tag_create: Option<PathBuf>,

    #[serde(default)]
    pub post_tag_create: Option<PathBuf>,

    #[serde(default)]
    pub post_push: Option<PathBuf>,
}

impl HooksConfig {
    /// Resolve relative script paths against `root`.
    pub fn resolve(&self, root: &Path) -> HookSet {
        let resolve = |p: &Option<PathBuf>| p.as_ref().map(|p| root.join(p));
        HookSet {
            pre_tag_create: resolve(&self.pre_tag_create),
            post_tag_create: resolve(&self.post_tag_create),
            post_push: resolve(&self.post_push),
        }
    }
}

impl Config {
    pub fn changelog_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.changelog)
    }

    pub fn version_file_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.version_file)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ChangelogTagError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog-tag.toml` in the project root
/// 3. `changelog-tag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists (or was named explicitly) but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(root),
    };

    let Some(path) = path else {
        tracing::debug!("no config file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path).map_err(|e| {
        ChangelogTagError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| ChangelogTagError::config(format!("cannot parse {}: {}", path.display(), e)))
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    let local = root.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
