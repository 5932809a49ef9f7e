use std::collections::HashMap;

/// Points in the tag workflow where a user script can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    PreTagCreate,
    PostTagCreate,
    PostPush,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreTagCreate => "pre-tag-create",
            HookType::PostTagCreate => "post-tag-create",
            HookType::PostPush => "post-push",
        }
    }

    /// Whether a failing script aborts the workflow
    ///
    /// Only `pre-tag-create` can stop a release; once the tag exists a hook
    /// failure is reported but the tag stays.
    pub fn is_blocking(&self) -> bool {
        matches!(self, HookType::PreTagCreate)
    }
}

/// Context information passed to a hook
#[derive(Debug, Clone)]
pub struct HookContext {
    pub hook_type: HookType,
    /// Tag name being created or pushed
    pub tag: String,
    /// Version read from the changelog
    pub version: String,
    /// Remote the tag is published to
    pub remote: String,
}

impl HookContext {
    /// Maps context fields to CHANGELOG_TAG_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert(
            "CHANGELOG_TAG_HOOK".to_string(),
            self.hook_type.name().to_string(),
        );
        env.insert("CHANGELOG_TAG_NAME".to_string(), self.tag.clone());
        env.insert("CHANGELOG_TAG_VERSION".to_string(), self.version.clone());
        env.insert("CHANGELOG_TAG_REMOTE".to_string(), self.remote.clone());

        env
    }
}
