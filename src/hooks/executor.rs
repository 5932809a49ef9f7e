use crate::error::{ChangelogTagError, Result};
use crate::hooks::HookContext;
use std::path::Path;
use std::process::Command;

/// Executes changelog-tag hook scripts
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a hook script with the given context
    ///
    /// The script is executed with environment variables set from the context.
    /// If the script exits with code 0, the hook succeeds. Any non-zero exit code
    /// is treated as a failure.
    ///
    /// # Arguments
    /// * `script_path` - Path to the hook script (must be executable)
    /// * `context` - Hook context with environment variables
    ///
    /// # Returns
    /// * `Ok(())` if hook succeeds (exit code 0)
    /// * `Err` if script not found, not executable, or returns non-zero exit code
    pub fn execute(script_path: &Path, context: &HookContext) -> Result<()> {
        let hook = context.hook_type.name();

        if !script_path.exists() {
            return Err(ChangelogTagError::hook(format!(
                "{} script not found: {}",
                hook,
                script_path.display()
            )));
        }

        if !script_path.is_file() {
            return Err(ChangelogTagError::hook(format!(
                "{} path is not a file: {}",
                hook,
                script_path.display()
            )));
        }

        tracing::debug!(hook, script = %script_path.display(), "running hook");

        let output = Command::new(script_path)
            .envs(context.to_env_vars())
            .output()
            .map_err(|e| {
                ChangelogTagError::hook(format!(
                    "failed to execute {} script {}: {}",
                    hook,
                    script_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ChangelogTagError::hook(format!(
                "{} script {} failed with exit code {}\nStdout: {}\nStderr: {}",
                hook,
                script_path.display(),
                output.status.code().unwrap_or(-1),
                stdout.trim_end(),
                stderr.trim_end()
            )));
        }

        Ok(())
    }
}
