use crate::domain::value_objects::repository_url::RepositoryUrl;
use crate::infrastructure::process::{CommandError, CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Repository client errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("git {operation} failed in {}: {source}", .path.display())]
    CommandFailed {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: CommandError,
    },
}

impl RepositoryError {
    pub fn operation(&self) -> &'static str {
        match self {
            RepositoryError::CommandFailed { operation, .. } => operation,
        }
    }

    pub fn command_error(&self) -> &CommandError {
        match self {
            RepositoryError::CommandFailed { source, .. } => source,
        }
    }
}

/// Version-control operations used to synchronize a checkout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Clone `url` into `base_directory/directory_name`.
    async fn clone_repository(
        &self,
        base_directory: &Path,
        url: &RepositoryUrl,
        directory_name: &str,
    ) -> Result<(), RepositoryError>;

    /// Switch the checkout to `branch`.
    async fn checkout(&self, path: &Path, branch: &str) -> Result<(), RepositoryError>;

    /// Update the current branch only if it can be fast-forwarded. Never merges
    /// or rebases.
    async fn fast_forward(&self, path: &Path) -> Result<(), RepositoryError>;

    /// True when there are no uncommitted changes and no untracked files.
    async fn is_clean(&self, path: &Path) -> Result<bool, RepositoryError>;

    /// Name of the checked-out branch.
    async fn current_branch(&self, path: &Path) -> Result<String, RepositoryError>;
}

/// [`RepositoryClient`] driving the `git` command line.
pub struct GitClient {
    runner: Arc<dyn CommandRunner>,
    git_executable: String,
    default_branch: String,
}

impl GitClient {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            git_executable: "git".to_string(),
            default_branch: "main".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.git_executable = executable.into();
        self
    }

    /// Branch used by [`GitClient::checkout_default`]
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Switch the checkout back to the main-line branch.
    pub async fn checkout_default(&self, path: &Path) -> Result<(), RepositoryError> {
        self.checkout(path, &self.default_branch).await
    }

    async fn git(
        &self,
        operation: &'static str,
        path: &Path,
        args: &[&str],
    ) -> Result<CommandOutput, RepositoryError> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(self.git_executable.clone());
        argv.extend(args.iter().map(|arg| arg.to_string()));

        // Credential prompts would block a worker with nobody to answer them
        let mut environment = HashMap::new();
        environment.insert("GIT_TERMINAL_PROMPT".to_string(), "0".to_string());
        // A checkout that is not a repository must fail, not act on an enclosing one
        if let Some(parent) = path.parent() {
            environment.insert(
                "GIT_CEILING_DIRECTORIES".to_string(),
                parent.to_string_lossy().into_owned(),
            );
        }

        self.runner
            .run(path, &argv, &environment)
            .await
            .map_err(|source| RepositoryError::CommandFailed {
                operation,
                path: path.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl RepositoryClient for GitClient {
    async fn clone_repository(
        &self,
        base_directory: &Path,
        url: &RepositoryUrl,
        directory_name: &str,
    ) -> Result<(), RepositoryError> {
        self.git("clone", base_directory, &["clone", "--", url.as_str(), directory_name])
            .await?;
        Ok(())
    }

    async fn checkout(&self, path: &Path, branch: &str) -> Result<(), RepositoryError> {
        self.git("checkout", path, &["checkout", branch]).await?;
        Ok(())
    }

    async fn fast_forward(&self, path: &Path) -> Result<(), RepositoryError> {
        self.git("pull", path, &["pull", "--ff-only"]).await?;
        Ok(())
    }

    async fn is_clean(&self, path: &Path) -> Result<bool, RepositoryError> {
        let output = self.git("status", path, &["status", "--porcelain"]).await?;
        Ok(output.stdout.trim().is_empty())
    }

    async fn current_branch(&self, path: &Path) -> Result<String, RepositoryError> {
        let output = self
            .git("rev-parse", path, &["rev-parse", "--abbrev-ref", "HEAD"])
            .await?;
        Ok(output.stdout.trim().to_string())
    }
}
