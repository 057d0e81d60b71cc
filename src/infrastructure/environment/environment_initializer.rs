use crate::infrastructure::process::{CommandError, CommandRunner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Environment initializer errors
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Preparing environment '{environment}' failed in {}: {source}", .path.display())]
    PrepareFailed {
        environment: String,
        path: PathBuf,
        #[source]
        source: CommandError,
    },
}

impl EnvironmentError {
    pub fn environment(&self) -> &str {
        match self {
            EnvironmentError::PrepareFailed { environment, .. } => environment,
        }
    }
}

/// How much of an environment's task to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrepareMode {
    /// Install dependencies but skip the task itself
    #[default]
    SetupOnly,
    /// Build the environment and run its task
    Full,
}

/// Prepares named build/test environments inside a checkout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnvironmentInitializer: Send + Sync {
    async fn prepare(
        &self,
        path: &Path,
        environment_name: &str,
        mode: PrepareMode,
    ) -> Result<(), EnvironmentError>;
}

/// [`EnvironmentInitializer`] that runs tox (through pyenv by default).
pub struct ToxInitializer {
    runner: Arc<dyn CommandRunner>,
    command: Vec<String>,
}

impl ToxInitializer {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            command: vec!["pyenv".to_string(), "exec".to_string(), "tox".to_string()],
        }
    }

    /// Replace the program (and leading arguments) used to invoke tox
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }

    fn argv(&self, environment_name: &str, mode: PrepareMode) -> Vec<String> {
        let mut argv = self.command.clone();
        argv.push("-e".to_string());
        argv.push(environment_name.to_string());
        if mode == PrepareMode::SetupOnly {
            argv.push("--notest".to_string());
        }
        argv
    }
}

#[async_trait]
impl EnvironmentInitializer for ToxInitializer {
    async fn prepare(
        &self,
        path: &Path,
        environment_name: &str,
        mode: PrepareMode,
    ) -> Result<(), EnvironmentError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };

        let mut environment = HashMap::new();
        environment.insert("PYENV_DIR".to_string(), absolute.to_string_lossy().into_owned());

        self.runner
            .run(path, &self.argv(environment_name, mode), &environment)
            .await
            .map_err(|source| EnvironmentError::PrepareFailed {
                environment: environment_name.to_string(),
                path: path.to_path_buf(),
                source,
            })?;

        Ok(())
    }
}
