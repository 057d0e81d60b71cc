use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Command runner errors
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("`{command}` failed with exit code {exit_code}: {output}")]
    Failed {
        command: String,
        exit_code: i32,
        output: String,
    },

    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl CommandError {
    /// Exit code of the failed process, if it ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Failed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }

    /// Captured stdout and stderr of the failed process.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            CommandError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Output of a command that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,

    /// Standard error output
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr.
    pub fn captured_output(&self) -> String {
        join_output(&self.stdout, &self.stderr)
    }
}

fn join_output(stdout: &str, stderr: &str) -> String {
    match (stdout.trim_end().is_empty(), stderr.trim_end().is_empty()) {
        (_, true) => stdout.trim_end().to_string(),
        (true, false) => stderr.trim_end().to_string(),
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
    }
}

/// Runs an external program in a directory and captures its output.
///
/// Implementations must not touch the process-wide working directory; the
/// directory is handed to the spawn call so runs in different checkouts can
/// proceed at the same time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `argv` inside `working_directory` with `environment` layered over the
    /// inherited environment. A non-zero exit is a [`CommandError::Failed`].
    async fn run(
        &self,
        working_directory: &Path,
        argv: &[String],
        environment: &HashMap<String, String>,
    ) -> Result<CommandOutput, CommandError>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Check if a program can be started from PATH.
    pub async fn program_exists(program: &str) -> bool {
        TokioCommand::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        working_directory: &Path,
        argv: &[String],
        environment: &HashMap<String, String>,
    ) -> Result<CommandOutput, CommandError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| CommandError::InvalidCommand("Command is empty".to_string()))?;
        let command_line = argv.join(" ");

        debug!(command = %command_line, cwd = %working_directory.display(), "Running command");

        let start_time = Instant::now();

        let output = TokioCommand::new(program)
            .args(args)
            .current_dir(working_directory)
            .envs(environment)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        debug!(
            command = %command_line,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            status = %output.status,
            "Command finished"
        );

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            // killed by a signal
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(CommandError::Failed {
                command: command_line,
                exit_code,
                output: join_output(&stdout, &stderr),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
