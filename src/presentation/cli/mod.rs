pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::presentation::ui::{auto_display, color_enabled};
use commands::{LoggerCommand, SyncArgs, SyncCommand, SyncSettings};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SUPERDEV_GIT_HASH"),
    " ",
    env!("SUPERDEV_BUILD_DATE"),
    " ",
    env!("SUPERDEV_BUILD_TARGET"),
    ")"
);

/// Exit status when the run finished but some project failed
pub const EXIT_PROJECT_FAILURE: u8 = 2;

/// superdev - Bootstrap a developer workstation from a catalog of git projects
#[derive(Parser)]
#[command(name = "superdev")]
#[command(about = "Clone or update a set of git projects in parallel and prepare their environments")]
#[command(version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone or fast-forward every catalog project and prepare its environments
    #[command(alias = "init")]
    Sync(SyncArgs),

    /// Relay supervisord process logs with a per-process prefix
    Logger,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> ExitCode {
        let use_color = color_enabled(self.cli.no_color);
        colored::control::set_override(use_color);

        match self.handle_command(use_color).await {
            Ok(code) => code,
            Err(e) => {
                auto_display(self.cli.no_color).error(&format!("{:#}", e));
                ExitCode::FAILURE
            }
        }
    }

    async fn handle_command(&self, use_color: bool) -> anyhow::Result<ExitCode> {
        match &self.cli.command {
            Commands::Sync(args) => {
                let settings = SyncSettings::from(args.clone());
                let all_succeeded = SyncCommand::new(settings, self.cli.verbose, use_color)
                    .execute()
                    .await?;

                if all_succeeded {
                    Ok(ExitCode::SUCCESS)
                } else {
                    Ok(ExitCode::from(EXIT_PROJECT_FAILURE))
                }
            }
            Commands::Logger => {
                LoggerCommand.execute().await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
