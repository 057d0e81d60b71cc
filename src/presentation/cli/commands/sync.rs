use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::application::use_cases::initialise_project::ProjectInitialiser;
use crate::application::use_cases::prepare_all::{PrepareAllConfig, ProjectManager};
use crate::common::error::SuperdevError;
use crate::common::result::ResultExt;
use crate::infrastructure::environment::{PrepareMode, ToxInitializer};
use crate::infrastructure::filesystem::CatalogStore;
use crate::infrastructure::git::GitClient;
use crate::infrastructure::process::ProcessRunner;
use crate::presentation::ui::{DisplayHelper, ReportRenderer, WarningCountdown};

/// Arguments of `superdev sync`
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Project catalog (.json, or YAML for any other extension)
    #[arg(long, env = "SUPERDEV_CATALOG", default_value = "git_projects.json")]
    pub catalog: PathBuf,

    /// Directory the projects are checked out under (created if missing)
    #[arg(long, env = "SUPERDEV_BASE_DIR", default_value = "..")]
    pub base_dir: PathBuf,

    /// Number of projects to synchronize at once (defaults to the CPU count)
    #[arg(short, long, env = "SUPERDEV_JOBS")]
    pub jobs: Option<usize>,

    /// Main-line branch; other branches are highlighted in the report
    #[arg(long, default_value = "main")]
    pub default_branch: String,

    /// Seconds to pause when something failed (0 to skip)
    #[arg(long, default_value_t = 10)]
    pub countdown: u64,

    /// Git executable
    #[arg(long, default_value = "git")]
    pub git: String,

    /// Command used to prepare environments
    #[arg(long, default_value = "pyenv exec tox")]
    pub env_tool: String,

    /// Run each environment's task instead of only installing its dependencies
    #[arg(long)]
    pub full_env: bool,
}

/// Validated settings for one sync run
#[derive(Debug, Clone, Validate)]
pub struct SyncSettings {
    pub catalog: PathBuf,

    pub base_dir: PathBuf,

    #[validate(range(min = 1))]
    pub jobs: usize,

    #[validate(length(min = 1))]
    pub default_branch: String,

    #[validate(range(max = 300))]
    pub countdown_seconds: u64,

    #[validate(length(min = 1))]
    pub git: String,

    #[validate(length(min = 1))]
    pub env_tool: Vec<String>,

    pub prepare_mode: PrepareMode,
}

impl From<SyncArgs> for SyncSettings {
    fn from(args: SyncArgs) -> Self {
        Self {
            catalog: args.catalog,
            base_dir: args.base_dir,
            jobs: args.jobs.unwrap_or_else(num_cpus::get),
            default_branch: args.default_branch,
            countdown_seconds: args.countdown,
            git: args.git,
            env_tool: args.env_tool.split_whitespace().map(str::to_string).collect(),
            prepare_mode: if args.full_env {
                PrepareMode::Full
            } else {
                PrepareMode::SetupOnly
            },
        }
    }
}

/// Handler for the sync command
pub struct SyncCommand {
    pub settings: SyncSettings,
    pub verbose: bool,
    pub use_color: bool,
}

impl SyncCommand {
    pub fn new(settings: SyncSettings, verbose: bool, use_color: bool) -> Self {
        Self {
            settings,
            verbose,
            use_color,
        }
    }

    /// Synchronize every catalog project and print the report.
    ///
    /// Returns whether every project succeeded.
    pub async fn execute(&self) -> Result<bool> {
        let settings = &self.settings;
        settings.validate().map_err(SuperdevError::from)?;

        tokio::fs::create_dir_all(&settings.base_dir)
            .await
            .with_filesystem_error("Failed to create base directory", Some(settings.base_dir.clone()))?;

        let catalog = CatalogStore::new().read_catalog(&settings.catalog).await?;

        if !ProcessRunner::program_exists(&settings.git).await {
            bail!("git executable '{}' could not be run", settings.git);
        }
        let projects = catalog.projects(&settings.base_dir);

        debug!(?settings, "Starting sync");

        let runner = Arc::new(ProcessRunner::new());
        let repository = GitClient::new(runner.clone())
            .with_executable(settings.git.clone())
            .with_default_branch(settings.default_branch.clone());
        let environments = ToxInitializer::new(runner).with_command(settings.env_tool.clone());
        let initialiser = ProjectInitialiser::new(Arc::new(repository), Arc::new(environments))
            .with_prepare_mode(settings.prepare_mode);

        DisplayHelper::new(self.use_color).info(&format!(
            "Synchronizing {} projects in {}",
            projects.len(),
            settings.base_dir.display()
        ));

        let manager = ProjectManager::new(projects, initialiser)
            .with_config(PrepareAllConfig::default().with_max_concurrency(settings.jobs));
        let result = manager.prepare_all().await;

        debug!(
            elapsed_ms = result.total_execution_time_ms,
            failures = result.failures().len(),
            "Sync finished"
        );

        ReportRenderer::new(self.use_color, settings.default_branch.clone())
            .with_details(self.verbose)
            .print(&result.outcomes);

        if !result.all_succeeded() {
            WarningCountdown::new(settings.countdown_seconds, self.use_color)
                .run()
                .await?;
        }

        Ok(result.all_succeeded())
    }
}
