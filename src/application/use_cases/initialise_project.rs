use crate::domain::entities::outcome::{Outcome, Status, UNKNOWN_BRANCH};
use crate::domain::entities::project::Project;
use crate::infrastructure::environment::{EnvironmentInitializer, PrepareMode};
use crate::infrastructure::git::{RepositoryClient, RepositoryError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that abort a project's decision sequence.
///
/// These never leave [`ProjectInitialiser::initialise`]; they become
/// [`Status::Unhandled`].
#[derive(Debug, Error)]
pub enum InitialiseProjectError {
    #[error("Repository operation failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Brings one project up to date: clone, fast-forward or skip, then prepare
/// its environments.
pub struct ProjectInitialiser {
    repository: Arc<dyn RepositoryClient>,
    environments: Arc<dyn EnvironmentInitializer>,
    prepare_mode: PrepareMode,
}

impl ProjectInitialiser {
    pub fn new(repository: Arc<dyn RepositoryClient>, environments: Arc<dyn EnvironmentInitializer>) -> Self {
        Self {
            repository,
            environments,
            prepare_mode: PrepareMode::SetupOnly,
        }
    }

    pub fn with_prepare_mode(mut self, mode: PrepareMode) -> Self {
        self.prepare_mode = mode;
        self
    }

    /// Run the decision sequence for `project`. Always returns an outcome.
    pub async fn initialise(&self, project: &Project) -> Outcome {
        let status = match self.initialise_checked(project).await {
            Ok(status) => {
                info!(project = project.name(), "Complete");
                status
            }
            Err(e) => {
                error!(project = project.name(), error = %e, "Unhandled exception");
                Status::Unhandled { detail: e.to_string() }
            }
        };

        let branch = self.branch(project).await;

        Outcome::new(project.name(), status, branch)
    }

    async fn initialise_checked(&self, project: &Project) -> Result<Status, InitialiseProjectError> {
        let status = self.update_repository(project).await?;
        Ok(self.prepare_environments(project, status).await)
    }

    async fn update_repository(&self, project: &Project) -> Result<Status, InitialiseProjectError> {
        let path = project.path();
        debug!(
            project = project.name(),
            path = %path.display(),
            services = ?project.services(),
            "Checking out"
        );

        if !project.is_cloned() {
            info!(project = project.name(), "Cloning...");
            self.repository
                .clone_repository(project.base_directory(), project.repository_url(), project.name())
                .await?;
            return Ok(Status::Cloned);
        }

        if !self.repository.is_clean(&path).await? {
            warn!(project = project.name(), "UNCOMMITTED CHANGES (skipping update)");
            return Ok(Status::UncommittedChanges);
        }

        info!(project = project.name(), "Updating...");
        match self.repository.fast_forward(&path).await {
            Ok(()) => Ok(Status::Updated),
            Err(e) => {
                warn!(project = project.name(), "UPDATE FAILED, CANNOT FAST FORWARD (skipping update)");
                debug!(project = project.name(), error = %e, "Fast-forward failed");
                Ok(Status::CouldNotFastForward)
            }
        }
    }

    /// Environment failures override whatever the repository step produced.
    async fn prepare_environments(&self, project: &Project, status: Status) -> Status {
        let path = project.path();

        for environment in project.environment_init_list() {
            info!(project = project.name(), "Initialising environment '{}'...", environment);

            if let Err(e) = self.environments.prepare(&path, environment, self.prepare_mode).await {
                warn!(project = project.name(), error = %e, "Environment prep failed");
                return Status::EnvironmentPrepFailed {
                    environment: environment.clone(),
                };
            }
        }

        status
    }

    async fn branch(&self, project: &Project) -> String {
        match self.repository.current_branch(&project.path()).await {
            Ok(branch) if !branch.is_empty() => branch,
            Ok(_) => UNKNOWN_BRANCH.to_string(),
            Err(e) => {
                debug!(project = project.name(), error = %e, "Could not read branch");
                UNKNOWN_BRANCH.to_string()
            }
        }
    }
}
