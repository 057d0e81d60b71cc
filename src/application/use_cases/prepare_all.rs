use crate::application::use_cases::initialise_project::ProjectInitialiser;
use crate::domain::entities::outcome::Outcome;
use crate::domain::entities::project::Project;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error};
use validator::Validate;

/// Worker-pool settings for [`ProjectManager::prepare_all`]
#[derive(Debug, Clone, Validate)]
pub struct PrepareAllConfig {
    /// Projects initialised at the same time
    #[validate(range(min = 1))]
    pub max_concurrency: usize,
}

impl Default for PrepareAllConfig {
    fn default() -> Self {
        Self {
            max_concurrency: num_cpus::get().max(1),
        }
    }
}

impl PrepareAllConfig {
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Outcomes of one run, in catalog order.
#[derive(Debug, Clone)]
pub struct PrepareAllResult {
    pub outcomes: Vec<Outcome>,
    pub total_execution_time_ms: u64,
}

impl PrepareAllResult {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(Outcome::success)
    }

    pub fn failures(&self) -> Vec<&Outcome> {
        self.outcomes.iter().filter(|outcome| !outcome.success()).collect()
    }

    pub fn total_count(&self) -> usize {
        self.outcomes.len()
    }
}

/// Runs [`ProjectInitialiser::initialise`] over every project on a bounded
/// worker pool.
pub struct ProjectManager {
    projects: Vec<Project>,
    initialiser: Arc<ProjectInitialiser>,
    config: PrepareAllConfig,
}

impl ProjectManager {
    pub fn new(projects: Vec<Project>, initialiser: ProjectInitialiser) -> Self {
        Self {
            projects,
            initialiser: Arc::new(initialiser),
            config: PrepareAllConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PrepareAllConfig) -> Self {
        self.config = config;
        self
    }

    /// Initialise every project and wait for all of them.
    ///
    /// Exactly one outcome per project, in the order the projects were given,
    /// whatever order the workers finish in. A failing or panicking project
    /// never cancels its siblings.
    pub async fn prepare_all(&self) -> PrepareAllResult {
        let start_time = Instant::now();
        let max_concurrency = self.config.max_concurrency.max(1);

        debug!(
            projects = self.projects.len(),
            max_concurrency, "Dispatching projects"
        );

        let semaphore = Arc::new(Semaphore::new(max_concurrency));

        let tasks: Vec<_> = self
            .projects
            .iter()
            .map(|project| {
                let project = project.clone();
                let semaphore = semaphore.clone();
                let initialiser = self.initialiser.clone();

                tokio::spawn(async move {
                    let _permit = match semaphore.acquire().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            return Outcome::unhandled(
                                project.name(),
                                format!("Failed to acquire semaphore: {}", e),
                            )
                        }
                    };

                    initialiser.initialise(&project).await
                })
            })
            .collect();

        let results = join_all(tasks).await;

        let outcomes = results
            .into_iter()
            .zip(&self.projects)
            .map(|(join_result, project)| match join_result {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    error!(project = project.name(), error = %join_err, "Unhandled exception");
                    Outcome::unhandled(project.name(), format!("Task join error: {}", join_err))
                }
            })
            .collect();

        PrepareAllResult {
            outcomes,
            total_execution_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}
