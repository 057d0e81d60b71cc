use crate::domain::value_objects::repository_url::RepositoryUrl;
use std::path::{Path, PathBuf};

/// A single git project to be cloned or updated under a base directory.
///
/// Immutable once built. Whether the project is cloned is read from the
/// filesystem on every call, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    base_directory: PathBuf,
    repository_url: RepositoryUrl,
    environment_init_list: Vec<String>,
    services: Vec<String>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        base_directory: impl Into<PathBuf>,
        repository_url: RepositoryUrl,
    ) -> Self {
        Self {
            name: name.into(),
            base_directory: base_directory.into(),
            repository_url,
            environment_init_list: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Environments to pre-build, in order.
    pub fn with_environment_init_list(mut self, environments: Vec<String>) -> Self {
        self.environment_init_list = environments;
        self
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn repository_url(&self) -> &RepositoryUrl {
        &self.repository_url
    }

    pub fn environment_init_list(&self) -> &[String] {
        &self.environment_init_list
    }

    /// Supporting services the project expects to be running. Informational.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Where the checkout lives: `base_directory/name`.
    pub fn path(&self) -> PathBuf {
        self.base_directory.join(&self.name)
    }

    pub fn is_cloned(&self) -> bool {
        self.path().exists()
    }
}
