pub mod repository_client;

pub use repository_client::{GitClient, RepositoryClient, RepositoryError};

#[cfg(test)]
pub use repository_client::MockRepositoryClient;
