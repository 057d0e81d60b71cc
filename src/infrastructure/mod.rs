/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (command runner)
/// - Git operations on top of the command runner
/// - Build/test environment preparation on top of the command runner
/// - File system operations (catalog files)
pub mod environment;
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use environment::{EnvironmentError, EnvironmentInitializer, PrepareMode, ToxInitializer};
pub use filesystem::CatalogStore;
pub use git::{GitClient, RepositoryClient, RepositoryError};
pub use process::{CommandError, CommandOutput, CommandRunner, ProcessRunner};
