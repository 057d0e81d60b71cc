//! # superdev - Developer Workstation Bootstrap
//!
//! `superdev` clones or fast-forwards a catalog of git projects in parallel,
//! pre-builds their test environments and prints a per-project summary.
//! It also ships a small supervisord event listener that merges the output of
//! supervised processes into one prefixed stream.
//!
//! ## Features
//!
//! - **Parallel Synchronization**: every project runs on a bounded worker pool
//! - **Safe Updates**: clean checkouts are fast-forwarded only; dirty or diverged ones are left alone
//! - **Environment Pre-build**: named tox environments are installed without running their tasks
//! - **Stable Reporting**: one line per project, in catalog order, whatever order the work finishes in
//!
//! ## Quick Start
//!
//! 1. Describe your projects (`git_projects.json`, or YAML):
//!
//! ```yaml
//! h:
//!   git_url: https://github.com/hypothesis/h.git
//!   tox_init: [dev, tests]
//! via:
//!   git_url: https://github.com/hypothesis/via.git
//! ```
//!
//! 2. Synchronize them next to the current directory:
//!
//! ```bash
//! superdev sync --catalog git_projects.json --base-dir ..
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Projects, outcomes and the catalog
//! - [`application`]: The per-project decision sequence, the worker pool and the log relay
//! - [`infrastructure`]: Process execution, git, tox and catalog files
//! - [`presentation`]: CLI interface and console report
//! - [`common`]: Shared error handling
//!
//! ## Error Handling
//!
//! - [`common::error::SuperdevError`]: errors that stop a run before any project is dispatched
//! - [`common::result::SuperdevResult`]: Type alias for `Result<T, SuperdevError>`
//!
//! Failures inside a project never escape its worker; they become the
//! project's [`domain::entities::outcome::Status`].
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use superdev::application::use_cases::{ProjectInitialiser, ProjectManager};
//! use superdev::infrastructure::{CatalogStore, GitClient, ProcessRunner, ToxInitializer};
//!
//! # async fn example() -> superdev::Result<()> {
//! let catalog = CatalogStore::new().read_catalog("git_projects.json").await?;
//!
//! let runner = Arc::new(ProcessRunner::new());
//! let initialiser = ProjectInitialiser::new(
//!     Arc::new(GitClient::new(runner.clone())),
//!     Arc::new(ToxInitializer::new(runner)),
//! );
//!
//! let manager = ProjectManager::new(catalog.projects(Path::new("..")), initialiser);
//! let result = manager.prepare_all().await;
//!
//! for outcome in &result.outcomes {
//!     println!("{}: {}", outcome.project_name, outcome.reason());
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::SuperdevError;
pub use crate::common::result::SuperdevResult as Result;
