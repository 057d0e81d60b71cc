pub mod catalog;
pub mod outcome;
pub mod project;

pub use catalog::{Catalog, ProjectSpec};
pub use outcome::{Outcome, Status, UNKNOWN_BRANCH};
pub use project::Project;
