pub mod initialise_project;
pub mod log_relay;
pub mod prepare_all;

pub use initialise_project::{InitialiseProjectError, ProjectInitialiser};
pub use log_relay::{LogRelay, LogRelayError};
pub use prepare_all::{PrepareAllConfig, PrepareAllResult, ProjectManager};
