pub mod environment_initializer;

pub use environment_initializer::{EnvironmentError, EnvironmentInitializer, PrepareMode, ToxInitializer};

#[cfg(test)]
pub use environment_initializer::MockEnvironmentInitializer;
