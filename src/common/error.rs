use std::path::PathBuf;
use thiserror::Error;

/// Crate-level errors raised before any project work is dispatched.
///
/// Failures that happen while a project is being synchronized never reach this
/// type: they are folded into that project's [`Outcome`](crate::domain::entities::outcome::Outcome).
#[derive(Error, Debug)]
pub enum SuperdevError {
    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Catalog error: {message}")]
    CatalogError {
        message: String,
        file_path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SuperdevError {
    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn catalog_error(message: impl Into<String>, file_path: Option<PathBuf>) -> Self {
        Self::CatalogError {
            message: message.into(),
            file_path,
            source: None,
        }
    }

    pub fn catalog_error_with_source(
        message: impl Into<String>,
        file_path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CatalogError {
            message: message.into(),
            file_path,
            source: Some(Box::new(source)),
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for SuperdevError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for SuperdevError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML deserialization failed", error)
    }
}

impl From<serde_json::Error> for SuperdevError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON deserialization failed", error)
    }
}

impl From<validator::ValidationErrors> for SuperdevError {
    fn from(error: validator::ValidationErrors) -> Self {
        Self::config_error_with_source("Invalid settings", error)
    }
}
