use crate::common::error::SuperdevError;
use crate::common::result::{ResultExt, SuperdevResult};
use crate::domain::entities::catalog::Catalog;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::debug;

/// Serialization format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// `.json` files are JSON, everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Loads the project catalog from disk.
#[derive(Debug)]
pub struct CatalogStore {
    validate: bool,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self { validate: true }
    }

    /// Skip [`Catalog::validate`] after parsing
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Read, parse and validate a catalog file.
    pub async fn read_catalog<P: AsRef<Path>>(&self, catalog_path: P) -> SuperdevResult<Catalog> {
        let catalog_path = catalog_path.as_ref();

        if !catalog_path.exists() {
            return Err(SuperdevError::catalog_error(
                format!("Catalog file not found: {}", catalog_path.display()),
                Some(catalog_path.to_path_buf()),
            ));
        }

        let contents = async_fs::read_to_string(catalog_path)
            .await
            .with_filesystem_error("Failed to read catalog", Some(catalog_path.to_path_buf()))?;

        let catalog = Self::parse(&contents, CatalogFormat::from_path(catalog_path)).map_err(|e| {
            SuperdevError::catalog_error_with_source(
                format!("Failed to parse {}", catalog_path.display()),
                Some(catalog_path.to_path_buf()),
                e,
            )
        })?;

        if self.validate {
            catalog.validate()?;
        }

        debug!(path = %catalog_path.display(), projects = catalog.len(), "Loaded catalog");

        Ok(catalog)
    }

    /// Parse catalog text in the given format.
    pub fn parse(contents: &str, format: CatalogFormat) -> SuperdevResult<Catalog> {
        let catalog = match format {
            CatalogFormat::Json => serde_json::from_str(contents)?,
            CatalogFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        Ok(catalog)
    }
}
