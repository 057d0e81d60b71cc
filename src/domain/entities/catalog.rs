use super::project::Project;
use crate::common::error::SuperdevError;
use crate::common::result::SuperdevResult;
use crate::domain::value_objects::repository_url::RepositoryUrl;
use regex::Regex;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use validator::{Validate, ValidationError};

/// Static declaration of one project in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProjectSpec {
    /// Where to clone the project from
    #[serde(alias = "git_url")]
    pub url: RepositoryUrl,

    /// Environments to pre-build after the checkout is ready
    #[serde(default, alias = "tox_init")]
    #[validate(custom(function = "validate_environment_names"))]
    pub environment_init: Vec<String>,

    /// Services the project depends on (informational)
    #[serde(default)]
    pub services: Vec<String>,
}

impl ProjectSpec {
    pub fn new(url: RepositoryUrl) -> Self {
        Self {
            url,
            environment_init: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn with_environment_init(mut self, environments: Vec<String>) -> Self {
        self.environment_init = environments;
        self
    }
}

fn validate_environment_names(names: &[String]) -> Result<(), ValidationError> {
    for name in names {
        if name.trim().is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
            let mut error = ValidationError::new("environment_name");
            error.message = Some(format!("invalid environment name '{}'", name).into());
            return Err(error);
        }
    }
    Ok(())
}

fn project_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid project name pattern"))
}

/// Ordered mapping of project name to declaration.
///
/// Declaration order is preserved; it is the order in which outcomes are
/// reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, ProjectSpec)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration, rejecting duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, spec: ProjectSpec) -> SuperdevResult<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(SuperdevError::catalog_error(
                format!("Duplicate project '{}'", name),
                None,
            ));
        }
        self.entries.push((name, spec));
        Ok(())
    }

    pub fn with_project(mut self, name: impl Into<String>, spec: ProjectSpec) -> SuperdevResult<Self> {
        self.insert(name, spec)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ProjectSpec> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Check every name is a single safe path component and every entry is valid.
    pub fn validate(&self) -> SuperdevResult<()> {
        let mut seen = HashSet::new();

        for (name, spec) in &self.entries {
            if !project_name_pattern().is_match(name) {
                return Err(SuperdevError::validation_error(
                    "name",
                    "project names must be a single path component of letters, digits, '.', '_' or '-'",
                    Some(name.clone()),
                ));
            }

            if !seen.insert(name.as_str()) {
                return Err(SuperdevError::catalog_error(
                    format!("Duplicate project '{}'", name),
                    None,
                ));
            }

            spec.validate().map_err(|e| {
                SuperdevError::validation_error(name.clone(), e.to_string(), None)
            })?;
        }

        Ok(())
    }

    /// Build the projects rooted at `base_directory`, in declaration order.
    pub fn projects(&self, base_directory: &Path) -> Vec<Project> {
        self.entries
            .iter()
            .map(|(name, spec)| {
                Project::new(name.clone(), base_directory, spec.url.clone())
                    .with_environment_init_list(spec.environment_init.clone())
                    .with_services(spec.services.clone())
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of project name to project declaration")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Catalog, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = Catalog::new();
                while let Some((name, spec)) = map.next_entry::<String, ProjectSpec>()? {
                    if catalog.get(&name).is_some() {
                        return Err(de::Error::custom(format!("duplicate project '{}'", name)));
                    }
                    catalog.entries.push((name, spec));
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
