//! Catalog override configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ConfigValidationError;
use crate::domain::audience::AudienceCatalog;
use crate::domain::foundation::CatalogError;
use crate::domain::strategy::TemplateLibrary;

/// Optional replacement files for the built-in catalogs
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML file replacing the built-in archetypes
    pub archetypes_file: Option<PathBuf>,

    /// YAML file replacing the built-in templates
    pub templates_file: Option<PathBuf>,
}

impl CatalogConfig {
    /// The configured archetype catalog, or the built-in one.
    pub fn audience_catalog(&self) -> Result<AudienceCatalog, CatalogError> {
        match &self.archetypes_file {
            Some(path) => AudienceCatalog::from_file(path),
            None => Ok(AudienceCatalog::builtin().clone()),
        }
    }

    /// The configured template library, or the built-in one.
    pub fn template_library(&self) -> Result<TemplateLibrary, CatalogError> {
        match &self.templates_file {
            Some(path) => TemplateLibrary::from_file(path),
            None => Ok(TemplateLibrary::builtin().clone()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for path in [&self.archetypes_file, &self.templates_file].into_iter().flatten() {
            if !path.is_file() {
                return Err(ConfigValidationError::CatalogFileMissing(
                    path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}
