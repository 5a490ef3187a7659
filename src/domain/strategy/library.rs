//! Purpose-keyed base template library.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::domain::foundation::{CatalogError, Purpose};

const BUILTIN_TEMPLATES: &str = include_str!("../../../data/templates.yaml");

static BUILTIN: Lazy<TemplateLibrary> = Lazy::new(|| {
    TemplateLibrary::from_yaml_str(BUILTIN_TEMPLATES)
        .expect("built-in template library must parse")
});

/// A static content template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTemplate {
    pub id: String,
    pub name: String,
    /// Field names in presentation order.
    pub structure: Vec<String>,
}

impl BaseTemplate {
    /// Used when a library has nothing registered for a purpose.
    pub fn general() -> Self {
        Self {
            id: "general_template".to_string(),
            name: "General Message".to_string(),
            structure: vec![
                "introduction".to_string(),
                "main_content".to_string(),
                "conclusion".to_string(),
            ],
        }
    }

    /// True when the feature names this template or one of its fields.
    pub fn carries(&self, feature: &str) -> bool {
        self.id == feature || self.structure.iter().any(|f| f == feature)
    }
}

/// Read-only lookup of base templates by purpose.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    entries: BTreeMap<Purpose, Vec<BaseTemplate>>,
}

impl TemplateLibrary {
    pub fn builtin() -> &'static TemplateLibrary {
        &BUILTIN
    }

    /// # Errors
    /// - `CatalogError::Parse` for malformed YAML
    /// - `CatalogError::DuplicateId` when a template id repeats within one purpose
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<Purpose, Vec<BaseTemplate>> = serde_yaml::from_str(yaml)?;

        for (purpose, templates) in &entries {
            let mut seen = HashSet::new();
            for template in templates {
                if !seen.insert(template.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        purpose: purpose.as_str().to_string(),
                        id: template.id.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Templates registered for a purpose, possibly empty.
    pub fn templates_for(&self, purpose: Purpose) -> &[BaseTemplate] {
        self.entries.get(&purpose).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
