//! Purpose-keyed archetype catalog.
//!
//! The built-in catalog is compiled from `data/archetypes.yaml`. Hosts may
//! load a replacement file at startup; the catalog is read-only afterwards.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::AudienceArchetype;
use crate::domain::foundation::{CatalogError, ChoiceError, Purpose};

const BUILTIN_ARCHETYPES: &str = include_str!("../../../data/archetypes.yaml");

static BUILTIN: Lazy<AudienceCatalog> = Lazy::new(|| {
    AudienceCatalog::from_yaml_str(BUILTIN_ARCHETYPES)
        .expect("built-in archetype catalog must parse")
});

/// Read-only lookup of archetypes by purpose.
#[derive(Debug, Clone, Default)]
pub struct AudienceCatalog {
    entries: BTreeMap<Purpose, Vec<AudienceArchetype>>,
}

impl AudienceCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static AudienceCatalog {
        &BUILTIN
    }

    /// Parses a YAML document mapping purpose keys to archetype lists.
    ///
    /// # Errors
    /// - `CatalogError::Parse` for malformed YAML or unknown enum values
    /// - `CatalogError::DuplicateId` when an id repeats within one purpose
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<Purpose, Vec<AudienceArchetype>> = serde_yaml::from_str(yaml)?;

        for (purpose, archetypes) in &entries {
            let mut seen = HashSet::new();
            for archetype in archetypes {
                if !seen.insert(archetype.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        purpose: purpose.as_str().to_string(),
                        id: archetype.id.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Loads a catalog from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Archetypes registered for a purpose.
    ///
    /// # Errors
    /// `ChoiceError::UnknownPurpose` when nothing is registered.
    pub fn archetypes_for(&self, purpose: Purpose) -> Result<&[AudienceArchetype], ChoiceError> {
        match self.entries.get(&purpose) {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Err(ChoiceError::UnknownPurpose(purpose.as_str().to_string())),
        }
    }

    /// Purposes with at least one archetype.
    pub fn purposes(&self) -> impl Iterator<Item = Purpose> + '_ {
        self.entries
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(purpose, _)| *purpose)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DecisionStyle;
    use std::io::Write;

    #[test]
    fn builtin_covers_every_purpose() {
        let catalog = AudienceCatalog::builtin();
        for purpose in Purpose::all() {
            let archetypes = catalog.archetypes_for(*purpose).unwrap();
            assert_eq!(archetypes.len(), 3, "purpose {}", purpose.as_str());
        }
        assert_eq!(catalog.len(), 24);
    }

    #[test]
    fn builtin_keeps_solve_problems_personas() {
        let archetypes = AudienceCatalog::builtin()
            .archetypes_for(Purpose::SolveProblems)
            .unwrap();
        let urgent = archetypes
            .iter()
            .find(|a| a.id == "urgent_problem_solver")
            .unwrap();
        assert_eq!(urgent.label, "Maya Under Pressure");
        assert_eq!(urgent.decision_style, DecisionStyle::QuickDecisive);
        assert_eq!(urgent.remarks.len(), 3);
    }

    #[test]
    fn missing_purpose_is_unknown() {
        let catalog = AudienceCatalog::from_yaml_str("solve_problems: []").unwrap();
        match catalog.archetypes_for(Purpose::SolveProblems) {
            Err(ChoiceError::UnknownPurpose(p)) => assert_eq!(p, "solve_problems"),
            other => panic!("expected UnknownPurpose, got {:?}", other),
        }
        assert!(catalog.archetypes_for(Purpose::InformEducate).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = r#"
inform_educate:
  - id: twin
    label: A
    description: a
    communication_style: direct_factual
    decision_style: quick_decisive
    role: r
    experience_level: beginner
    time_constraint: moderate
    tech_comfort: low
  - id: twin
    label: B
    description: b
    communication_style: warm_personal
    decision_style: quick_decisive
    role: r
    experience_level: expert
    time_constraint: moderate
    tech_comfort: low
"#;
        assert!(matches!(
            AudienceCatalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_unknown_purpose_key() {
        assert!(matches!(
            AudienceCatalog::from_yaml_str("juggling: []"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUILTIN_ARCHETYPES.as_bytes()).unwrap();
        let catalog = AudienceCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.purposes().count(), 8);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AudienceCatalog::from_file("/nonexistent/archetypes.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/archetypes.yaml"));
    }
}
