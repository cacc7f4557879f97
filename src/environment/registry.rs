//! Environment type registry.
//!
//! Holds the fixed catalog of environment types and resolves raw
//! environment strings to them. Both indexes (name and acronym) use the
//! same case-insensitive key policy. Acronyms take precedence over names
//! when a string appears in both.

use std::collections::HashMap;

use super::kind::{fold_key, EnvironmentType};
use super::metadata::EnvironmentMetadata;
use crate::error::{EnvGuardError, KeyIndex, Result};

/// Registry of known environment types.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct EnvironmentTypeRegistry {
    types: Vec<EnvironmentType>,
    by_name: HashMap<String, usize>,
    by_acronym: HashMap<String, usize>,
}

impl EnvironmentTypeRegistry {
    /// Build a registry from a list of environment types.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if two types share a name, or two acronyms
    /// collide, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use envguard::environment::{EnvironmentMetadata, EnvironmentType, EnvironmentTypeRegistry};
    ///
    /// let registry = EnvironmentTypeRegistry::new([
    ///     EnvironmentType::new("Production", "desc", 1000, ["PROD", "P"]).unwrap(),
    ///     EnvironmentType::new("Development", "desc", 0, ["DEV", "D"]).unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// let metadata = EnvironmentMetadata::default().with_environment("prod");
    /// assert_eq!(registry.resolve(&metadata).unwrap().name(), "Production");
    /// ```
    pub fn new(types: impl IntoIterator<Item = EnvironmentType>) -> Result<Self> {
        Self::from_entries(types.into_iter().map(Some))
    }

    /// Build a registry from a list whose entries may be absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the index of the first absent entry,
    /// or `DuplicateKey` as for [`EnvironmentTypeRegistry::new`].
    pub fn from_entries(entries: impl IntoIterator<Item = Option<EnvironmentType>>) -> Result<Self> {
        let mut registry = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
            by_acronym: HashMap::new(),
        };

        for (index, entry) in entries.into_iter().enumerate() {
            let Some(environment_type) = entry else {
                return Err(EnvGuardError::invalid_argument(
                    "environment_types",
                    format!("entry at index {} is absent", index),
                ));
            };
            registry.insert(environment_type)?;
        }

        tracing::debug!(
            "Registered {} environment types ({} acronyms)",
            registry.types.len(),
            registry.by_acronym.len()
        );

        Ok(registry)
    }

    /// The built-in catalog used when no types are configured.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog is malformed, which
    /// `builtin_catalog_is_valid` rules out.
    pub fn builtin() -> Self {
        builtin_environment_types()
            .and_then(|types| Self::new(types))
            .expect("built-in environment catalog is valid")
    }

    /// Add one type. On error the registry is left unchanged.
    fn insert(&mut self, environment_type: EnvironmentType) -> Result<()> {
        let slot = self.types.len();

        let name_key = fold_key(environment_type.name());
        if self.by_name.contains_key(&name_key) {
            return Err(EnvGuardError::DuplicateKey {
                key: environment_type.name().to_string(),
                index: KeyIndex::Name,
            });
        }

        let mut acronym_keys: Vec<String> = Vec::with_capacity(environment_type.acronyms().len());
        for acronym in environment_type.acronyms() {
            let key = fold_key(acronym);
            if self.by_acronym.contains_key(&key) || acronym_keys.contains(&key) {
                return Err(EnvGuardError::DuplicateKey {
                    key: acronym.clone(),
                    index: KeyIndex::Acronym,
                });
            }
            acronym_keys.push(key);
        }

        self.by_name.insert(name_key, slot);
        for key in acronym_keys {
            self.by_acronym.insert(key, slot);
        }
        self.types.push(environment_type);
        Ok(())
    }

    /// Resolve metadata to a registered environment type.
    ///
    /// Returns `None` when the metadata has no environment, or when the
    /// environment matches no registered name or acronym.
    pub fn resolve(&self, metadata: &EnvironmentMetadata) -> Option<&EnvironmentType> {
        self.lookup(metadata.environment.as_deref()?)
    }

    /// Look up a raw environment string, acronyms first.
    pub fn lookup(&self, environment: &str) -> Option<&EnvironmentType> {
        let key = fold_key(environment);
        self.by_acronym
            .get(&key)
            .or_else(|| self.by_name.get(&key))
            .map(|&slot| &self.types[slot])
    }

    /// Look up by canonical name only.
    pub fn get(&self, name: &str) -> Option<&EnvironmentType> {
        self.by_name
            .get(&fold_key(name))
            .map(|&slot| &self.types[slot])
    }

    /// Whether the string is a registered name or acronym.
    pub fn contains(&self, environment: &str) -> bool {
        self.lookup(environment).is_some()
    }

    /// Types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EnvironmentType> {
        self.types.iter()
    }

    /// Types from most to least sensitive; ties keep registration order.
    pub fn by_sensitivity(&self) -> Vec<&EnvironmentType> {
        let mut sorted: Vec<&EnvironmentType> = self.types.iter().collect();
        sorted.sort_by(|a, b| b.cmp_sensitivity(a));
        sorted
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for EnvironmentTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The built-in environment types.
///
/// # Errors
///
/// Returns `InvalidArgument` if an entry of the catalog is malformed.
pub fn builtin_environment_types() -> Result<Vec<EnvironmentType>> {
    let defs: [(&str, &str, u32, &[&str]); 5] = [
        (
            "Production",
            "Live systems serving customers",
            1000,
            &["PROD", "PRD", "P"],
        ),
        (
            "Staging",
            "Pre-production mirror of live systems",
            500,
            &["STG", "STAGE"],
        ),
        (
            "UAT",
            "User acceptance testing",
            400,
            &["U"],
        ),
        (
            "Test",
            "Automated and manual testing",
            100,
            &["TST", "TEST", "T"],
        ),
        (
            "Development",
            "Disposable developer environments",
            0,
            &["DEV", "D"],
        ),
    ];

    defs.into_iter()
        .map(|(name, description, sensitivity, acronyms)| {
            EnvironmentType::new(name, description, sensitivity, acronyms.iter().copied())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str, sensitivity: u32, acronyms: &[&str]) -> EnvironmentType {
        EnvironmentType::new(name, "desc", sensitivity, acronyms.iter().copied()).unwrap()
    }

    fn sample() -> EnvironmentTypeRegistry {
        EnvironmentTypeRegistry::new([
            env("Production", 1000, &["PROD", "P"]),
            env("Development", 0, &["DEV", "D"]),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive_for_acronyms() {
        let registry = sample();
        for candidate in ["PROD", "prod", "Prod"] {
            assert_eq!(registry.lookup(candidate).unwrap().name(), "Production");
        }
    }

    #[test]
    fn lookup_is_case_insensitive_for_names() {
        let registry = sample();
        assert_eq!(registry.lookup("DEVELOPMENT").unwrap().name(), "Development");
        assert_eq!(registry.lookup("development").unwrap().name(), "Development");
    }

    #[test]
    fn lookup_does_not_trim() {
        assert!(sample().lookup(" PROD").is_none());
    }

    #[test]
    fn acronym_wins_over_name() {
        // "Dev" is the name of one type and an acronym of another.
        let registry = EnvironmentTypeRegistry::new([
            env("Dev", 0, &[]),
            env("Development", 10, &["DEV"]),
        ])
        .unwrap();
        assert_eq!(registry.lookup("dev").unwrap().name(), "Development");
        assert_eq!(registry.get("dev").unwrap().name(), "Dev");
    }

    #[test]
    fn resolve_without_environment_is_none() {
        assert!(sample().resolve(&EnvironmentMetadata::default()).is_none());
    }

    #[test]
    fn resolve_unmatched_is_none() {
        let metadata = EnvironmentMetadata::default().with_environment("QA");
        assert!(sample().resolve(&metadata).is_none());
    }

    #[test]
    fn duplicate_acronym_fails() {
        let result = EnvironmentTypeRegistry::new([
            env("Production", 1000, &["P"]),
            env("Preview", 10, &["p"]),
        ]);
        assert!(matches!(
            result,
            Err(EnvGuardError::DuplicateKey { ref key, index: KeyIndex::Acronym }) if key == "p"
        ));
    }

    #[test]
    fn duplicate_name_fails() {
        let result = EnvironmentTypeRegistry::new([
            env("Production", 1000, &["PROD"]),
            env("PRODUCTION", 10, &["X"]),
        ]);
        assert!(matches!(
            result,
            Err(EnvGuardError::DuplicateKey { index: KeyIndex::Name, .. })
        ));
    }

    #[test]
    fn duplicate_acronym_within_one_type_fails() {
        let result = EnvironmentTypeRegistry::new([env("Production", 1000, &["P", "P"])]);
        assert!(result.is_err());
    }

    #[test]
    fn absent_entry_reports_index() {
        let result = EnvironmentTypeRegistry::from_entries([
            Some(env("Production", 1000, &["PROD"])),
            None,
        ]);
        match result {
            Err(EnvGuardError::InvalidArgument { argument, message }) => {
                assert_eq!(argument, "environment_types");
                assert!(message.contains("index 1"));
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn by_sensitivity_is_descending() {
        let registry = EnvironmentTypeRegistry::new([
            env("Development", 0, &[]),
            env("Production", 1000, &[]),
            env("Test", 100, &[]),
        ])
        .unwrap();
        let names: Vec<&str> = registry.by_sensitivity().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Production", "Test", "Development"]);
    }

    #[test]
    fn iter_keeps_registration_order() {
        let registry = sample();
        let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Production", "Development"]);
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let types = builtin_environment_types().unwrap();
        assert_eq!(types.len(), 5);
        assert!(EnvironmentTypeRegistry::new(types).is_ok());
    }

    #[test]
    fn failed_insert_leaves_registry_unchanged() {
        let mut registry = sample();
        let clash = env("Staging", 500, &["STG", "dev"]);
        assert!(matches!(
            registry.insert(clash),
            Err(EnvGuardError::DuplicateKey { index: KeyIndex::Acronym, .. })
        ));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("Staging").is_none());
        assert!(registry.lookup("STG").is_none());
        assert_eq!(registry.lookup("DEV").unwrap().name(), "Development");
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let registry = EnvironmentTypeRegistry::builtin();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.lookup("prd").unwrap().name(), "Production");
        assert_eq!(registry.lookup("uat").unwrap().name(), "UAT");
        assert_eq!(registry.lookup("stage").unwrap().name(), "Staging");
        assert!(registry.contains("d"));
    }

    #[test]
    fn empty_registry() {
        let registry = EnvironmentTypeRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.lookup("PROD").is_none());
    }
}
