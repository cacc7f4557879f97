//! Environment type definitions.
//!
//! An [`EnvironmentType`] is one category of deployment (production, UAT,
//! development, ...). Identity is the name, compared case-insensitively.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{EnvGuardError, Result};

/// Case folding applied to every name and acronym comparison.
///
/// Keys are compared by their Unicode upper-case mapping. A character whose
/// lower-case form collides with another's (KELVIN SIGN and `k`) stays
/// distinct, since upper-casing leaves it unchanged.
pub(crate) fn fold_key(key: &str) -> String {
    key.to_uppercase()
}

/// One environment category.
///
/// # Example
///
/// ```
/// use envguard::environment::EnvironmentType;
///
/// let prod = EnvironmentType::new("Production", "Live systems", 1000, ["PROD", "P"]).unwrap();
/// let other = EnvironmentType::new("PRODUCTION", "Something else", 0, Vec::<String>::new()).unwrap();
/// assert_eq!(prod, other);
/// assert_eq!(prod.to_string(), "Production");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentType {
    name: String,
    description: String,
    sensitivity: u32,
    acronyms: Vec<String>,
}

impl EnvironmentType {
    /// Create an environment type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name`, `description` or any acronym is
    /// empty or whitespace-only.
    pub fn new<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        sensitivity: u32,
        acronyms: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let description = description.into();
        let acronyms: Vec<String> = acronyms.into_iter().map(Into::into).collect();

        if name.trim().is_empty() {
            return Err(EnvGuardError::invalid_argument(
                "name",
                "must not be empty or whitespace",
            ));
        }
        if description.trim().is_empty() {
            return Err(EnvGuardError::invalid_argument(
                "description",
                "must not be empty or whitespace",
            ));
        }
        if let Some(pos) = acronyms.iter().position(|a| a.trim().is_empty()) {
            return Err(EnvGuardError::invalid_argument(
                "acronyms",
                format!("acronym at index {} of '{}' is empty", pos, name),
            ));
        }

        Ok(Self {
            name,
            description,
            sensitivity,
            acronyms,
        })
    }

    /// Canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Criticality; 0 is fully disposable.
    pub fn sensitivity(&self) -> u32 {
        self.sensitivity
    }

    /// Alternate lookup tokens, in declaration order.
    pub fn acronyms(&self) -> &[String] {
        &self.acronyms
    }

    /// Compare by sensitivity only.
    ///
    /// Not `Ord`: two types with equal sensitivity are
    /// not equal, and two equal types may carry different sensitivities.
    pub fn cmp_sensitivity(&self, other: &Self) -> Ordering {
        self.sensitivity.cmp(&other.sensitivity)
    }

    /// Whether this environment is strictly more critical than `other`.
    pub fn is_more_sensitive_than(&self, other: &Self) -> bool {
        self.cmp_sensitivity(other) == Ordering::Greater
    }

    /// Whether `candidate` names this type or one of its acronyms.
    pub fn answers_to(&self, candidate: &str) -> bool {
        let key = fold_key(candidate);
        fold_key(&self.name) == key || self.acronyms.iter().any(|a| fold_key(a) == key)
    }
}

impl PartialEq for EnvironmentType {
    fn eq(&self, other: &Self) -> bool {
        fold_key(&self.name) == fold_key(&other.name)
    }
}

impl Eq for EnvironmentType {}

impl Hash for EnvironmentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_key(&self.name).hash(state);
    }
}

impl std::fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
