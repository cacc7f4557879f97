//! Metadata parsed from resource naming conventions.
//!
//! Many estates encode the environment in hostnames or resource names,
//! e.g. `prod-eastus-sql-01`. A [`NamingConvention`] captures that encoding
//! as a regex with named groups:
//!
//! - `environment` (required in the pattern)
//! - `location`
//! - `resource_type`
//! - `instance`

use std::sync::LazyLock;

use regex::Regex;

use super::MetadataSource;
use crate::environment::EnvironmentMetadata;
use crate::error::{EnvGuardError, Result};

/// `<environment>-<location>-<resource_type>-<instance>`
pub const DEFAULT_PATTERN: &str = r"^(?P<environment>[A-Za-z]+)-(?P<location>[A-Za-z0-9]+)-(?P<resource_type>[A-Za-z]+)-(?P<instance>[0-9]+)$";

static DEFAULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_PATTERN).expect("default naming pattern is valid"));

/// Parses metadata out of resource names.
///
/// # Example
///
/// ```
/// use envguard::provider::{MetadataSource, NamingConvention};
///
/// let convention = NamingConvention::default();
/// let metadata = convention.lookup("prod-eastus-sql-01").unwrap();
/// assert_eq!(metadata.environment.as_deref(), Some("prod"));
/// assert_eq!(metadata.location.as_deref(), Some("eastus"));
/// assert!(convention.lookup("localhost").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct NamingConvention {
    pattern: Regex,
}

impl NamingConvention {
    /// Compile a convention from a pattern.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the pattern does not compile or has no
    /// `environment` group.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| EnvGuardError::invalid_argument("naming.pattern", e.to_string()))?;

        if !pattern.capture_names().flatten().any(|n| n == "environment") {
            return Err(EnvGuardError::invalid_argument(
                "naming.pattern",
                "pattern must define an 'environment' capture group",
            ));
        }

        Ok(Self { pattern })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_REGEX.clone(),
        }
    }
}

impl MetadataSource for NamingConvention {
    fn name(&self) -> &str {
        "naming convention"
    }

    fn lookup(&self, resource_name: &str) -> Option<EnvironmentMetadata> {
        let captures = self.pattern.captures(resource_name)?;
        let group = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(EnvironmentMetadata {
            resource_name: Some(resource_name.to_string()),
            environment: Some(group("environment")?),
            location: group("location"),
            resource_type: group("resource_type"),
            instance: group("instance"),
            is_emulated: None,
        })
    }
}
