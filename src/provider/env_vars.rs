//! Metadata from process environment variables.
//!
//! For a resource named `orders-db` and the prefix `ENVGUARD`, the source
//! reads:
//!
//! - `ENVGUARD_ORDERS_DB_ENVIRONMENT` (required for the source to answer)
//! - `ENVGUARD_ORDERS_DB_LOCATION`
//! - `ENVGUARD_ORDERS_DB_RESOURCE_TYPE`
//! - `ENVGUARD_ORDERS_DB_INSTANCE`
//! - `ENVGUARD_ORDERS_DB_EMULATED`

use super::MetadataSource;
use crate::environment::EnvironmentMetadata;

/// Default variable prefix.
pub const DEFAULT_PREFIX: &str = "ENVGUARD";

type LookupFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Reads resource metadata from environment variables.
///
/// # Example
///
/// ```
/// use envguard::provider::{EnvVars, MetadataSource};
///
/// let source = EnvVars::with_lookup("APP", |key: &str| match key {
///     "APP_ORDERS_DB_ENVIRONMENT" => Some("UAT".to_string()),
///     _ => None,
/// });
/// let metadata = source.lookup("orders-db").unwrap();
/// assert_eq!(metadata.environment.as_deref(), Some("UAT"));
/// ```
pub struct EnvVars {
    prefix: String,
    lookup: Box<LookupFn>,
}

impl EnvVars {
    /// Read from the real process environment.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, |key: &str| std::env::var(key).ok())
    }

    /// Read through a custom lookup function (for testing).
    pub fn with_lookup<F>(prefix: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            prefix: prefix.into(),
            lookup: Box::new(lookup),
        }
    }

    /// The variable prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Variable name for one field of one resource.
    pub fn variable_name(&self, resource_name: &str, field: &str) -> String {
        format!("{}_{}_{}", self.prefix, resource_key(resource_name), field)
    }

    fn read(&self, resource_name: &str, field: &str) -> Option<String> {
        (self.lookup)(&self.variable_name(resource_name, field)).filter(|v| !v.is_empty())
    }
}

impl Default for EnvVars {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl std::fmt::Debug for EnvVars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvVars")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl MetadataSource for EnvVars {
    fn name(&self) -> &str {
        "environment variables"
    }

    fn lookup(&self, resource_name: &str) -> Option<EnvironmentMetadata> {
        let environment = self.read(resource_name, "ENVIRONMENT")?;

        let is_emulated = self.read(resource_name, "EMULATED").and_then(|raw| {
            let parsed = parse_flag(&raw);
            if parsed.is_none() {
                tracing::warn!(
                    "Ignoring {}={:?}: expected true or false",
                    self.variable_name(resource_name, "EMULATED"),
                    raw
                );
            }
            parsed
        });

        Some(EnvironmentMetadata {
            resource_name: Some(resource_name.to_string()),
            environment: Some(environment),
            location: self.read(resource_name, "LOCATION"),
            resource_type: self.read(resource_name, "RESOURCE_TYPE"),
            instance: self.read(resource_name, "INSTANCE"),
            is_emulated,
        })
    }
}

/// Upper-case the name and replace anything that cannot appear in a
/// variable name with `_`.
fn resource_key(resource_name: &str) -> String {
    resource_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
