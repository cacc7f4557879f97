//! Configuration schema definitions for envguard.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::environment::EnvironmentMetadata;
use crate::provider::env_vars::DEFAULT_PREFIX;
use crate::provider::naming::DEFAULT_PATTERN;

/// Root configuration structure for `.envguard/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvGuardConfig {
    /// Resource name of the application itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Environment type catalog. Omitted means the built-in catalog.
    ///
    /// Entries are optional so that a `null` item is reported with its
    /// index instead of failing the whole parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_types: Option<Vec<Option<EnvironmentTypeConfig>>>,

    /// Known resources and their metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub resources: HashMap<String, EnvironmentMetadata>,

    /// Naming convention for resources not in the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingConfig>,

    /// Prefix for environment-variable overrides.
    #[serde(default = "default_env_prefix")]
    pub env_prefix: String,
}

impl Default for EnvGuardConfig {
    fn default() -> Self {
        Self {
            application: None,
            environment_types: None,
            resources: HashMap::new(),
            naming: None,
            env_prefix: default_env_prefix(),
        }
    }
}

/// One environment type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentTypeConfig {
    /// Canonical name.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Criticality; higher is more critical.
    #[serde(default)]
    pub sensitivity: u32,

    /// Alternate lookup tokens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acronyms: Vec<String>,
}

/// Naming convention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Regex with named groups `environment`, `location`,
    /// `resource_type`, `instance`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
        }
    }
}

fn default_env_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}
