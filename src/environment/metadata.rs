//! Per-resource environment metadata.

use serde::{Deserialize, Serialize};

/// Environment, location and identity of one resource or application
/// instance.
///
/// Every field is optional: `None` means the value could not be determined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentMetadata {
    /// Name the resource was looked up by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    /// Raw environment string, matched against environment type names and
    /// acronyms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Region, data centre or similar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Kind of resource (database, queue, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Instance discriminator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Whether the resource is an emulator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_emulated: Option<bool>,
}

impl EnvironmentMetadata {
    /// Metadata that knows only the resource name.
    pub fn unknown(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: Some(resource_name.into()),
            ..Self::default()
        }
    }

    pub fn with_resource_name(mut self, resource_name: impl Into<String>) -> Self {
        self.resource_name = Some(resource_name.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_emulated(mut self, is_emulated: bool) -> Self {
        self.is_emulated = Some(is_emulated);
        self
    }
}
