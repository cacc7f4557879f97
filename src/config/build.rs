//! Turning a loaded config into a running service.

use std::sync::Arc;

use super::schema::{EnvGuardConfig, EnvironmentTypeConfig};
use crate::environment::{EnvironmentResolver, EnvironmentType, EnvironmentTypeRegistry};
use crate::error::{EnvGuardError, Result};
use crate::provider::{EnvVars, NamingConvention, ProviderChain, StaticTable};
use crate::service::ApplicationService;

impl EnvironmentTypeConfig {
    /// Validate into an [`EnvironmentType`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty name, description or acronym.
    pub fn to_environment_type(&self) -> Result<EnvironmentType> {
        EnvironmentType::new(
            self.name.clone(),
            self.description.clone(),
            self.sensitivity,
            self.acronyms.iter().cloned(),
        )
    }
}

impl EnvGuardConfig {
    /// Build the environment type registry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a `null` or invalid entry and
    /// `DuplicateKey` for colliding names or acronyms.
    pub fn build_registry(&self) -> Result<EnvironmentTypeRegistry> {
        let Some(entries) = &self.environment_types else {
            return Ok(EnvironmentTypeRegistry::builtin());
        };

        let types = entries
            .iter()
            .map(|entry| entry.as_ref().map(|def| def.to_environment_type()).transpose())
            .collect::<Result<Vec<Option<EnvironmentType>>>>()?;

        EnvironmentTypeRegistry::from_entries(types)
    }

    /// Build the provider chain: environment variables, then the resource
    /// table, then the naming convention.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the naming pattern is invalid.
    pub fn build_provider(&self) -> Result<ProviderChain> {
        let mut chain = ProviderChain::new()
            .with_source(EnvVars::new(self.env_prefix.clone()))
            .with_source(StaticTable::from(self.resources.clone()));

        if let Some(naming) = &self.naming {
            chain = chain.with_source(NamingConvention::new(&naming.pattern)?);
        }

        Ok(chain)
    }

    /// Build the application service.
    ///
    /// `application` overrides the configured application name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no application name is available, plus
    /// anything [`EnvironmentResolver::new`] can return.
    pub fn build_service(&self, application: Option<&str>) -> Result<ApplicationService> {
        let name = application
            .or(self.application.as_deref())
            .ok_or_else(|| {
                EnvGuardError::invalid_argument(
                    "application",
                    "no application name configured; set 'application' or pass --application",
                )
            })?;

        let resolver = EnvironmentResolver::new(
            name,
            self.build_registry()?,
            Arc::new(self.build_provider()?),
        )?;

        Ok(ApplicationService::new(Arc::new(resolver)))
    }
}
