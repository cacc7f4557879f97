//! Application-level environment checks.
//!
//! [`ApplicationService`] is the facade host code talks to. It binds one
//! [`EnvironmentResolver`] for the lifetime of the process, keeps the
//! application's metadata, and turns the three-valued pairing check into a
//! hard requirement when asked to.
//!
//! A process-wide instance can be registered once with [`install`] and
//! retrieved anywhere with [`installed`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use envguard::environment::{EnvironmentMetadata, EnvironmentResolver, EnvironmentTypeRegistry};
//! use envguard::service::ApplicationService;
//!
//! let provider = |name: &str| {
//!     let environment = match name {
//!         "orders-api" | "orders-db" => Some("PROD"),
//!         "scratch-db" => Some("DEV"),
//!         _ => None,
//!     };
//!     let mut metadata = EnvironmentMetadata::unknown(name);
//!     metadata.environment = environment.map(str::to_string);
//!     Some(metadata)
//! };
//! let resolver =
//!     EnvironmentResolver::new("orders-api", EnvironmentTypeRegistry::builtin(), Arc::new(provider))
//!         .unwrap();
//! let service = ApplicationService::new(Arc::new(resolver));
//!
//! service.validate_resource_pairing("orders-db", false).unwrap();
//! assert!(service.validate_resource_pairing("scratch-db", true).is_err());
//! service.validate_resource_pairing("mystery", true).unwrap();
//! ```

use std::sync::{Arc, OnceLock};

use crate::environment::{EnvironmentMetadata, EnvironmentResolver, Pairing};
use crate::error::{EnvGuardError, Result};

static INSTALLED: OnceLock<ApplicationService> = OnceLock::new();

/// Facade over an [`EnvironmentResolver`].
#[derive(Debug, Clone)]
pub struct ApplicationService {
    resolver: Arc<EnvironmentResolver>,
    environment: EnvironmentMetadata,
}

impl ApplicationService {
    /// Bind to a resolver, capturing the application's metadata.
    pub fn new(resolver: Arc<EnvironmentResolver>) -> Self {
        let environment = resolver.environment_metadata().clone();
        Self {
            resolver,
            environment,
        }
    }

    /// The application's own metadata, captured at construction.
    pub fn environment(&self) -> &EnvironmentMetadata {
        &self.environment
    }

    /// The bound resolver.
    pub fn resolver(&self) -> &EnvironmentResolver {
        &self.resolver
    }

    /// The raw environment string of a resource, if known.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if the provider returns no metadata.
    pub fn resource_environment(&self, resource_name: &str) -> Result<Option<String>> {
        self.resolver.resource_environment(resource_name)
    }

    /// Three-valued check of a resource against the application.
    pub fn is_valid_environment_pairing(&self, resource_name: &str) -> Pairing {
        self.resolver
            .is_valid_environment_pairing(&self.environment, resource_name)
    }

    /// Require that a resource shares the application's environment.
    ///
    /// An indeterminate result passes only when `permit_fuzzy_results` is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns `MismatchedEnvironment` carrying the resource name and both
    /// environment strings.
    pub fn validate_resource_pairing(
        &self,
        resource_name: &str,
        permit_fuzzy_results: bool,
    ) -> Result<()> {
        let resource = self.resolver.fetch_metadata(resource_name);
        self.validate_metadata_pairing(resource_name, resource.as_ref(), permit_fuzzy_results)
    }

    /// [`ApplicationService::validate_resource_pairing`] for metadata the
    /// caller already fetched.
    ///
    /// # Errors
    ///
    /// Returns `MismatchedEnvironment` as `validate_resource_pairing` does.
    pub fn validate_metadata_pairing(
        &self,
        resource_name: &str,
        resource: Option<&EnvironmentMetadata>,
        permit_fuzzy_results: bool,
    ) -> Result<()> {
        match self.resolver.pairing_for(resource) {
            Pairing::Match => return Ok(()),
            Pairing::Indeterminate(reason) if permit_fuzzy_results => {
                tracing::debug!(
                    "Accepting '{}' with fuzzy result: {}",
                    resource_name,
                    reason
                );
                return Ok(());
            }
            Pairing::Mismatch | Pairing::Indeterminate(_) => {}
        }

        let resource_environment = resource.and_then(|m| m.environment.clone());
        let application_environment = self.environment.environment.clone();

        tracing::warn!(
            "Resource '{}' ({:?}) does not pair with application environment {:?}",
            resource_name,
            resource_environment,
            application_environment
        );

        Err(EnvGuardError::MismatchedEnvironment {
            resource_name: resource_name.to_string(),
            resource_environment,
            application_environment,
        })
    }
}

/// Register the process-wide service.
///
/// # Errors
///
/// Returns `InvalidArgument` if a service is already installed.
pub fn install(service: ApplicationService) -> Result<&'static ApplicationService> {
    let mut fresh = false;
    let installed = INSTALLED.get_or_init(|| {
        fresh = true;
        service
    });

    if fresh {
        Ok(installed)
    } else {
        Err(EnvGuardError::invalid_argument(
            "service",
            "an application service is already installed",
        ))
    }
}

/// The process-wide service, if one was installed.
pub fn installed() -> Option<&'static ApplicationService> {
    INSTALLED.get()
}
