//! Environment resolution and pairing.
//!
//! An [`EnvironmentResolver`] binds a registry to a metadata provider. At
//! construction it resolves the application's own environment, which must
//! succeed; afterwards it judges whether other resources live in the same
//! environment. The judgement is three-valued: see [`Pairing`].

use std::sync::Arc;

use super::kind::EnvironmentType;
use super::metadata::EnvironmentMetadata;
use super::registry::EnvironmentTypeRegistry;
use crate::error::{EnvGuardError, Result};
use crate::provider::MetadataProvider;

/// Why a pairing could not be judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uncertainty {
    /// The application's environment is absent or unrecognized.
    ApplicationUnknown,
    /// The provider returned no metadata for the resource.
    ResourceMetadataMissing,
    /// The resource metadata has no environment.
    ResourceEnvironmentMissing,
    /// The resource environment matches no registered type.
    ResourceEnvironmentUnrecognized,
}

impl std::fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApplicationUnknown => write!(f, "application environment unknown"),
            Self::ResourceMetadataMissing => write!(f, "no metadata for resource"),
            Self::ResourceEnvironmentMissing => write!(f, "resource environment unknown"),
            Self::ResourceEnvironmentUnrecognized => {
                write!(f, "resource environment not registered")
            }
        }
    }
}

/// Outcome of comparing a resource's environment with the application's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Both resolve to the same environment type.
    Match,
    /// Both resolve, to different environment types.
    Mismatch,
    /// At least one side could not be resolved.
    Indeterminate(Uncertainty),
}

impl Pairing {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate(_))
    }

    /// `Some(true)` / `Some(false)` for a definite answer, `None` otherwise.
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Self::Match => Some(true),
            Self::Mismatch => Some(false),
            Self::Indeterminate(_) => None,
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch => write!(f, "mismatch"),
            Self::Indeterminate(reason) => write!(f, "indeterminate ({})", reason),
        }
    }
}

/// Resolves resources to environment types and judges pairings.
///
/// Read-only after construction; share it behind an `Arc`.
pub struct EnvironmentResolver {
    registry: EnvironmentTypeRegistry,
    provider: Arc<dyn MetadataProvider>,
    metadata: EnvironmentMetadata,
    environment_type: EnvironmentType,
}

impl std::fmt::Debug for EnvironmentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentResolver")
            .field("registry", &self.registry)
            .field("metadata", &self.metadata)
            .field("environment_type", &self.environment_type)
            .finish_non_exhaustive()
    }
}

impl EnvironmentResolver {
    /// Create a resolver for the named application.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the application name is empty
    /// - `ContractViolation` if the provider returns no metadata for the
    ///   application, or if the application's environment does not resolve
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use envguard::environment::{EnvironmentMetadata, EnvironmentResolver, EnvironmentTypeRegistry, Pairing};
    ///
    /// let provider = |name: &str| {
    ///     let environment = if name == "orders-api" { "PROD" } else { "DEV" };
    ///     Some(EnvironmentMetadata::unknown(name).with_environment(environment))
    /// };
    /// let resolver = EnvironmentResolver::new(
    ///     "orders-api",
    ///     EnvironmentTypeRegistry::builtin(),
    ///     Arc::new(provider),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(resolver.application_environment_type().name(), "Production");
    /// let app = resolver.environment_metadata().clone();
    /// assert_eq!(resolver.is_valid_environment_pairing(&app, "orders-db"), Pairing::Mismatch);
    /// ```
    pub fn new(
        application_resource_name: &str,
        registry: EnvironmentTypeRegistry,
        provider: Arc<dyn MetadataProvider>,
    ) -> Result<Self> {
        if application_resource_name.trim().is_empty() {
            return Err(EnvGuardError::invalid_argument(
                "application_resource_name",
                "must not be empty or whitespace",
            ));
        }

        let metadata = provider
            .environment_metadata(application_resource_name)
            .ok_or_else(|| {
                EnvGuardError::contract_violation(
                    "environment_metadata",
                    format!(
                        "provider returned no metadata for application '{}'",
                        application_resource_name
                    ),
                )
            })?;

        let environment_type = registry.resolve(&metadata).cloned().ok_or_else(|| {
            EnvGuardError::contract_violation(
                "resolve",
                format!(
                    "application '{}' has environment {:?}, which matches no registered environment type",
                    application_resource_name, metadata.environment
                ),
            )
        })?;

        tracing::debug!(
            "Application '{}' resolved to environment '{}'",
            application_resource_name,
            environment_type
        );

        Ok(Self {
            registry,
            provider,
            metadata,
            environment_type,
        })
    }

    /// The application's own metadata, fetched once at construction.
    pub fn environment_metadata(&self) -> &EnvironmentMetadata {
        &self.metadata
    }

    /// The application's own environment type.
    pub fn application_environment_type(&self) -> &EnvironmentType {
        &self.environment_type
    }

    /// The registry used for resolution.
    pub fn registry(&self) -> &EnvironmentTypeRegistry {
        &self.registry
    }

    /// Fetch metadata for a resource straight from the provider.
    pub fn fetch_metadata(&self, resource_name: &str) -> Option<EnvironmentMetadata> {
        self.provider.environment_metadata(resource_name)
    }

    /// Resolve metadata to a registered environment type.
    pub fn resolve(&self, metadata: &EnvironmentMetadata) -> Option<&EnvironmentType> {
        self.registry.resolve(metadata)
    }

    /// The raw environment string of a resource, if known.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if the provider returns no metadata.
    pub fn resource_environment(&self, resource_name: &str) -> Result<Option<String>> {
        let metadata = self.fetch_metadata(resource_name).ok_or_else(|| {
            EnvGuardError::contract_violation(
                "environment_metadata",
                format!("provider returned no metadata for '{}'", resource_name),
            )
        })?;
        Ok(metadata.environment)
    }

    /// Judge whether a resource lives in the application's environment.
    ///
    /// The judgement always uses the application metadata and type cached
    /// at construction. `_application` is not consulted.
    ///
    /// Every path that cannot decide returns [`Pairing::Indeterminate`];
    /// callers choose how to treat it.
    pub fn is_valid_environment_pairing(
        &self,
        _application: &EnvironmentMetadata,
        resource_name: &str,
    ) -> Pairing {
        let resource = self.fetch_metadata(resource_name);
        let pairing = self.pairing_for(resource.as_ref());
        tracing::debug!("Pairing of '{}': {}", resource_name, pairing);
        pairing
    }

    /// Judge already-fetched resource metadata against the application.
    ///
    /// `None` stands for a provider that returned no metadata.
    pub fn pairing_for(&self, resource: Option<&EnvironmentMetadata>) -> Pairing {
        if self.metadata.environment.is_none() {
            return Pairing::Indeterminate(Uncertainty::ApplicationUnknown);
        }

        let Some(resource) = resource else {
            return Pairing::Indeterminate(Uncertainty::ResourceMetadataMissing);
        };
        if resource.environment.is_none() {
            return Pairing::Indeterminate(Uncertainty::ResourceEnvironmentMissing);
        }

        let Some(resource_type) = self.registry.resolve(resource) else {
            return Pairing::Indeterminate(Uncertainty::ResourceEnvironmentUnrecognized);
        };

        if &self.environment_type == resource_type {
            Pairing::Match
        } else {
            Pairing::Mismatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry() -> EnvironmentTypeRegistry {
        EnvironmentTypeRegistry::new([
            EnvironmentType::new("Production", "desc", 1000, ["PROD", "P"]).unwrap(),
            EnvironmentType::new("Development", "desc", 0, ["DEV", "D"]).unwrap(),
        ])
        .unwrap()
    }

    /// Provider answering from a fixed map; unknown names get `None`.
    fn stub(entries: &[(&str, Option<&str>)]) -> Arc<dyn MetadataProvider> {
        let map: HashMap<String, EnvironmentMetadata> = entries
            .iter()
            .map(|(name, env)| {
                let mut metadata = EnvironmentMetadata::unknown(*name);
                metadata.environment = env.map(str::to_string);
                (name.to_string(), metadata)
            })
            .collect();
        Arc::new(move |name: &str| map.get(name).cloned())
    }

    fn resolver(entries: &[(&str, Option<&str>)]) -> EnvironmentResolver {
        EnvironmentResolver::new("app", registry(), stub(entries)).unwrap()
    }

    #[test]
    fn caches_application_metadata_and_type() {
        let r = resolver(&[("app", Some("prod"))]);
        assert_eq!(r.environment_metadata().resource_name.as_deref(), Some("app"));
        assert_eq!(r.environment_metadata().environment.as_deref(), Some("prod"));
        assert_eq!(r.application_environment_type().name(), "Production");
    }

    #[test]
    fn application_is_fetched_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let provider = move |name: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(EnvironmentMetadata::unknown(name).with_environment("DEV"))
        };
        let r = EnvironmentResolver::new("app", registry(), Arc::new(provider)).unwrap();
        let _ = r.environment_metadata();
        let _ = r.application_environment_type();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejects_empty_application_name() {
        let result = EnvironmentResolver::new(" ", registry(), stub(&[]));
        assert!(matches!(result, Err(EnvGuardError::InvalidArgument { .. })));
    }

    #[test]
    fn missing_application_metadata_is_contract_violation() {
        let result = EnvironmentResolver::new("app", registry(), stub(&[]));
        assert!(matches!(
            result,
            Err(EnvGuardError::ContractViolation { ref operation, .. }) if operation == "environment_metadata"
        ));
    }

    #[test]
    fn unresolvable_application_is_contract_violation() {
        let result = EnvironmentResolver::new("app", registry(), stub(&[("app", Some("QA"))]));
        assert!(matches!(
            result,
            Err(EnvGuardError::ContractViolation { ref operation, .. }) if operation == "resolve"
        ));
    }

    #[test]
    fn application_without_environment_is_contract_violation() {
        let result = EnvironmentResolver::new("app", registry(), stub(&[("app", None)]));
        assert!(matches!(result, Err(EnvGuardError::ContractViolation { .. })));
    }

    #[test]
    fn resource_environment_returns_raw_string() {
        let r = resolver(&[("app", Some("PROD")), ("db", Some("dev")), ("queue", None)]);
        assert_eq!(r.resource_environment("db").unwrap().as_deref(), Some("dev"));
        assert_eq!(r.resource_environment("queue").unwrap(), None);
    }

    #[test]
    fn resource_environment_without_metadata_is_contract_violation() {
        let r = resolver(&[("app", Some("PROD"))]);
        assert!(matches!(
            r.resource_environment("missing"),
            Err(EnvGuardError::ContractViolation { .. })
        ));
    }

    #[test]
    fn pairing_matches_same_type_via_different_tokens() {
        let r = resolver(&[("app", Some("PROD")), ("db", Some("production")), ("cache", Some("p"))]);
        let app = r.environment_metadata().clone();
        assert_eq!(r.is_valid_environment_pairing(&app, "db"), Pairing::Match);
        assert_eq!(r.is_valid_environment_pairing(&app, "cache"), Pairing::Match);
    }

    #[test]
    fn pairing_mismatch_for_different_types() {
        let r = resolver(&[("app", Some("PROD")), ("db", Some("DEV"))]);
        let app = r.environment_metadata().clone();
        assert_eq!(r.is_valid_environment_pairing(&app, "db"), Pairing::Mismatch);
    }

    #[test]
    fn pairing_indeterminate_paths() {
        let r = resolver(&[("app", Some("PROD")), ("none", None), ("qa", Some("QA"))]);
        let app = r.environment_metadata().clone();
        assert_eq!(
            r.is_valid_environment_pairing(&app, "missing"),
            Pairing::Indeterminate(Uncertainty::ResourceMetadataMissing)
        );
        assert_eq!(
            r.is_valid_environment_pairing(&app, "none"),
            Pairing::Indeterminate(Uncertainty::ResourceEnvironmentMissing)
        );
        assert_eq!(
            r.is_valid_environment_pairing(&app, "qa"),
            Pairing::Indeterminate(Uncertainty::ResourceEnvironmentUnrecognized)
        );
    }

    #[test]
    fn pairing_ignores_supplied_application_metadata() {
        let r = resolver(&[("app", Some("PROD")), ("db", Some("DEV")), ("ledger", Some("P"))]);

        let other = EnvironmentMetadata::unknown("worker").with_environment("DEV");
        assert_eq!(r.is_valid_environment_pairing(&other, "db"), Pairing::Mismatch);
        assert_eq!(r.is_valid_environment_pairing(&other, "ledger"), Pairing::Match);

        let blank = EnvironmentMetadata::unknown("app");
        assert_eq!(r.is_valid_environment_pairing(&blank, "db"), Pairing::Mismatch);
    }

    #[test]
    fn pairing_for_fetched_metadata() {
        let r = resolver(&[("app", Some("PROD"))]);
        assert_eq!(
            r.pairing_for(None),
            Pairing::Indeterminate(Uncertainty::ResourceMetadataMissing)
        );
        assert_eq!(
            r.pairing_for(Some(&EnvironmentMetadata::unknown("db"))),
            Pairing::Indeterminate(Uncertainty::ResourceEnvironmentMissing)
        );
        assert_eq!(
            r.pairing_for(Some(&EnvironmentMetadata::unknown("db").with_environment("prd"))),
            Pairing::Match
        );
    }

    #[test]
    fn pairing_as_option() {
        assert_eq!(Pairing::Match.as_option(), Some(true));
        assert_eq!(Pairing::Mismatch.as_option(), Some(false));
        assert_eq!(
            Pairing::Indeterminate(Uncertainty::ApplicationUnknown).as_option(),
            None
        );
    }

    #[test]
    fn pairing_predicates_are_exclusive() {
        let all = [
            Pairing::Match,
            Pairing::Mismatch,
            Pairing::Indeterminate(Uncertainty::ResourceEnvironmentMissing),
        ];
        for pairing in all {
            let flags = [
                pairing.is_match(),
                pairing.is_mismatch(),
                pairing.is_indeterminate(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        }
    }

    #[test]
    fn pairing_display() {
        assert_eq!(Pairing::Match.to_string(), "match");
        assert_eq!(
            Pairing::Indeterminate(Uncertainty::ResourceEnvironmentMissing).to_string(),
            "indeterminate (resource environment unknown)"
        );
    }

    #[test]
    fn resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EnvironmentResolver>();
    }
}
