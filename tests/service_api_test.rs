//! Integration tests for the resolver and the application service.

use std::sync::Arc;

use envguard::environment::{
    EnvironmentMetadata, EnvironmentResolver, EnvironmentType, EnvironmentTypeRegistry, Pairing,
    Uncertainty,
};
use envguard::error::UNKNOWN_ENVIRONMENT;
use envguard::provider::{MetadataProvider, StaticTable};
use envguard::service::{self, ApplicationService};
use envguard::EnvGuardError;

fn registry() -> EnvironmentTypeRegistry {
    EnvironmentTypeRegistry::new([
        EnvironmentType::new("Production", "desc", 1000, ["PROD", "P"]).unwrap(),
        EnvironmentType::new("Development", "desc", 0, ["DEV", "D"]).unwrap(),
    ])
    .unwrap()
}

fn table_provider() -> impl MetadataProvider {
    let table = StaticTable::new()
        .with_entry("orders-api", EnvironmentMetadata::default().with_environment("PROD"))
        .with_entry("orders-db", EnvironmentMetadata::default().with_environment("p"))
        .with_entry("scratch-db", EnvironmentMetadata::default().with_environment("DEV"))
        .with_entry("legacy-db", EnvironmentMetadata::default().with_environment("QA"))
        .with_entry("mystery-cache", EnvironmentMetadata::default());

    move |name: &str| {
        use envguard::provider::MetadataSource;
        Some(table.lookup(name).unwrap_or_else(|| EnvironmentMetadata::unknown(name)))
    }
}

fn service() -> ApplicationService {
    let resolver = EnvironmentResolver::new("orders-api", registry(), Arc::new(table_provider()))
        .unwrap();
    ApplicationService::new(Arc::new(resolver))
}

#[test]
fn production_application_rejects_development_resource() {
    let service = service();
    assert_eq!(service.is_valid_environment_pairing("scratch-db"), Pairing::Mismatch);

    match service.validate_resource_pairing("scratch-db", false) {
        Err(EnvGuardError::MismatchedEnvironment {
            resource_name,
            resource_environment,
            application_environment,
        }) => {
            assert_eq!(resource_name, "scratch-db");
            assert_eq!(resource_environment.as_deref(), Some("DEV"));
            assert_eq!(application_environment.as_deref(), Some("PROD"));
        }
        other => panic!("expected MismatchedEnvironment, got {:?}", other),
    }

    // A definite mismatch fails even when fuzzy results are allowed.
    assert!(service.validate_resource_pairing("scratch-db", true).is_err());
}

#[test]
fn acronym_and_name_spellings_pair() {
    let service = service();
    assert_eq!(service.is_valid_environment_pairing("orders-db"), Pairing::Match);
    service.validate_resource_pairing("orders-db", false).unwrap();
}

#[test]
fn absent_resource_environment_is_fuzzy() {
    let service = service();
    assert_eq!(
        service.is_valid_environment_pairing("mystery-cache"),
        Pairing::Indeterminate(Uncertainty::ResourceEnvironmentMissing)
    );

    service.validate_resource_pairing("mystery-cache", true).unwrap();

    let err = service
        .validate_resource_pairing("mystery-cache", false)
        .unwrap_err();
    assert!(err.is_mismatch());
    assert!(err.to_string().contains(UNKNOWN_ENVIRONMENT));
}

#[test]
fn unregistered_resource_environment_is_fuzzy() {
    let service = service();
    assert_eq!(
        service.is_valid_environment_pairing("legacy-db"),
        Pairing::Indeterminate(Uncertainty::ResourceEnvironmentUnrecognized)
    );
    match service.validate_resource_pairing("legacy-db", false) {
        Err(EnvGuardError::MismatchedEnvironment {
            resource_environment,
            ..
        }) => assert_eq!(resource_environment.as_deref(), Some("QA")),
        other => panic!("expected MismatchedEnvironment, got {:?}", other),
    }
}

#[test]
fn provider_returning_none_for_resource_is_indeterminate() {
    let provider = |name: &str| {
        (name == "api").then(|| EnvironmentMetadata::unknown(name).with_environment("DEV"))
    };
    let resolver = EnvironmentResolver::new("api", registry(), Arc::new(provider)).unwrap();
    let service = ApplicationService::new(Arc::new(resolver));

    assert_eq!(
        service.is_valid_environment_pairing("db"),
        Pairing::Indeterminate(Uncertainty::ResourceMetadataMissing)
    );
    assert!(matches!(
        service.resource_environment("db"),
        Err(EnvGuardError::ContractViolation { .. })
    ));
    assert!(service.validate_resource_pairing("db", true).is_ok());
}

#[test]
fn resource_environment_returns_raw_string() {
    let service = service();
    assert_eq!(service.resource_environment("orders-db").unwrap().as_deref(), Some("p"));
    assert_eq!(service.resource_environment("mystery-cache").unwrap(), None);
}

#[test]
fn application_metadata_is_captured() {
    let service = service();
    assert_eq!(service.environment().environment.as_deref(), Some("PROD"));
    assert_eq!(service.environment().resource_name.as_deref(), Some("orders-api"));
    assert_eq!(
        service.resolver().application_environment_type().name(),
        "Production"
    );
}

#[test]
fn resolver_construction_failures() {
    assert!(matches!(
        EnvironmentResolver::new("  ", registry(), Arc::new(table_provider())),
        Err(EnvGuardError::InvalidArgument { .. })
    ));
    assert!(matches!(
        EnvironmentResolver::new("legacy-db", registry(), Arc::new(table_provider())),
        Err(EnvGuardError::ContractViolation { .. })
    ));
    assert!(matches!(
        EnvironmentResolver::new("mystery-cache", registry(), Arc::new(table_provider())),
        Err(EnvGuardError::ContractViolation { .. })
    ));

    let silent = |_: &str| -> Option<EnvironmentMetadata> { None };
    match EnvironmentResolver::new("orders-api", registry(), Arc::new(silent)) {
        Err(EnvGuardError::ContractViolation { operation, .. }) => {
            assert_eq!(operation, "environment_metadata")
        }
        other => panic!("expected ContractViolation, got {:?}", other),
    }
}

#[test]
fn service_is_shareable_across_threads() {
    let service = Arc::new(service());
    let handles: Vec<_> = ["orders-db", "scratch-db"]
        .into_iter()
        .map(|name| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || service.is_valid_environment_pairing(name))
        })
        .collect();

    let results: Vec<Pairing> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![Pairing::Match, Pairing::Mismatch]);
}

#[test]
fn install_slot_accepts_one_service() {
    let installed = service::install(service()).unwrap();
    assert!(std::ptr::eq(installed, service::installed().unwrap()));
    assert!(matches!(
        service::install(service()),
        Err(EnvGuardError::InvalidArgument { .. })
    ));
}
