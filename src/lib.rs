//! envguard - functional environment classification and pairing checks.
//!
//! envguard decides which environment (production, UAT, development, ...)
//! an application or one of its resources belongs to, and refuses pairings
//! that cross environments, such as a development service pointed at a
//! production database.
//!
//! # Modules
//!
//! - [`environment`] - Environment types, registry, resolver and pairing
//! - [`provider`] - The metadata provider extension point and built-in sources
//! - [`service`] - Application-level facade and process-wide install slot
//! - [`config`] - YAML configuration loading
//! - [`cli`] - Command-line interface of the `envguard` binary
//! - [`ui`] - Terminal output for the binary
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use envguard::environment::{EnvironmentMetadata, EnvironmentResolver, EnvironmentTypeRegistry, Pairing};
//! use envguard::service::ApplicationService;
//!
//! let provider = |name: &str| {
//!     let environment = if name.starts_with("dev-") { "DEV" } else { "PROD" };
//!     Some(EnvironmentMetadata::unknown(name).with_environment(environment))
//! };
//! let resolver =
//!     EnvironmentResolver::new("billing", EnvironmentTypeRegistry::builtin(), Arc::new(provider))
//!         .unwrap();
//! let service = ApplicationService::new(Arc::new(resolver));
//!
//! assert_eq!(service.is_valid_environment_pairing("ledger-db"), Pairing::Match);
//! assert_eq!(service.is_valid_environment_pairing("dev-ledger-db"), Pairing::Mismatch);
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod provider;
pub mod service;
pub mod ui;

pub use error::{EnvGuardError, Result};
