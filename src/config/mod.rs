//! Configuration loading and parsing for envguard.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Building the registry, provider chain and service in [`build`]
//!
//! # Example
//!
//! ```
//! use envguard::config::parse_config;
//! use std::path::Path;
//!
//! let yaml = r#"
//! application: orders-api
//! resources:
//!   orders-api:
//!     environment: PROD
//!   orders-db:
//!     environment: DEV
//! env_prefix: ENVGUARD_DOCTEST
//! "#;
//! let config = parse_config(yaml, Path::new("config.yml")).unwrap();
//! let service = config.build_service(None).unwrap();
//! assert!(service.validate_resource_pairing("orders-db", false).is_err());
//! ```
//!
//! # Configuration File Location
//!
//! `.envguard/config.yml`, searched from the working directory upwards.
//! The `--config` flag names a file explicitly.

pub mod build;
pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_DIR, CONFIG_FILE};
pub use schema::{EnvGuardConfig, EnvironmentTypeConfig, NamingConfig};
