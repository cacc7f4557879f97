//! Environment classification and pairing.
//!
//! Resolution runs leaf-first:
//!
//! 1. [`EnvironmentType`] - one environment category, identified by name
//! 2. [`EnvironmentTypeRegistry`] - case-insensitive lookup by name or acronym
//! 3. [`EnvironmentResolver`] - the application's own environment plus the
//!    three-valued [`Pairing`] check for other resources

pub mod kind;
pub mod metadata;
pub mod registry;
pub mod resolver;

pub use kind::EnvironmentType;
pub use metadata::EnvironmentMetadata;
pub use registry::{builtin_environment_types, EnvironmentTypeRegistry};
pub use resolver::{EnvironmentResolver, Pairing, Uncertainty};
