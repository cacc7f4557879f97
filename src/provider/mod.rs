//! Metadata providers.
//!
//! A [`MetadataProvider`] is the one extension point of the crate: it turns
//! a resource name into [`EnvironmentMetadata`]. All classification beyond
//! string matching (hostname conventions, deployment tags, process
//! environment) lives behind it.
//!
//! The ready-made pieces here are [`MetadataSource`]s, which may or may not
//! know a given resource, combined by a [`ProviderChain`]:
//!
//! 1. [`EnvVars`] - process environment variables
//! 2. [`StaticTable`] - a fixed table, usually from config
//! 3. [`NamingConvention`] - a regex over the resource name
//! 4. Fallback to metadata that knows only the name

pub mod chain;
pub mod env_vars;
pub mod naming;
pub mod table;

pub use chain::ProviderChain;
pub use env_vars::EnvVars;
pub use naming::NamingConvention;
pub use table::StaticTable;

use crate::environment::EnvironmentMetadata;

/// Produces environment metadata for a resource name.
///
/// Implementations must always return `Some`: a resource that cannot be
/// classified is described by metadata with `None` fields, not by `None`.
/// Returning `None` is treated as a defect in the implementation and
/// surfaces as `ContractViolation`.
///
/// Implementations are shared across threads and must be safe to call
/// concurrently. They are expected to be cheap and local (string parsing,
/// environment reads); no timeouts or retries are applied.
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata for the named resource.
    fn environment_metadata(&self, resource_name: &str) -> Option<EnvironmentMetadata>;
}

impl<F> MetadataProvider for F
where
    F: Fn(&str) -> Option<EnvironmentMetadata> + Send + Sync,
{
    fn environment_metadata(&self, resource_name: &str) -> Option<EnvironmentMetadata> {
        self(resource_name)
    }
}

/// A partial source of metadata.
///
/// Unlike a [`MetadataProvider`], a source returns `None` for resources it
/// does not know about.
pub trait MetadataSource: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Look up the resource, or `None` if this source does not know it.
    fn lookup(&self, resource_name: &str) -> Option<EnvironmentMetadata>;
}
