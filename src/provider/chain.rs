//! Priority chain of metadata sources.
//!
//! Sources are consulted in order; the first that knows the resource wins.
//! A resource no source knows gets metadata carrying only its name, so the
//! chain never breaks the provider contract.

use super::{MetadataProvider, MetadataSource};
use crate::environment::EnvironmentMetadata;

/// An ordered list of [`MetadataSource`]s acting as one provider.
///
/// # Example
///
/// ```
/// use envguard::environment::EnvironmentMetadata;
/// use envguard::provider::{MetadataProvider, NamingConvention, ProviderChain, StaticTable};
///
/// let chain = ProviderChain::new()
///     .with_source(StaticTable::new().with_entry(
///         "orders-db",
///         EnvironmentMetadata::default().with_environment("DEV"),
///     ))
///     .with_source(NamingConvention::default());
///
/// let metadata = chain.environment_metadata("orders-db").unwrap();
/// assert_eq!(metadata.environment.as_deref(), Some("DEV"));
///
/// let metadata = chain.environment_metadata("prod-eastus-sql-01").unwrap();
/// assert_eq!(metadata.environment.as_deref(), Some("prod"));
///
/// let metadata = chain.environment_metadata("mystery").unwrap();
/// assert!(metadata.environment.is_none());
/// ```
#[derive(Default)]
pub struct ProviderChain {
    sources: Vec<Box<dyn MetadataSource>>,
}

impl ProviderChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source at the lowest priority.
    pub fn with_source(mut self, source: impl MetadataSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Append an already boxed source.
    pub fn push(&mut self, source: Box<dyn MetadataSource>) {
        self.sources.push(source);
    }

    /// Names of the sources, highest priority first.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl MetadataProvider for ProviderChain {
    fn environment_metadata(&self, resource_name: &str) -> Option<EnvironmentMetadata> {
        for source in &self.sources {
            if let Some(metadata) = source.lookup(resource_name) {
                tracing::debug!("Metadata for '{}' from {}", resource_name, source.name());
                return Some(metadata);
            }
        }

        tracing::debug!("No source knows '{}'", resource_name);
        Some(EnvironmentMetadata::unknown(resource_name))
    }
}
