//! Static metadata table.

use std::collections::HashMap;

use super::MetadataSource;
use crate::environment::EnvironmentMetadata;

/// A fixed mapping from resource name to metadata.
///
/// Keys are matched exactly.
#[derive(Debug, Clone, Default)]
pub struct StaticTable {
    entries: HashMap<String, EnvironmentMetadata>,
}

impl StaticTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, resource_name: impl Into<String>, metadata: EnvironmentMetadata) -> Self {
        self.entries.insert(resource_name.into(), metadata);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, EnvironmentMetadata>> for StaticTable {
    fn from(entries: HashMap<String, EnvironmentMetadata>) -> Self {
        Self { entries }
    }
}

impl MetadataSource for StaticTable {
    fn name(&self) -> &str {
        "static table"
    }

    fn lookup(&self, resource_name: &str) -> Option<EnvironmentMetadata> {
        let mut metadata = self.entries.get(resource_name)?.clone();
        if metadata.resource_name.is_none() {
            metadata.resource_name = Some(resource_name.to_string());
        }
        Some(metadata)
    }
}
