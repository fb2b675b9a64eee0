//! Cache-memoized compatibility lookups

use std::sync::Arc;

use tracing::debug;

use crate::compat::cache::{CompatCache, cache_key};
use crate::compat::error::CompatError;
use crate::compat::source::CompatibilitySource;
use crate::compat::types::{CompatibleVersionSet, Package};

/// Pairs a compatibility source with the run-wide cache
///
/// A cache hit never reaches the source. A miss writes the cache exactly once,
/// and only after the source answered successfully. Concurrent misses on the
/// same key are not deduplicated; both go to the source and the second write
/// overwrites the first with an identical value.
#[derive(Clone)]
pub struct CompatLookup {
    source: Arc<dyn CompatibilitySource>,
    cache: Arc<CompatCache>,
}

impl CompatLookup {
    pub fn new(source: Arc<dyn CompatibilitySource>, cache: Arc<CompatCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<CompatCache> {
        &self.cache
    }

    /// Fetch the versions of `target_name` compatible with `consumer`
    pub async fn fetch_compatible_versions(
        &self,
        consumer: &Package,
        target_name: &str,
    ) -> Result<CompatibleVersionSet, CompatError> {
        let key = cache_key(consumer, target_name);

        if let Some(versions) = self.cache.get(&key)? {
            debug!("Cache hit for {}", key);
            return Ok(versions);
        }

        let versions = self
            .source
            .fetch_compatible_versions(consumer, target_name)
            .await
            .map_err(|source| CompatError::Lookup {
                consumer: format!("{}@{}", consumer.name, consumer.version),
                target: target_name.to_string(),
                source,
            })?;

        self.cache.set(&key, versions.clone())?;

        Ok(versions)
    }
}
