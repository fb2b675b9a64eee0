use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::compat::error::CacheError;
use crate::compat::types::{CompatibleVersionSet, Package};

/// Build the cache key for a (consumer, target) lookup
///
/// Format: `<consumerName>@<consumerVersion>--<targetName>`
pub fn cache_key(consumer: &Package, target_name: &str) -> String {
    format!("{}@{}--{}", consumer.name, consumer.version, target_name)
}

/// In-memory compatibility cache
///
/// Lives for one run and is never persisted. Entries never expire and are
/// never evicted. A key, once written, is only ever overwritten with the
/// same value since the service answer for a key is deterministic.
#[derive(Debug, Default)]
pub struct CompatCache {
    entries: RwLock<HashMap<String, CompatibleVersionSet>>,
}

impl CompatCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, CompatibleVersionSet>>, CacheError> {
        self.entries.read().map_err(|_| CacheError::LockPoisoned)
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<String, CompatibleVersionSet>>, CacheError> {
        self.entries.write().map_err(|_| CacheError::LockPoisoned)
    }

    pub fn has(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.read()?.contains_key(key))
    }

    pub fn get(&self, key: &str) -> Result<Option<CompatibleVersionSet>, CacheError> {
        Ok(self.read()?.get(key).cloned())
    }

    /// Idempotent upsert; last write wins
    pub fn set(&self, key: &str, versions: CompatibleVersionSet) -> Result<(), CacheError> {
        debug!("Caching {} versions for {}", versions.len(), key);
        self.write()?.insert(key.to_string(), versions);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.read()?.is_empty())
    }
}
