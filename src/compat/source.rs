//! Source trait for asking a remote service which versions are compatible

#[cfg(test)]
use mockall::automock;

use crate::compat::error::LookupError;
use crate::compat::types::{CompatibleVersionSet, Package};

/// Trait for fetching compatible versions from a remote compatibility service
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CompatibilitySource: Send + Sync {
    /// Fetches the versions of `target_name` compatible with `consumer`
    ///
    /// # Arguments
    /// * `consumer` - An already declared package (e.g., `react@18.2.0`)
    /// * `target_name` - The package to add (e.g., `sass`)
    ///
    /// # Returns
    /// * `Ok(CompatibleVersionSet)` - Versions in service order, possibly empty
    /// * `Err(LookupError)` - Network failure, non-2xx status or malformed body
    async fn fetch_compatible_versions(
        &self,
        consumer: &Package,
        target_name: &str,
    ) -> Result<CompatibleVersionSet, LookupError>;
}
