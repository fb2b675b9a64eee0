//! npmpeer.dev compatibility API implementation

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::compat::error::LookupError;
use crate::compat::source::CompatibilitySource;
use crate::compat::types::{CompatibleVersionSet, Package};
use crate::config::{DEFAULT_SERVICE_URL, ServiceConfig};

/// Response from the npmpeer `find` endpoint
///
/// Items carry more fields (e.g. `"react": "any"`); only `version` is read.
#[derive(Debug, Deserialize)]
struct FindResponse {
    content: Vec<FindItem>,
}

#[derive(Debug, Deserialize)]
struct FindItem {
    version: String,
}

/// Source implementation for the npmpeer compatibility API
pub struct NpmPeerSource {
    client: reqwest::Client,
    endpoint: String,
}

impl NpmPeerSource {
    /// Creates a new NpmPeerSource against a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ServiceConfig {
            base_url: base_url.to_string(),
            ..ServiceConfig::default()
        })
    }

    /// Creates a new NpmPeerSource from service configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.path
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for NpmPeerSource {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

#[async_trait::async_trait]
impl CompatibilitySource for NpmPeerSource {
    async fn fetch_compatible_versions(
        &self,
        consumer: &Package,
        target_name: &str,
    ) -> Result<CompatibleVersionSet, LookupError> {
        debug!(
            "GET {} package={} version={} dep={}",
            self.endpoint, consumer.name, consumer.version, target_name
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("package", consumer.name.as_str()),
                ("version", consumer.version.as_str()),
                ("dep", target_name),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!(
                "npmpeer returned status {} for {}@{} -> {}",
                status, consumer.name, consumer.version, target_name
            );
            return Err(LookupError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: FindResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse npmpeer response: {}", e);
            LookupError::InvalidResponse(e.to_string())
        })?;

        Ok(body.content.into_iter().map(|item| item.version).collect())
    }
}

impl std::fmt::Debug for NpmPeerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NpmPeerSource")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
