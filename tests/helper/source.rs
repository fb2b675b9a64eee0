//! Compatibility source test utilities

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;

use peer_compat::compat::cache::CompatCache;
use peer_compat::compat::error::LookupError;
use peer_compat::compat::lookup::CompatLookup;
use peer_compat::compat::resolver::BatchResolver;
use peer_compat::compat::source::CompatibilitySource;
use peer_compat::compat::types::{CompatibleVersionSet, Package};

/// Deterministic in-memory compatibility service
///
/// Answers are keyed by (consumer name, target name); unknown pairs answer
/// with an empty set. Every call is counted and recorded as
/// `<consumer>@<version>--<target>`. With a delay each lookup sleeps before
/// answering, so several targets are in flight at once.
#[derive(Default)]
pub struct FakeSource {
    answers: HashMap<(String, String), Vec<String>>,
    failing_targets: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    lookups: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, consumer: &str, target: &str, versions: Vec<&str>) -> Self {
        self.answers.insert(
            (consumer.to_string(), target.to_string()),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Every lookup for `target` answers with a 500
    pub fn failing_for(mut self, target: &str) -> Self {
        self.failing_targets.insert(target.to_string());
        self
    }

    /// Sleep for `delay` inside every lookup
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Lookups made for `target`, in call order
    pub fn lookups_for(&self, target: &str) -> Vec<String> {
        let suffix = format!("--{target}");
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .filter(|key| key.ends_with(&suffix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CompatibilitySource for FakeSource {
    async fn fetch_compatible_versions(
        &self,
        consumer: &Package,
        target_name: &str,
    ) -> Result<CompatibleVersionSet, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookups.lock().unwrap().push(format!(
            "{}@{}--{}",
            consumer.name, consumer.version, target_name
        ));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_targets.contains(target_name) {
            return Err(LookupError::UnexpectedStatus {
                status: 500,
                url: format!("http://fake/find?dep={target_name}"),
            });
        }

        Ok(self
            .answers
            .get(&(consumer.name.clone(), target_name.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Create a resolver over the given source with a cold cache
pub fn create_test_resolver(source: Arc<FakeSource>) -> BatchResolver {
    BatchResolver::new(CompatLookup::new(source, Arc::new(CompatCache::new())))
}

pub fn packages(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(name, version)| (name.to_string(), version.to_string()))
        .collect()
}

pub fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
