//! Batch resolution of target packages against declared packages
//!
//! For every target not already declared, each current consumer package is
//! asked for its compatible versions of the target (fan-out), the answers are
//! intersected and the oldest/latest versions reported. An adopted target is
//! appended to the consumer list as `~<latest>` so later targets are checked
//! against it too.
//!
//! Targets run concurrently through an order-preserving buffered stream, so the
//! output follows input target order. Each target snapshots the consumer list
//! when it starts: whether it sees an earlier target's adoption depends on
//! scheduling unless the concurrency bound is 1.
//!
//! A target whose lookups fail does not stop the batch. It is reported in
//! [`BatchResolution::failed`], separate from targets that simply have no
//! compatible version.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use futures::future::try_join_all;
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use tracing::{error, info};

use crate::compat::error::CompatError;
use crate::compat::intersect::intersect;
use crate::compat::lookup::CompatLookup;
use crate::compat::select::select_range;
use crate::compat::types::{Package, ResolvedTarget};

/// Shared, growing list of consumer packages for one batch
#[derive(Debug, Default)]
pub struct ConsumerList {
    packages: Mutex<Vec<Package>>,
}

impl ConsumerList {
    pub fn new(packages: Vec<Package>) -> Self {
        Self {
            packages: Mutex::new(packages),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Package>>, CompatError> {
        self.packages
            .lock()
            .map_err(|_| CompatError::ConsumersPoisoned)
    }

    pub fn snapshot(&self) -> Result<Vec<Package>, CompatError> {
        Ok(self.lock()?.clone())
    }

    pub fn contains(&self, name: &str) -> Result<bool, CompatError> {
        Ok(self.lock()?.iter().any(|pkg| pkg.name == name))
    }

    /// Append a package and return the new length
    pub fn push(&self, package: Package) -> Result<usize, CompatError> {
        let mut packages = self.lock()?;
        packages.push(package);
        Ok(packages.len())
    }
}

/// Build the consumer list from a name -> specifier map, keeping map order
pub fn consumer_packages(raw: &IndexMap<String, String>) -> Vec<Package> {
    raw.iter()
        .map(|(name, version)| Package::new(name, version))
        .collect()
}

/// A target whose resolution failed
#[derive(Debug)]
pub struct TargetFailure {
    pub target: String,
    pub error: CompatError,
}

/// Outcome of one batch
///
/// `resolved` holds targets with a compatible range, in input order. Targets
/// already declared or without any compatible version appear in neither list.
#[derive(Debug, Default)]
pub struct BatchResolution {
    pub resolved: Vec<ResolvedTarget>,
    pub failed: Vec<TargetFailure>,
}

impl BatchResolution {
    /// True when no target failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct BatchResolver {
    lookup: CompatLookup,
    max_concurrent_targets: Option<usize>,
}

impl BatchResolver {
    pub fn new(lookup: CompatLookup) -> Self {
        Self {
            lookup,
            max_concurrent_targets: None,
        }
    }

    /// Bound the number of targets resolved at once; `None` means unbounded
    pub fn with_max_concurrent_targets(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_targets = limit.filter(|n| *n > 0);
        self
    }

    pub fn lookup(&self) -> &CompatLookup {
        &self.lookup
    }

    /// Resolve every target against the declared packages
    ///
    /// Fails with `InvalidInput` when either argument is missing. Targets that
    /// are already declared or have no compatible version are left out; targets
    /// whose lookups fail are collected in [`BatchResolution::failed`].
    pub async fn resolve_all(
        &self,
        raw_packages: Option<&IndexMap<String, String>>,
        target_names: Option<&[String]>,
    ) -> Result<BatchResolution, CompatError> {
        let (Some(raw_packages), Some(target_names)) = (raw_packages, target_names) else {
            return Err(CompatError::InvalidInput(
                "Missing required argument(s)".to_string(),
            ));
        };

        let consumers = consumer_packages(raw_packages);
        let declared: HashSet<String> = consumers.iter().map(|pkg| pkg.name.clone()).collect();

        let pending: Vec<&String> = target_names
            .iter()
            .filter(|name| {
                let already = declared.contains(*name);
                if already {
                    info!("Target package {} is already in the given packages list", name);
                }
                !already
            })
            .collect();

        let consumers = ConsumerList::new(consumers);
        let limit = self
            .max_concurrent_targets
            .unwrap_or(pending.len())
            .max(1);

        let outcomes: Vec<(&String, Result<Option<ResolvedTarget>, CompatError>)> =
            stream::iter(pending)
                .map(|name| {
                    let consumers = &consumers;
                    async move { (name, self.resolve_target(consumers, name).await) }
                })
                .buffered(limit)
                .collect()
                .await;

        let mut batch = BatchResolution::default();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(Some(resolved)) => batch.resolved.push(resolved),
                Ok(None) => {}
                Err(e) => {
                    error!("Failed to resolve compatible versions for {}: {}", name, e);
                    batch.failed.push(TargetFailure {
                        target: name.clone(),
                        error: e,
                    });
                }
            }
        }

        Ok(batch)
    }

    /// Resolve a single target against the current consumer list
    ///
    /// Returns `Ok(None)` when the target is already declared or no version is
    /// compatible. Any failed lookup fails the whole target.
    pub async fn resolve_target(
        &self,
        consumers: &ConsumerList,
        target_name: &str,
    ) -> Result<Option<ResolvedTarget>, CompatError> {
        if consumers.contains(target_name)? {
            info!(
                "Target package {} is already in the given packages list",
                target_name
            );
            return Ok(None);
        }

        info!("Finding common compatible versions for {}", target_name);

        let snapshot = consumers.snapshot()?;
        let version_sets = try_join_all(
            snapshot
                .iter()
                .map(|consumer| self.lookup.fetch_compatible_versions(consumer, target_name)),
        )
        .await?;

        let versions = intersect(&version_sets);

        let Some(range) = select_range(&versions) else {
            info!("No compatible version found for {}", target_name);
            return Ok(None);
        };

        let resolved = ResolvedTarget {
            name: target_name.to_string(),
            version: range,
        };

        let total = consumers.push(resolved.adopted())?;
        info!("Given packages: {}", total);
        info!(
            "Added compatible version {} for {}",
            resolved.version.latest, target_name
        );
        info!(
            "Compatible range for package {} is: {} - {}",
            target_name, resolved.version.oldest, resolved.version.latest
        );

        Ok(Some(resolved))
    }
}
