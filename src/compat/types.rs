//! Common types shared by the compatibility layer

use serde::{Deserialize, Serialize};

/// A declared dependency and its version specifier
///
/// The specifier may be a range expression such as `^7.1.7`, not necessarily
/// an exact version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Versions of one target reported compatible with one consumer
pub type CompatibleVersionSet = Vec<String>;

/// Minimum and maximum compatible versions by semver precedence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibleRange {
    pub oldest: String,
    pub latest: String,
}

/// Outcome for one target that has at least one compatible version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub name: String,
    pub version: CompatibleRange,
}

impl ResolvedTarget {
    /// The specifier recorded when this target is adopted as a consumer
    pub fn adopted(&self) -> Package {
        Package::new(&self.name, crate::compat::select::adopted_specifier(&self.version.latest))
    }
}
