//! Declared packages from a `package.json` style manifest

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Manifest {
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
    peer_dependencies: IndexMap<String, String>,
}

/// Parse manifest content into a name -> specifier map
///
/// Sections are merged as dependencies, devDependencies, peerDependencies;
/// the first occurrence of a name wins.
pub fn parse_manifest(content: &str) -> Result<IndexMap<String, String>, serde_json::Error> {
    let manifest: Manifest = serde_json::from_str(content)?;

    let mut packages = manifest.dependencies;
    for (name, version) in manifest
        .dev_dependencies
        .into_iter()
        .chain(manifest.peer_dependencies)
    {
        packages.entry(name).or_insert(version);
    }

    Ok(packages)
}

/// Read and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<IndexMap<String, String>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_manifest(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
