//! Range selection by semver precedence

use semver::Version;
use tracing::warn;

use crate::compat::types::CompatibleRange;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Strips a leading `v` and pads partial versions with zeros.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "v1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Pick the oldest and latest versions of a compatible set
///
/// Ordering is semver precedence, so build metadata is ignored and versions
/// of equal precedence keep their input order. Versions that do not parse are
/// left out of the ordering. Returns `None` when nothing parses, including for
/// an empty set.
pub fn select_range(versions: &[String]) -> Option<CompatibleRange> {
    let mut parsed: Vec<(&String, Version)> = versions
        .iter()
        .filter_map(|v| match parse_version(v) {
            Some(parsed) => Some((v, parsed)),
            None => {
                warn!("Ignoring unparseable version {:?}", v);
                None
            }
        })
        .collect();

    parsed.sort_by(|(_, a), (_, b)| a.cmp_precedence(b));

    let (oldest, _) = parsed.first()?;
    let (latest, _) = parsed.last()?;

    Some(CompatibleRange {
        oldest: (*oldest).clone(),
        latest: (*latest).clone(),
    })
}

/// Specifier recorded for an adopted target: `latest` plus compatible patch updates
pub fn adopted_specifier(latest: &str) -> String {
    format!("~{latest}")
}
