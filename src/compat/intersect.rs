//! Lenient intersection of compatible-version sets

use crate::compat::types::CompatibleVersionSet;

/// Intersect the per-consumer version sets for one target
///
/// Folds left from the first set, keeping the versions of the running result
/// that also appear in the current set. A step that would leave nothing is
/// skipped and the previous result carries on, so a single disagreeing
/// consumer cannot veto every version. Membership is plain string equality.
///
/// The result keeps the order of the first set. An empty input yields an
/// empty set.
pub fn intersect(sets: &[CompatibleVersionSet]) -> CompatibleVersionSet {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };

    rest.iter().fold(first.clone(), |acc, current| {
        let narrowed: CompatibleVersionSet = acc
            .iter()
            .filter(|version| current.contains(version))
            .cloned()
            .collect();

        if narrowed.is_empty() { acc } else { narrowed }
    })
}
