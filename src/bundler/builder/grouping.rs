//! Grouping produced frameworks by product name.

use crate::bundler::bundle::{Archive, BinaryBundle};
use std::collections::BTreeMap;

/// Folds every bundle of every archive into logical-name groups.
///
/// Bundles keep archive order inside a group; groups are ordered by name.
pub fn group_bundles(archives: &[Archive]) -> BTreeMap<String, Vec<BinaryBundle>> {
    let mut groups: BTreeMap<String, Vec<BinaryBundle>> = BTreeMap::new();
    for bundle in archives.iter().flat_map(|archive| &archive.bundles) {
        groups
            .entry(bundle.logical_name.clone())
            .or_default()
            .push(bundle.clone());
    }
    groups
}

/// Picks the artifact name of every group.
///
/// With exactly one group, a configured `name` replaces the group's own.
pub fn resolve_artifact_names(
    groups: BTreeMap<String, Vec<BinaryBundle>>,
    name: Option<&str>,
) -> Vec<(String, Vec<BinaryBundle>)> {
    let single = groups.len() == 1;
    groups
        .into_iter()
        .map(|(group, bundles)| match name {
            Some(name) if single => (name.to_string(), bundles),
            _ => (group, bundles),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundle(dir: &str, arch: &str) -> BinaryBundle {
        BinaryBundle::from_path(dir, vec![arch.to_string()], true).unwrap()
    }

    fn archives() -> Vec<Archive> {
        vec![
            Archive {
                archive_path: PathBuf::from("/b/S-iphoneos.xcarchive"),
                bundles: vec![bundle("/b/1/A.framework", "arm64"), bundle("/b/1/B.framework", "arm64")],
            },
            Archive {
                archive_path: PathBuf::from("/b/S-iphonesimulator.xcarchive"),
                bundles: vec![bundle("/b/2/A.framework", "x86_64")],
            },
        ]
    }

    #[test]
    fn test_groups_by_logical_name() {
        let groups = group_bundles(&archives());
        assert_eq!(groups.len(), 2);
        let a: Vec<_> = groups["A"].iter().map(|b| b.architectures[0].as_str()).collect();
        assert_eq!(a, ["arm64", "x86_64"]);
        assert_eq!(groups["B"].len(), 1);
    }

    #[test]
    fn test_name_ignored_for_several_groups() {
        let resolved = resolve_artifact_names(group_bundles(&archives()), Some("Combo"));
        let names: Vec<_> = resolved.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_name_overrides_single_group() {
        let only_a = vec![Archive {
            archive_path: PathBuf::from("/b/S-macosx.xcarchive"),
            bundles: vec![bundle("/b/A.framework", "x86_64")],
        }];
        let resolved = resolve_artifact_names(group_bundles(&only_a), Some("Combo"));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0, "Combo");

        let unnamed = resolve_artifact_names(group_bundles(&only_a), None);
        assert_eq!(unnamed[0].0, "A");
    }
}
