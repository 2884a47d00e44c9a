//! # Component Resolver
//!
//! Finds the archive member that fulfils a required component by scanning
//! the manifest's component groups for a path ending with the component's
//! filename suffix.
//!
//! ## First match wins
//!
//! Candidates are scanned in declared order and the first path whose text
//! ends with the suffix is returned. Later matches are ignored (a warning is
//! logged) rather than rejected, so a manifest listing two `roles.json`
//! entries always resolves to the first one.

use std::collections::BTreeMap;

use serde_json::Value;
use uapf_schema::SchemaKind;

use crate::error::{PackageError, PackageResult};
use crate::loader::MANIFEST_MEMBER;

/// Return the first candidate ending with `suffix`.
///
/// `group` only names the candidate list in the error.
///
/// # Errors
///
/// [`PackageError::ComponentNotDeclared`] if no candidate matches.
pub fn resolve<'a>(group: &str, candidates: &'a [String], suffix: &str) -> PackageResult<&'a str> {
    let mut matches = candidates.iter().filter(|path| path.ends_with(suffix));

    let Some(chosen) = matches.next() else {
        return Err(PackageError::ComponentNotDeclared {
            group: group.to_string(),
            suffix: suffix.to_string(),
        });
    };

    let ignored = matches.count();
    if ignored > 0 {
        tracing::warn!(
            group,
            suffix,
            chosen = %chosen,
            ignored,
            "several component paths match; using the first"
        );
    }

    tracing::debug!(group, suffix, member = %chosen, "resolved component");
    Ok(chosen)
}

/// The manifest's `components` object, as ordered path lists per group.
///
/// Absent groups, non-array groups and a missing or non-object
/// `components` all read as empty. Non-string entries are skipped. Nothing
/// here fails; only resolving a specific required file can.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentGroups {
    groups: BTreeMap<String, Vec<String>>,
}

impl ComponentGroups {
    /// Extract the component groups from a decoded manifest.
    pub fn from_manifest(manifest: &Value) -> Self {
        let groups = manifest
            .get("components")
            .and_then(Value::as_object)
            .map(|components| {
                components
                    .iter()
                    .map(|(name, entries)| {
                        let paths = entries
                            .as_array()
                            .map(|items| {
                                items
                                    .iter()
                                    .filter_map(Value::as_str)
                                    .map(str::to_string)
                                    .collect()
                            })
                            .unwrap_or_default();
                        (name.clone(), paths)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { groups }
    }

    /// Declared paths of `group`, empty if the group is absent.
    pub fn group(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of declared paths per group, sorted by group name.
    pub fn group_sizes(&self) -> BTreeMap<String, usize> {
        self.groups
            .iter()
            .map(|(name, paths)| (name.clone(), paths.len()))
            .collect()
    }

    /// Resolve the member path holding the `kind` document.
    ///
    /// The manifest itself always lives at [`MANIFEST_MEMBER`].
    pub fn resolve(&self, kind: SchemaKind) -> PackageResult<&str> {
        match kind.component() {
            None => Ok(MANIFEST_MEMBER),
            Some((group, suffix)) => resolve(group, self.group(group), suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_single_match() {
        let candidates = paths(&["agents/roles.json", "agents/capabilities.json"]);
        assert_eq!(
            resolve("agents", &candidates, "capabilities.json").unwrap(),
            "agents/capabilities.json"
        );
    }

    #[test]
    fn test_resolve_first_of_duplicates() {
        let candidates = paths(&["agents/primary/roles.json", "agents/backup/roles.json"]);
        assert_eq!(
            resolve("agents", &candidates, "roles.json").unwrap(),
            "agents/primary/roles.json"
        );
    }

    #[test]
    fn test_resolve_no_match() {
        let candidates = paths(&["agents/roles.json"]);
        let err = resolve("agents", &candidates, "bindings.json").unwrap_err();
        match err {
            PackageError::ComponentNotDeclared { group, suffix } => {
                assert_eq!(group, "agents");
                assert_eq!(suffix, "bindings.json");
            }
            other => panic!("Expected ComponentNotDeclared, got: {other}"),
        }
    }

    #[test]
    fn test_resolve_empty_group() {
        assert!(matches!(
            resolve("integration", &[], "mcp-tools.json"),
            Err(PackageError::ComponentNotDeclared { .. })
        ));
    }

    #[test]
    fn test_suffix_matches_whole_path_text() {
        // "team-roles.json" ends with "roles.json", so it is a candidate.
        let candidates = paths(&["agents/team-roles.json"]);
        assert_eq!(
            resolve("agents", &candidates, "roles.json").unwrap(),
            "agents/team-roles.json"
        );
    }

    #[test]
    fn test_groups_from_manifest() {
        let groups = ComponentGroups::from_manifest(&json!({
            "components": {
                "agents": ["agents/roles.json", 7, "agents/bindings.json"],
                "integration": "not-a-list"
            }
        }));
        assert_eq!(groups.group("agents"), ["agents/roles.json", "agents/bindings.json"]);
        assert!(groups.group("integration").is_empty());
        assert!(groups.group("workflows").is_empty());
    }

    #[test]
    fn test_groups_missing_components() {
        for manifest in [json!({}), json!({"components": null}), json!({"components": []})] {
            let groups = ComponentGroups::from_manifest(&manifest);
            assert_eq!(groups, ComponentGroups::default());
            assert!(matches!(
                groups.resolve(SchemaKind::Roles),
                Err(PackageError::ComponentNotDeclared { .. })
            ));
        }
    }

    #[test]
    fn test_resolve_by_kind_uses_group() {
        let groups = ComponentGroups::from_manifest(&json!({
            "components": {
                "agents": ["shared/mcp-tools.json"],
                "integration": ["integration/mcp-tools.json"]
            }
        }));
        assert_eq!(
            groups.resolve(SchemaKind::McpTools).unwrap(),
            "integration/mcp-tools.json"
        );
        assert_eq!(groups.resolve(SchemaKind::Manifest).unwrap(), MANIFEST_MEMBER);
    }

    #[test]
    fn test_group_sizes() {
        let groups = ComponentGroups::from_manifest(&json!({
            "components": {"integration": ["a", "b"], "agents": ["c"]}
        }));
        let sizes: Vec<_> = groups.group_sizes().into_iter().collect();
        assert_eq!(sizes, [("agents".to_string(), 1), ("integration".to_string(), 2)]);
    }

    fn candidate_path() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "a/roles.json",
            "b/roles.json",
            "roles.json.bak",
            "agents/capabilities.json",
            "agents/bindings.json",
            "README.md",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn prop_resolve_returns_first_match(candidates in prop::collection::vec(candidate_path(), 0..8)) {
            let expected = candidates.iter().find(|p| p.ends_with("roles.json"));
            match (resolve("agents", &candidates, "roles.json"), expected) {
                (Ok(found), Some(expected)) => prop_assert_eq!(found, expected.as_str()),
                (Err(PackageError::ComponentNotDeclared { .. }), None) => {}
                (result, expected) => prop_assert!(false, "resolve={:?} expected={:?}", result.map(str::to_string), expected),
            }
        }

        #[test]
        fn prop_resolve_is_deterministic(candidates in prop::collection::vec(candidate_path(), 1..8)) {
            let first = resolve("agents", &candidates, "bindings.json").ok().map(str::to_string);
            let second = resolve("agents", &candidates, "bindings.json").ok().map(str::to_string);
            prop_assert_eq!(first, second);
        }
    }
}
