//! Documentation-string diffing.

use crate::differ::changes::Diff;
use crate::differ::minimize::RenameMap;
use crate::extensions::ExtensionAdapter;
use crate::internal::InternalNameClassifier;
use crate::types::ExtensionState;

/// Extension key for the documentation store.
pub const DOC_EXTENSION: &str = "doc";

/// Diffs the per-declaration documentation store.
pub struct DocAdapter;

impl ExtensionAdapter for DocAdapter {
    fn key(&self) -> &str {
        DOC_EXTENSION
    }

    fn diff(
        &self,
        old_state: &ExtensionState,
        new_state: &ExtensionState,
        renames: &RenameMap,
        include_internal: bool,
        classifier: &dyn InternalNameClassifier,
    ) -> Vec<Diff> {
        let mut diffs = Vec::new();

        for (name, text) in new_state {
            if !include_internal && classifier.is_internal(name) {
                continue;
            }
            match old_state.get(renames.old_name(name)) {
                None => diffs.push(Diff::DocAdded { name: name.clone() }),
                Some(old_text) if old_text != text => {
                    diffs.push(Diff::DocChanged { name: name.clone() })
                }
                Some(_) => {}
            }
        }

        for name in old_state.keys() {
            if !include_internal && classifier.is_internal(name) {
                continue;
            }
            if !new_state.contains_key(renames.new_name(name)) {
                diffs.push(Diff::DocRemoved { name: name.clone() });
            }
        }

        diffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::HeuristicClassifier;
    use crate::types::Name;

    fn state(entries: &[(&str, &str)]) -> ExtensionState {
        entries
            .iter()
            .map(|(name, text)| (Name::new(*name), text.to_string()))
            .collect()
    }

    fn run(old: &ExtensionState, new: &ExtensionState, renames: &RenameMap) -> Vec<Diff> {
        DocAdapter.diff(old, new, renames, false, &HeuristicClassifier::new())
    }

    #[test]
    fn test_doc_added_changed_removed() {
        let old = state(&[("changed", "old text"), ("gone", "doc"), ("same", "doc")]);
        let new = state(&[("changed", "new text"), ("fresh", "doc"), ("same", "doc")]);
        let diffs = run(&old, &new, &RenameMap::default());
        assert_eq!(
            diffs,
            vec![
                Diff::DocChanged {
                    name: Name::new("changed")
                },
                Diff::DocAdded {
                    name: Name::new("fresh")
                },
                Diff::DocRemoved {
                    name: Name::new("gone")
                },
            ]
        );
    }

    #[test]
    fn test_rename_correlates_doc_state() {
        // The doc moved with the renamed declaration and is unchanged.
        let old = state(&[("foo", "doc")]);
        let new = state(&[("bar", "doc")]);
        let renames = RenameMap::from_diffs(&[Diff::Renamed {
            from: Name::new("foo"),
            to: Name::new("bar"),
            namespace_only: false,
            module: Name::new("M"),
        }]);
        assert!(run(&old, &new, &renames).is_empty());

        // Without the correlation this would look like a remove plus an add.
        let diffs = run(&old, &new, &RenameMap::default());
        assert_eq!(diffs.len(), 2);
    }

    #[test]
    fn test_internal_names_skipped() {
        let old = state(&[]);
        let new = state(&[("foo.match_1", "doc"), ("foo", "doc")]);
        let diffs = run(&old, &new, &RenameMap::default());
        assert_eq!(
            diffs,
            vec![Diff::DocAdded {
                name: Name::new("foo")
            }]
        );
    }
}
