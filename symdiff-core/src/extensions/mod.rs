//! Metadata-store diff adapters.
//!
//! Each metadata kind a snapshot carries (doc strings, attribute sets,
//! reducibility settings, ...) is diffed by the adapter registered for its
//! key. The registry is an explicit list passed in through `DiffOptions` —
//! adding a metadata kind means registering an adapter, not branching inside
//! the engine.

mod attrs;
mod docs;

pub use attrs::AttributeAdapter;
pub use docs::{DocAdapter, DOC_EXTENSION};

use crate::differ::changes::Diff;
use crate::differ::minimize::RenameMap;
use crate::internal::InternalNameClassifier;
use crate::types::ExtensionState;

/// Diff producer for one metadata kind.
///
/// The engine pulls both snapshots' state for [`key`](Self::key) and hands it
/// over together with the rename correlation; a symbol absent from the old
/// state is new metadata, never an error.
pub trait ExtensionAdapter {
    /// Stable metadata-kind key, used to pull state out of a snapshot.
    fn key(&self) -> &str;

    /// Produce metadata diffs between the two sides' state for this key.
    fn diff(
        &self,
        old_state: &ExtensionState,
        new_state: &ExtensionState,
        renames: &RenameMap,
        include_internal: bool,
        classifier: &dyn InternalNameClassifier,
    ) -> Vec<Diff>;
}

/// The standard adapter set for the stores a build snapshot carries.
pub fn default_adapters() -> Vec<Box<dyn ExtensionAdapter>> {
    vec![
        Box::new(DocAdapter),
        Box::new(AttributeAdapter::tag("protected")),
        Box::new(AttributeAdapter::tag("noncomputable")),
        Box::new(AttributeAdapter::tag("instance")),
        Box::new(AttributeAdapter::tag("simp")),
        Box::new(AttributeAdapter::tag("deprecated")),
        Box::new(AttributeAdapter::valued("reducibility")),
        Box::new(AttributeAdapter::valued("class-out-params")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_adapters_have_unique_keys() {
        let adapters = default_adapters();
        let mut keys: Vec<&str> = adapters.iter().map(|a| a.key()).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before);
        assert!(keys.contains(&DOC_EXTENSION));
    }
}
