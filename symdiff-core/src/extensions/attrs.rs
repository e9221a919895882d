//! Attribute-store diffing.
//!
//! Two store shapes share one adapter type: tag stores, where membership is
//! the whole payload (`simp`, `protected`, ...), and valued stores, where the
//! payload carries a setting that can change in place (`reducibility`,
//! `class-out-params`).

use crate::differ::changes::Diff;
use crate::differ::minimize::RenameMap;
use crate::extensions::ExtensionAdapter;
use crate::internal::InternalNameClassifier;
use crate::types::ExtensionState;

/// Diffs one attribute store.
pub struct AttributeAdapter {
    key: &'static str,
    valued: bool,
}

impl AttributeAdapter {
    /// Membership-only store: payload changes are not meaningful.
    pub fn tag(key: &'static str) -> Self {
        Self { key, valued: false }
    }

    /// Valued store: payload changes surface as `AttributeChanged`.
    pub fn valued(key: &'static str) -> Self {
        Self { key, valued: true }
    }
}

impl ExtensionAdapter for AttributeAdapter {
    fn key(&self) -> &str {
        self.key
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

        for (name, payload) in new_state {
            if !include_internal && classifier.is_internal(name) {
                continue;
            }
            match old_state.get(renames.old_name(name)) {
                None => diffs.push(Diff::AttributeAdded {
                    attr: self.key.to_string(),
                    name: name.clone(),
                }),
                Some(old_payload) if self.valued && old_payload != payload => {
                    diffs.push(Diff::AttributeChanged {
                        attr: self.key.to_string(),
                        name: name.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        for name in old_state.keys() {
            if !include_internal && classifier.is_internal(name) {
                continue;
            }
            if !new_state.contains_key(renames.new_name(name)) {
                diffs.push(Diff::AttributeRemoved {
                    attr: self.key.to_string(),
                    name: name.clone(),
                });
            }
        }

        diffs
    }
}
