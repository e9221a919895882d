//! Unchanged-declaration filter.
//!
//! Partitions both snapshots' eligible declarations by full fingerprint so
//! the match engine only ever sees the changed subset. At tens of thousands
//! of declarations this is the step that keeps the whole diff near-linear:
//! identical declarations are dropped on hash equality alone.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::fingerprint::full_fingerprint;
use crate::internal::InternalNameClassifier;
use crate::types::{Declaration, Snapshot};

/// Declarations that survive the unchanged filter.
#[derive(Debug, Default)]
pub struct ChangedSet<'a> {
    /// Eligible declarations with no identical counterpart in the new
    /// snapshot, sorted by name.
    pub befores: Vec<&'a Declaration>,
    /// Eligible declarations with no identical counterpart in the old
    /// snapshot, sorted by name.
    pub afters: Vec<&'a Declaration>,
}

/// Whether a declaration participates in matching at all: it must carry a
/// value, and internal names are skipped unless requested.
fn eligible(
    decl: &Declaration,
    include_internal: bool,
    classifier: &dyn InternalNameClassifier,
) -> bool {
    decl.value.is_some() && (include_internal || !classifier.is_internal(&decl.name))
}

/// Eligible declarations in name order, paired with their full fingerprint.
///
/// Name order keeps every downstream step deterministic regardless of hash
/// map iteration order.
fn eligible_decls<'a>(
    snapshot: &'a Snapshot,
    include_internal: bool,
    classifier: &dyn InternalNameClassifier,
) -> Vec<(u64, &'a Declaration)> {
    let mut decls: Vec<&Declaration> = snapshot
        .decls
        .values()
        .filter(|d| eligible(d, include_internal, classifier))
        .collect();
    decls.sort_by(|a, b| a.name.cmp(&b.name));
    decls.into_iter().map(|d| (full_fingerprint(d), d)).collect()
}

fn index_by_fingerprint<'a>(
    decls: &[(u64, &'a Declaration)],
) -> HashMap<u64, Vec<&'a Declaration>> {
    let mut index: HashMap<u64, Vec<&Declaration>> = HashMap::with_capacity(decls.len());
    for (fp, decl) in decls {
        index.entry(*fp).or_default().push(*decl);
    }
    index
}

fn warn_same_side_collisions(index: &HashMap<u64, Vec<&Declaration>>, side: &str) {
    for bucket in index.values() {
        if bucket.len() > 1 {
            let names: Vec<&str> = bucket.iter().map(|d| d.name.as_str()).collect();
            warn!(
                side,
                names = %names.join(", "),
                "full fingerprint collision between distinct declarations; \
                 treating all of them as changed"
            );
        }
    }
}

/// Partition both snapshots into the changed subset.
///
/// A fingerprint present on exactly one declaration per side with matching
/// names denotes a semantically identical declaration and is dropped.
/// Everything else — one-sided fingerprints and any detected collision —
/// is carried forward to the match engine.
pub fn changed_subset<'a>(
    old: &'a Snapshot,
    new: &'a Snapshot,
    include_internal: bool,
    classifier: &dyn InternalNameClassifier,
) -> ChangedSet<'a> {
    let old_decls = eligible_decls(old, include_internal, classifier);
    let new_decls = eligible_decls(new, include_internal, classifier);

    let old_index = index_by_fingerprint(&old_decls);
    let new_index = index_by_fingerprint(&new_decls);
    warn_same_side_collisions(&old_index, "old");
    warn_same_side_collisions(&new_index, "new");

    let mut unchanged: HashSet<u64> = HashSet::new();
    for (fp, old_bucket) in &old_index {
        if old_bucket.len() != 1 {
            continue;
        }
        match new_index.get(fp) {
            Some(new_bucket) if new_bucket.len() == 1 => {
                if old_bucket[0].name == new_bucket[0].name {
                    unchanged.insert(*fp);
                } else {
                    warn!(
                        old = %old_bucket[0].name,
                        new = %new_bucket[0].name,
                        "full fingerprint collision across snapshots; \
                         keeping both declarations as changed"
                    );
                }
            }
            _ => {}
        }
    }

    ChangedSet {
        befores: old_decls
            .iter()
            .filter(|(fp, _)| !unchanged.contains(fp))
            .map(|(_, d)| *d)
            .collect(),
        afters: new_decls
            .iter()
            .filter(|(fp, _)| !unchanged.contains(fp))
            .map(|(_, d)| *d)
            .collect(),
    }
}
