//! Hypothesis-ordered match engine.
//!
//! Correlates removed and added declarations into single semantic changes.
//! Each hypothesis names the traits allowed to differ; all other traits must
//! agree, checked by partial-fingerprint equality. Hypotheses run smallest
//! exclusion set first, so the most precise diagnosis wins whenever a pair is
//! explainable multiple ways. Hash equality stands in for pairwise
//! structural comparison, which keeps the pass near-linear; the price is a
//! greedy, first-binding-wins match rather than a globally optimal one, and
//! any ambiguity is surfaced as a warning rather than resolved silently.

use std::collections::HashMap;

use tracing::warn;

use crate::differ::changes::Diff;
use crate::fingerprint::{fingerprint, DeclTrait};
use crate::types::{DeclKind, Declaration};

use DeclTrait::{Kind, Module, Name, Type, Value};

/// Trait-exclusion hypotheses in processing order: ascending excluded-set
/// size, ties broken by the order of the matching table.
const HYPOTHESES: [&[DeclTrait]; 12] = [
    &[Name],
    &[Value],
    &[Type],
    &[Module],
    &[Kind],
    &[Name, Value],
    &[Type, Value],
    &[Name, Module],
    &[Value, Module],
    &[Type, Module],
    &[Name, Value, Module],
    &[Type, Value, Module],
];

/// Diffs implied by a match of `before` and `after` under `excluded`.
///
/// A direct transcription of the matching table. Each constructor
/// double-checks that the trait actually differs: a pair can reach a
/// hypothesis through a fingerprint collision, and a self-rename or a value
/// change to the same value must never be reported.
fn implied_diffs(excluded: &[DeclTrait], before: &Declaration, after: &Declaration) -> Vec<Diff> {
    let mut diffs = Vec::new();

    if matches!(excluded, [Kind]) {
        if before.kind != after.kind {
            diffs.push(Diff::SpeciesChanged {
                name: after.name.clone(),
                from: before.kind,
                to: after.kind,
                module: after.module.clone(),
            });
        }
        return diffs;
    }

    // (rename, type, value, move) reported per row; any hypothesis
    // containing Module outside the explicit rows reports only the move.
    let (reports_rename, reports_type, reports_value, reports_move) = match excluded {
        [Name] => (true, false, false, false),
        [Value] => (false, false, true, false),
        [Type] => (false, true, false, false),
        [Name, Value] => (true, false, true, false),
        [Type, Value] => (false, true, true, false),
        [Name, Value, Module] => (true, false, true, true),
        [Type, Value, Module] => (false, true, true, true),
        c if c.contains(&Module) => (false, false, false, true),
        _ => (false, false, false, false),
    };

    let renamed = before.name != after.name;
    let value_changed = before.value != after.value;
    let type_changed = before.ty != after.ty;
    let moved = before.module != after.module;

    if reports_rename && renamed {
        diffs.push(Diff::Renamed {
            from: before.name.clone(),
            to: after.name.clone(),
            namespace_only: before.name.last_component() == after.name.last_component(),
            module: after.module.clone(),
        });
    }
    if reports_type && type_changed {
        diffs.push(Diff::TypeChanged {
            name: after.name.clone(),
            module: after.module.clone(),
        });
    }
    if reports_value && value_changed {
        diffs.push(Diff::ProofChanged {
            name: after.name.clone(),
            module: after.module.clone(),
            is_proof_relevant: after.kind != DeclKind::Theorem,
        });
    }
    if reports_move && moved {
        diffs.push(Diff::MovedToModule {
            name: after.name.clone(),
            from_module: before.module.clone(),
            to_module: after.module.clone(),
        });
    }
    diffs
}

/// Pair up changed declarations and emit the implied diffs.
///
/// Inputs are the filter's changed subsets, sorted by name; the sort order is
/// what makes first-binding-wins deterministic. Unmatched afters become
/// `Added`, unmatched befores become `Removed`.
pub fn match_changed(befores: &[&Declaration], afters: &[&Declaration]) -> Vec<Diff> {
    let mut diffs = Vec::new();
    let mut before_explained = vec![false; befores.len()];
    let mut after_explained = vec![false; afters.len()];

    for excluded in HYPOTHESES {
        // Partial fingerprint -> first before bound to it.
        let mut buckets: HashMap<u64, usize> = HashMap::new();
        for (i, before) in befores.iter().enumerate() {
            if before_explained[i] {
                continue;
            }
            let fp = fingerprint(before, excluded);
            if let Some(&first) = buckets.get(&fp) {
                warn!(
                    hypothesis = ?excluded,
                    first = %befores[first].name,
                    also = %before.name,
                    "ambiguous match: multiple old declarations share a partial \
                     fingerprint; first binding wins"
                );
                continue;
            }
            buckets.insert(fp, i);
        }

        for (j, after) in afters.iter().enumerate() {
            if after_explained[j] {
                continue;
            }
            let fp = fingerprint(after, excluded);
            let Some(&i) = buckets.get(&fp) else {
                continue;
            };
            if before_explained[i] {
                warn!(
                    hypothesis = ?excluded,
                    before = %befores[i].name,
                    after = %after.name,
                    "ambiguous match: old declaration already claimed under this \
                     hypothesis; skipping"
                );
                continue;
            }
            diffs.extend(implied_diffs(excluded, befores[i], after));
            before_explained[i] = true;
            after_explained[j] = true;
        }
    }

    for (j, after) in afters.iter().enumerate() {
        if !after_explained[j] {
            diffs.push(Diff::Added {
                name: after.name.clone(),
                module: after.module.clone(),
            });
        }
    }
    for (i, before) in befores.iter().enumerate() {
        if !before_explained[i] {
            diffs.push(Diff::Removed {
                name: before.name.clone(),
                module: before.module.clone(),
            });
        }
    }
    diffs
}
