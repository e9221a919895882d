//! Semantic diff pipeline.
//!
//! Data flow over two immutable snapshots:
//!
//! ```text
//! unchanged filter -> match engine -> (rename extraction)
//!                                      |-> import differ
//!                                      |-> extension adapters
//!                  -> minimizer -> summarizer ordering
//! ```
//!
//! The pipeline is synchronous and CPU-bound; it performs no I/O and holds
//! no state beyond its inputs, so independent snapshot pairs can be diffed
//! concurrently without coordination.

pub mod changes;
pub mod filter;
pub mod imports;
pub mod matcher;
pub mod minimize;
pub mod summary;

pub use changes::Diff;
pub use minimize::RenameMap;

use tracing::debug;

use crate::extensions::{default_adapters, ExtensionAdapter};
use crate::internal::{HeuristicClassifier, InternalNameClassifier};
use crate::types::{ExtensionState, Snapshot};

/// Options controlling a diff run.
pub struct DiffOptions {
    /// Include auto-generated declarations in matching and metadata diffs.
    pub include_internal: bool,
    /// Classifier deciding which names count as auto-generated.
    pub classifier: Box<dyn InternalNameClassifier>,
    /// Metadata adapters to run, in registry order.
    pub adapters: Vec<Box<dyn ExtensionAdapter>>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            include_internal: false,
            classifier: Box::new(HeuristicClassifier::new()),
            adapters: default_adapters(),
        }
    }
}

/// Compute the full semantic diff between two snapshots.
///
/// The returned list is minimized and in final reporting order; use
/// [`summary::render_summary`] to turn it into grouped text. Always
/// terminates with a (possibly empty) list for well-formed snapshots.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot, options: &DiffOptions) -> Vec<Diff> {
    let changed = filter::changed_subset(
        old,
        new,
        options.include_internal,
        options.classifier.as_ref(),
    );
    debug!(
        befores = changed.befores.len(),
        afters = changed.afters.len(),
        "unchanged filter reduced the matching problem"
    );

    let mut diffs = matcher::match_changed(&changed.befores, &changed.afters);
    let renames = RenameMap::from_diffs(&diffs);
    debug!(count = diffs.len(), renames = renames.len(), "matching done");

    diffs.extend(imports::diff_imports(old, new, &renames));

    let empty = ExtensionState::new();
    for adapter in &options.adapters {
        let old_state = old.extension(adapter.key()).unwrap_or(&empty);
        let new_state = new.extension(adapter.key()).unwrap_or(&empty);
        diffs.extend(adapter.diff(
            old_state,
            new_state,
            &renames,
            options.include_internal,
            options.classifier.as_ref(),
        ));
    }

    let mut diffs = minimize::minimize(diffs);
    summary::sort_diffs(&mut diffs);
    diffs
}
