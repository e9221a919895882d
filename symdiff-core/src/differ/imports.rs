//! Module-list and import-graph diffing.
//!
//! Works purely on the snapshots' module lists and per-module direct-import
//! adjacency. Transitive-import diffing would reuse the same set-difference
//! primitive over transitively-closed adjacency; it is not computed here.

use std::collections::HashSet;

use crate::differ::changes::Diff;
use crate::differ::minimize::RenameMap;
use crate::types::{Name, Snapshot};

/// Diff the module lists and each common module's direct imports.
///
/// Module names are translated through the rename map before comparison so
/// the differ stays correct if a snapshot pair ever correlates module
/// identities; for plain module names the translation is the identity.
pub fn diff_imports(old: &Snapshot, new: &Snapshot, renames: &RenameMap) -> Vec<Diff> {
    let mut diffs = Vec::new();

    let old_modules: HashSet<&Name> = old.modules.iter().map(|m| renames.new_name(m)).collect();
    let new_modules: HashSet<&Name> = new.modules.iter().collect();

    // Iterate the artifact-ordered lists, not the hash sets; the summarizer
    // re-sorts, but intermediate output stays deterministic for callers.
    for module in &new.modules {
        if !old_modules.contains(module) {
            diffs.push(Diff::ModuleAdded {
                module: module.clone(),
            });
        }
    }
    for module in &old.modules {
        if !new_modules.contains(renames.new_name(module)) {
            diffs.push(Diff::ModuleRemoved {
                module: module.clone(),
            });
        }
    }

    for module in &old.modules {
        let new_module = renames.new_name(module);
        if !new_modules.contains(new_module) {
            continue;
        }
        let old_imports: HashSet<&Name> = old
            .imports
            .get(module)
            .into_iter()
            .flatten()
            .map(|i| renames.new_name(i))
            .collect();
        let new_imports: HashSet<&Name> =
            new.imports.get(new_module).into_iter().flatten().collect();

        for import in new.imports.get(new_module).into_iter().flatten() {
            if !old_imports.contains(import) {
                diffs.push(Diff::DirectImportAdded {
                    module: new_module.clone(),
                    import: import.clone(),
                });
            }
        }
        for import in old.imports.get(module).into_iter().flatten() {
            if !new_imports.contains(renames.new_name(import)) {
                diffs.push(Diff::DirectImportRemoved {
                    module: new_module.clone(),
                    import: import.clone(),
                });
            }
        }
    }

    diffs
}
