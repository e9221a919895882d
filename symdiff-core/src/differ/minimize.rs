//! Diff minimization and rename extraction.

use std::collections::{HashMap, HashSet};

use crate::differ::changes::Diff;
use crate::types::Name;

/// Bidirectional old/new name translation built from rename diffs.
///
/// Absence from the map means the name did not change. Used to correlate a
/// symbol across snapshots despite a rename when diffing metadata stores and
/// imports.
#[derive(Debug, Default)]
pub struct RenameMap {
    forward: HashMap<Name, Name>,
    reverse: HashMap<Name, Name>,
}

impl RenameMap {
    /// Collect renames out of a diff list.
    pub fn from_diffs(diffs: &[Diff]) -> Self {
        let mut map = RenameMap::default();
        for diff in diffs {
            if let Diff::Renamed { from, to, .. } = diff {
                map.forward.insert(from.clone(), to.clone());
                map.reverse.insert(to.clone(), from.clone());
            }
        }
        map
    }

    /// New-side name for an old-side name.
    pub fn new_name<'a>(&'a self, old: &'a Name) -> &'a Name {
        self.forward.get(old).unwrap_or(old)
    }

    /// Old-side name for a new-side name.
    pub fn old_name<'a>(&'a self, new: &'a Name) -> &'a Name {
        self.reverse.get(new).unwrap_or(new)
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }
}

/// Drop diffs implied by a coarser diff already present.
///
/// A removed declaration implies the loss of its documentation and
/// attributes; reporting those separately is noise. This is the only
/// minimization rule; module-removal and added-declaration suppression are
/// deliberate extension points.
pub fn minimize(diffs: Vec<Diff>) -> Vec<Diff> {
    let removed: HashSet<Name> = diffs
        .iter()
        .filter_map(|d| match d {
            Diff::Removed { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect();
    if removed.is_empty() {
        return diffs;
    }

    diffs
        .into_iter()
        .filter(|d| match d {
            Diff::DocRemoved { name } => !removed.contains(name),
            Diff::AttributeRemoved { name, .. } => !removed.contains(name),
            _ => true,
        })
        .collect()
}
