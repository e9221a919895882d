//! SymDiff core — semantic diffing of compiled symbol-database snapshots.
//!
//! Given two fully-loaded snapshots of a build (declarations, module and
//! import structure, metadata stores), this crate reports what changed
//! between them as a list of semantic diffs: additions, removals, renames,
//! moves between modules, type/value changes, kind changes, metadata changes
//! and import-graph changes.
//!
//! The engine correlates removed and added declarations into single semantic
//! changes with a trait-based fingerprinting scheme: declarations are hashed
//! over subsets of their traits (name, type, value, kind, module), and
//! trait-exclusion hypotheses are tried smallest-first so the most precise
//! diagnosis wins. Hash equality stands in for pairwise structural
//! comparison, keeping the whole diff near-linear over tens of thousands of
//! declarations.
//!
//! # Example
//!
//! ```rust
//! use symdiff_core::differ::{diff_snapshots, DiffOptions};
//! use symdiff_core::types::Snapshot;
//!
//! let old = Snapshot::new();
//! let new = Snapshot::new();
//! let diffs = diff_snapshots(&old, &new, &DiffOptions::default());
//! assert!(diffs.is_empty());
//! ```

pub mod differ;
pub mod error;
pub mod extensions;
pub mod fingerprint;
pub mod internal;
pub mod loader;
pub mod types;

pub use differ::{diff_snapshots, Diff, DiffOptions, RenameMap};
pub use error::SnapshotError;
pub use types::{DeclKind, Declaration, Name, Snapshot, Term};
