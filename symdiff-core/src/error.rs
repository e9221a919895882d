//! Error types for symdiff-core.

use thiserror::Error;

/// Result type alias for snapshot loading operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors raised while loading a snapshot artifact.
///
/// The diff engine itself has no failure modes; every error in this crate
/// comes from the loading boundary.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Artifact format version is not the supported one.
    #[error("unsupported snapshot format version {found} (expected {expected})")]
    VersionMismatch {
        /// Version found in the artifact.
        found: u32,
        /// Version this build of symdiff supports.
        expected: u32,
    },

    /// Two declarations in one artifact share a name.
    #[error("duplicate declaration name in snapshot: {name}")]
    DuplicateName {
        /// The offending name.
        name: String,
    },

    /// An import list references a module missing from the module list.
    #[error("module {module} imports unknown module {import}")]
    UnknownImport {
        /// Module whose import list is invalid.
        module: String,
        /// The unknown imported module.
        import: String,
    },

    /// IO error reading the artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact is not valid JSON or does not match the schema.
    #[error("malformed snapshot artifact: {0}")]
    Malformed(#[from] serde_json::Error),
}
