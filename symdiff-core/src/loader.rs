//! Snapshot artifact loading.
//!
//! A snapshot artifact is a single JSON document produced by the build: a
//! format version, the module list, per-module direct imports, the
//! declarations, and the named extension stores. [`JsonSnapshotProvider`] is
//! the standard provider; anything that can produce a [`Snapshot`] can stand
//! in behind [`SnapshotProvider`] (tests build snapshots in memory).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{Result, SnapshotError};
use crate::types::{Declaration, ExtensionState, Name, Snapshot};

/// Artifact format version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// Supplies a fully loaded, immutable snapshot for a build specification.
///
/// Loading may fail (version/format mismatch, IO); the diff engine never
/// sees a partially-loaded snapshot.
pub trait SnapshotProvider {
    fn load(&self, spec: &str) -> Result<Snapshot>;
}

/// On-disk artifact schema.
#[derive(Debug, Serialize, Deserialize)]
struct Artifact {
    format_version: u32,
    #[serde(default)]
    modules: Vec<Name>,
    #[serde(default)]
    imports: HashMap<Name, Vec<Name>>,
    #[serde(default)]
    declarations: Vec<Declaration>,
    #[serde(default)]
    extensions: BTreeMap<String, ExtensionState>,
}

/// Loads snapshot artifacts from JSON files on disk.
#[derive(Debug, Default)]
pub struct JsonSnapshotProvider;

impl JsonSnapshotProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotProvider for JsonSnapshotProvider {
    fn load(&self, spec: &str) -> Result<Snapshot> {
        load_artifact(Path::new(spec))
    }
}

/// Read and validate a snapshot artifact from `path`.
pub fn load_artifact(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)?;
    parse_artifact(&raw)
}

/// Parse and validate a snapshot artifact from its JSON text.
pub fn parse_artifact(raw: &str) -> Result<Snapshot> {
    let artifact: Artifact = serde_json::from_str(raw)?;
    if artifact.format_version != FORMAT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: artifact.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let mut decls = HashMap::with_capacity(artifact.declarations.len());
    for decl in artifact.declarations {
        if decls.contains_key(&decl.name) {
            return Err(SnapshotError::DuplicateName {
                name: decl.name.to_string(),
            });
        }
        decls.insert(decl.name.clone(), decl);
    }

    let known: HashSet<&Name> = artifact.modules.iter().collect();
    for (module, imports) in &artifact.imports {
        for import in imports {
            if !known.contains(import) {
                return Err(SnapshotError::UnknownImport {
                    module: module.to_string(),
                    import: import.to_string(),
                });
            }
        }
    }

    Ok(Snapshot {
        decls,
        modules: artifact.modules,
        imports: artifact.imports,
        extensions: artifact.extensions,
    })
}

/// Serialize a snapshot back into artifact JSON.
///
/// Useful for producing fixtures and for tools that post-process snapshots.
pub fn to_artifact_json(snapshot: &Snapshot, pretty: bool) -> Result<String> {
    let mut declarations: Vec<&Declaration> = snapshot.decls.values().collect();
    declarations.sort_by(|a, b| a.name.cmp(&b.name));

    #[derive(Serialize)]
    struct ArtifactRef<'a> {
        format_version: u32,
        modules: &'a [Name],
        imports: &'a HashMap<Name, Vec<Name>>,
        declarations: Vec<&'a Declaration>,
        extensions: &'a BTreeMap<String, ExtensionState>,
    }

    let artifact = ArtifactRef {
        format_version: FORMAT_VERSION,
        modules: &snapshot.modules,
        imports: &snapshot.imports,
        declarations,
        extensions: &snapshot.extensions,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&artifact)
    } else {
        serde_json::to_string(&artifact)
    };
    Ok(json?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclKind, Term};

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.modules = vec![Name::new("M1"), Name::new("M2")];
        snapshot
            .imports
            .insert(Name::new("M2"), vec![Name::new("M1")]);
        snapshot.insert(Declaration::new(
            "foo",
            DeclKind::Definition,
            Term::const_ref("Nat"),
            Some(Term::nat(1)),
            "M1",
        ));
        snapshot
            .extensions
            .entry("doc".to_string())
            .or_default()
            .insert(Name::new("foo"), "the foo".to_string());
        snapshot
    }

    #[test]
    fn test_artifact_round_trip() {
        let snapshot = sample_snapshot();
        let json = to_artifact_json(&snapshot, true).unwrap();
        let back = parse_artifact(&json).unwrap();

        assert_eq!(back.modules, snapshot.modules);
        assert_eq!(back.imports, snapshot.imports);
        assert_eq!(back.extensions, snapshot.extensions);
        assert_eq!(
            back.decl(&Name::new("foo")),
            snapshot.decl(&Name::new("foo"))
        );
    }

    #[test]
    fn test_load_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, to_artifact_json(&sample_snapshot(), false).unwrap()).unwrap();

        let snapshot = load_artifact(&path).unwrap();
        assert_eq!(snapshot.decls.len(), 1);

        let missing = load_artifact(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(SnapshotError::Io(_))));
    }

    #[test]
    fn test_version_mismatch() {
        let raw = r#"{"format_version": 99}"#;
        match parse_artifact(raw) {
            Err(SnapshotError::VersionMismatch { found, expected }) => {
                assert_eq!(found, 99);
                assert_eq!(expected, FORMAT_VERSION);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let raw = r#"{
            "format_version": 1,
            "modules": ["M"],
            "declarations": [
                {"name": "foo", "kind": "definition", "ty": {"const": "Nat"},
                 "value": {"lit": "1"}, "module": "M"},
                {"name": "foo", "kind": "definition", "ty": {"const": "Nat"},
                 "value": {"lit": "2"}, "module": "M"}
            ]
        }"#;
        assert!(matches!(
            parse_artifact(raw),
            Err(SnapshotError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_unknown_import_rejected() {
        let raw = r#"{
            "format_version": 1,
            "modules": ["M1"],
            "imports": {"M1": ["Missing"]}
        }"#;
        assert!(matches!(
            parse_artifact(raw),
            Err(SnapshotError::UnknownImport { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            parse_artifact("{not json"),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
