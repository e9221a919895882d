//! The closed set of semantic diff cases.
//!
//! Every case carries enough identifiers to render and to group. Adding a
//! case means extending [`Diff::priority`], [`Diff::module`] and
//! [`Diff::render`] — all exhaustive matches, so the compiler enforces the
//! update.

use serde::{Deserialize, Serialize};

use crate::types::{DeclKind, Name};

/// A single semantic change between two snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diff {
    /// Declaration present only in the new snapshot.
    Added { name: Name, module: Name },
    /// Declaration present only in the old snapshot.
    Removed { name: Name, module: Name },
    /// Same declaration under a new name; `namespace_only` when the final
    /// component survived and only the prefix moved.
    Renamed {
        from: Name,
        to: Name,
        namespace_only: bool,
        module: Name,
    },
    /// Declaration moved to a different module.
    MovedToModule {
        name: Name,
        from_module: Name,
        to_module: Name,
    },
    /// Declaration moved position inside its module.
    MovedWithinModule { name: Name, module: Name },
    /// Body changed; `is_proof_relevant` is false for theorems, whose bodies
    /// do not participate in reduction.
    ProofChanged {
        name: Name,
        module: Name,
        is_proof_relevant: bool,
    },
    /// Type changed.
    TypeChanged { name: Name, module: Name },
    /// Declaration kind changed (e.g. definition became theorem).
    SpeciesChanged {
        name: Name,
        from: DeclKind,
        to: DeclKind,
        module: Name,
    },
    ModuleAdded { module: Name },
    ModuleRemoved { module: Name },
    ModuleRenamed { from: Name, to: Name },
    DocAdded { name: Name },
    DocRemoved { name: Name },
    DocChanged { name: Name },
    AttributeAdded { attr: String, name: Name },
    AttributeRemoved { attr: String, name: Name },
    AttributeChanged { attr: String, name: Name },
    DirectImportAdded { module: Name, import: Name },
    DirectImportRemoved { module: Name, import: Name },
    TransitiveImportAdded { module: Name, import: Name },
    TransitiveImportRemoved { module: Name, import: Name },
}

impl Diff {
    /// Fixed reporting priority; lower is reported first.
    pub fn priority(&self) -> u8 {
        match self {
            Diff::Added { .. } => 1,
            Diff::Removed { .. } => 2,
            Diff::Renamed { .. } => 3,
            Diff::MovedToModule { .. } => 4,
            Diff::MovedWithinModule { .. } => 5,
            Diff::ProofChanged { .. } => 6,
            Diff::TypeChanged { .. } => 7,
            Diff::SpeciesChanged { .. } => 8,
            Diff::ModuleAdded { .. } => 9,
            Diff::ModuleRemoved { .. } => 10,
            Diff::ModuleRenamed { .. } => 11,
            Diff::DocAdded { .. } => 12,
            Diff::DocRemoved { .. } => 13,
            Diff::DocChanged { .. } => 14,
            Diff::AttributeAdded { .. } => 15,
            Diff::AttributeRemoved { .. } => 16,
            Diff::AttributeChanged { .. } => 17,
            Diff::DirectImportAdded { .. } => 18,
            Diff::DirectImportRemoved { .. } => 19,
            Diff::TransitiveImportAdded { .. } => 20,
            Diff::TransitiveImportRemoved { .. } => 21,
        }
    }

    /// Module this diff is grouped under; `None` for extension-only diffs,
    /// which carry no module of their own.
    pub fn module(&self) -> Option<&Name> {
        match self {
            Diff::Added { module, .. } => Some(module),
            Diff::Removed { module, .. } => Some(module),
            Diff::Renamed { module, .. } => Some(module),
            Diff::MovedToModule { to_module, .. } => Some(to_module),
            Diff::MovedWithinModule { module, .. } => Some(module),
            Diff::ProofChanged { module, .. } => Some(module),
            Diff::TypeChanged { module, .. } => Some(module),
            Diff::SpeciesChanged { module, .. } => Some(module),
            Diff::ModuleAdded { module } => Some(module),
            Diff::ModuleRemoved { module } => Some(module),
            Diff::ModuleRenamed { to, .. } => Some(to),
            Diff::DocAdded { .. } => None,
            Diff::DocRemoved { .. } => None,
            Diff::DocChanged { .. } => None,
            Diff::AttributeAdded { .. } => None,
            Diff::AttributeRemoved { .. } => None,
            Diff::AttributeChanged { .. } => None,
            Diff::DirectImportAdded { module, .. } => Some(module),
            Diff::DirectImportRemoved { module, .. } => Some(module),
            Diff::TransitiveImportAdded { module, .. } => Some(module),
            Diff::TransitiveImportRemoved { module, .. } => Some(module),
        }
    }

    /// One fixed-template line for this diff.
    pub fn render(&self) -> String {
        match self {
            Diff::Added { name, .. } => format!("added {}", name),
            Diff::Removed { name, .. } => format!("removed {}", name),
            Diff::Renamed {
                from,
                to,
                namespace_only,
                ..
            } => {
                if *namespace_only {
                    format!("renamed {} -> {} (namespace only)", from, to)
                } else {
                    format!("renamed {} -> {}", from, to)
                }
            }
            Diff::MovedToModule {
                name,
                from_module,
                to_module,
            } => format!("moved {} from {} to {}", name, from_module, to_module),
            Diff::MovedWithinModule { name, .. } => format!("moved {} within its module", name),
            Diff::ProofChanged {
                name,
                is_proof_relevant,
                ..
            } => {
                if *is_proof_relevant {
                    format!("value changed for {}", name)
                } else {
                    format!("proof changed for {}", name)
                }
            }
            Diff::TypeChanged { name, .. } => format!("type changed for {}", name),
            Diff::SpeciesChanged {
                name, from, to, ..
            } => format!("{} changed from {} to {}", name, from.as_str(), to.as_str()),
            Diff::ModuleAdded { module } => format!("added module {}", module),
            Diff::ModuleRemoved { module } => format!("removed module {}", module),
            Diff::ModuleRenamed { from, to } => format!("renamed module {} -> {}", from, to),
            Diff::DocAdded { name } => format!("doc added to {}", name),
            Diff::DocRemoved { name } => format!("doc removed from {}", name),
            Diff::DocChanged { name } => format!("doc modified for {}", name),
            Diff::AttributeAdded { attr, name } => {
                format!("attribute {} added to {}", attr, name)
            }
            Diff::AttributeRemoved { attr, name } => {
                format!("attribute {} removed from {}", attr, name)
            }
            Diff::AttributeChanged { attr, name } => {
                format!("attribute {} changed for {}", attr, name)
            }
            Diff::DirectImportAdded { module, import } => {
                format!("{} now imports {}", module, import)
            }
            Diff::DirectImportRemoved { module, import } => {
                format!("{} no longer imports {}", module, import)
            }
            Diff::TransitiveImportAdded { module, import } => {
                format!("{} now transitively imports {}", module, import)
            }
            Diff::TransitiveImportRemoved { module, import } => {
                format!("{} no longer transitively imports {}", module, import)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_templates() {
        let diff = Diff::Renamed {
            from: Name::new("foo"),
            to: Name::new("bar"),
            namespace_only: false,
            module: Name::new("M"),
        };
        assert_eq!(diff.render(), "renamed foo -> bar");

        let diff = Diff::Renamed {
            from: Name::new("A.foo"),
            to: Name::new("B.foo"),
            namespace_only: true,
            module: Name::new("M"),
        };
        assert_eq!(diff.render(), "renamed A.foo -> B.foo (namespace only)");

        let diff = Diff::ProofChanged {
            name: Name::new("thm"),
            module: Name::new("M"),
            is_proof_relevant: false,
        };
        assert_eq!(diff.render(), "proof changed for thm");

        let diff = Diff::SpeciesChanged {
            name: Name::new("foo"),
            from: DeclKind::Definition,
            to: DeclKind::Theorem,
            module: Name::new("M"),
        };
        assert_eq!(diff.render(), "foo changed from definition to theorem");
    }

    #[test]
    fn test_priority_orders_declaration_diffs_before_metadata() {
        let added = Diff::Added {
            name: Name::new("foo"),
            module: Name::new("M"),
        };
        let doc = Diff::DocAdded {
            name: Name::new("foo"),
        };
        let import = Diff::DirectImportAdded {
            module: Name::new("M"),
            import: Name::new("N"),
        };
        assert!(added.priority() < doc.priority());
        assert!(doc.priority() < import.priority());
    }

    #[test]
    fn test_extension_diffs_have_no_module() {
        assert!(Diff::DocChanged {
            name: Name::new("foo")
        }
        .module()
        .is_none());
        assert!(Diff::AttributeAdded {
            attr: "simp".to_string(),
            name: Name::new("foo")
        }
        .module()
        .is_none());
    }

    #[test]
    fn test_diff_serde() {
        let diff = Diff::Added {
            name: Name::new("foo"),
            module: Name::new("M"),
        };
        let json = serde_json::to_string(&diff).unwrap();
        assert!(json.contains("\"kind\":\"added\""));
        let back: Diff = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diff);
    }
}
