//! Data model for symbol-database snapshots.
//!
//! These types represent one fully-loaded build snapshot: the set of named
//! declarations, the ordered module list with per-module direct imports, and
//! the named metadata stores (doc strings, attribute sets, ...) attached to
//! the build. Everything here is immutable once loaded; the diff engine only
//! ever reads two snapshots side by side.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A dot-separated, path-like declaration or module identifier.
///
/// Names are unique within one snapshot.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(s: impl Into<String>) -> Self {
        Name(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final component of the name, e.g. `map` for `List.map`.
    pub fn last_component(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the final component; empty for top-level names.
    pub fn namespace(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Iterate the dot-separated components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name(s.to_string())
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name(s)
    }
}

/// Syntactic category of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Axiom,
    Definition,
    Theorem,
    Opaque,
    QuotientOp,
    Inductive,
    Constructor,
    Recursor,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Axiom => "axiom",
            DeclKind::Definition => "definition",
            DeclKind::Theorem => "theorem",
            DeclKind::Opaque => "opaque",
            DeclKind::QuotientOp => "quotient operation",
            DeclKind::Inductive => "inductive",
            DeclKind::Constructor => "constructor",
            DeclKind::Recursor => "recursor",
        }
    }
}

/// An opaque type or value expression.
///
/// The engine only ever hashes and compares terms; it never interprets them.
/// The variants below are the minimal closed shape the artifact format
/// carries. Pretty-printing is out of scope for this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// Bound variable by de Bruijn index.
    Var(u32),
    /// Sort at the given universe level.
    Sort(u32),
    /// Reference to a named constant.
    Const(Name),
    /// Application of a function term to an argument term.
    App(Box<Term>, Box<Term>),
    /// Anonymous function: binder type and body.
    Lambda(Box<Term>, Box<Term>),
    /// Dependent function type: binder type and body.
    Pi(Box<Term>, Box<Term>),
    /// Literal scalar carried verbatim.
    Lit(String),
}

impl Term {
    /// Reference to a named constant.
    pub fn const_ref(name: impl Into<Name>) -> Self {
        Term::Const(name.into())
    }

    /// Application node.
    pub fn app(f: Term, arg: Term) -> Self {
        Term::App(Box::new(f), Box::new(arg))
    }

    /// Numeric literal.
    pub fn nat(n: u64) -> Self {
        Term::Lit(n.to_string())
    }
}

/// A single named entity in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: Name,
    pub kind: DeclKind,
    /// Type of the declaration.
    pub ty: Term,
    /// Body of the declaration; axioms and inductive families carry none.
    pub value: Option<Term>,
    /// Module the declaration lives in.
    pub module: Name,
}

impl Declaration {
    pub fn new(
        name: impl Into<Name>,
        kind: DeclKind,
        ty: Term,
        value: Option<Term>,
        module: impl Into<Name>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            value,
            module: module.into(),
        }
    }
}

/// One named metadata store: declaration name to payload.
///
/// The payload encoding is owned by the adapter registered for the store's
/// key (doc text, attribute tag, reducibility setting, ...).
pub type ExtensionState = BTreeMap<Name, String>;

/// One immutable, fully-loaded build snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All declarations, keyed by their unique name.
    pub decls: HashMap<Name, Declaration>,
    /// Module list in artifact order.
    pub modules: Vec<Name>,
    /// Direct imports per module.
    pub imports: HashMap<Name, Vec<Name>>,
    /// Named metadata stores.
    pub extensions: BTreeMap<String, ExtensionState>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, replacing any previous one with the same name.
    pub fn insert(&mut self, decl: Declaration) {
        self.decls.insert(decl.name.clone(), decl);
    }

    pub fn decl(&self, name: &Name) -> Option<&Declaration> {
        self.decls.get(name)
    }

    /// State of the metadata store registered under `key`, if present.
    pub fn extension(&self, key: &str) -> Option<&ExtensionState> {
        self.extensions.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_components() {
        let name = Name::new("List.map");
        assert_eq!(name.last_component(), "map");
        assert_eq!(name.namespace(), "List");
        assert_eq!(name.components().collect::<Vec<_>>(), vec!["List", "map"]);
    }

    #[test]
    fn test_name_top_level() {
        let name = Name::new("foo");
        assert_eq!(name.last_component(), "foo");
        assert_eq!(name.namespace(), "");
    }

    #[test]
    fn test_name_serde_transparent() {
        let name = Name::new("List.map");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"List.map\"");
        let back: Name = serde_json::from_str("\"List.map\"").unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_term_builders() {
        let t = Term::app(Term::const_ref("Nat.succ"), Term::nat(1));
        match t {
            Term::App(f, arg) => {
                assert_eq!(*f, Term::Const(Name::new("Nat.succ")));
                assert_eq!(*arg, Term::Lit("1".to_string()));
            }
            other => panic!("unexpected term: {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_insert_replaces() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(Declaration::new(
            "foo",
            DeclKind::Definition,
            Term::const_ref("Nat"),
            Some(Term::nat(1)),
            "M",
        ));
        snapshot.insert(Declaration::new(
            "foo",
            DeclKind::Definition,
            Term::const_ref("Nat"),
            Some(Term::nat(2)),
            "M",
        ));
        assert_eq!(snapshot.decls.len(), 1);
        let decl = snapshot.decl(&Name::new("foo")).unwrap();
        assert_eq!(decl.value, Some(Term::nat(2)));
    }
}
