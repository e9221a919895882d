//! Trait registry and fingerprint engine.
//!
//! A fingerprint is a 64-bit digest over a chosen subset of declaration
//! traits. Two declarations that agree on every trait outside an exclusion
//! set produce the same fingerprint under that set, which is what lets the
//! match engine use hash equality as a similarity oracle instead of pairwise
//! structural comparison.

use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::{xxh3_64, Xxh3};

use crate::types::{Declaration, Term};

/// A fingerprintable declaration attribute.
///
/// The registry is closed: each trait is a typed accessor on `Declaration`,
/// not a runtime-extensible plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclTrait {
    Name,
    Type,
    Value,
    Kind,
    Module,
}

/// All traits, in the fixed order they are mixed into a fingerprint.
pub const TRAIT_REGISTRY: [DeclTrait; 5] = [
    DeclTrait::Name,
    DeclTrait::Type,
    DeclTrait::Value,
    DeclTrait::Kind,
    DeclTrait::Module,
];

/// Non-zero starting state, so an empty included set still yields a
/// well-defined digest distinct from zero.
const FINGERPRINT_SEED: u64 = 0x5ccd_1db9_b7a7_64d1;

impl DeclTrait {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclTrait::Name => "name",
            DeclTrait::Type => "type",
            DeclTrait::Value => "value",
            DeclTrait::Kind => "kind",
            DeclTrait::Module => "module",
        }
    }

    /// Hash of this trait's value on `decl`.
    fn hash_value(self, decl: &Declaration) -> u64 {
        match self {
            DeclTrait::Name => xxh3_64(decl.name.as_str().as_bytes()),
            DeclTrait::Type => hash_term(&decl.ty),
            DeclTrait::Value => match &decl.value {
                Some(value) => hash_term(value),
                None => xxh3_64(b"<no value>"),
            },
            DeclTrait::Kind => xxh3_64(&[decl.kind as u8]),
            DeclTrait::Module => xxh3_64(decl.module.as_str().as_bytes()),
        }
    }
}

fn hash_term(term: &Term) -> u64 {
    let mut hasher = Xxh3::new();
    term.hash(&mut hasher);
    hasher.finish()
}

/// Order-preserving combination of one trait hash into the accumulator.
fn mix(acc: u64, h: u64) -> u64 {
    (acc.rotate_left(13) ^ h).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Compute the fingerprint of `decl` with the given traits excluded.
///
/// Deterministic and total. Traits are combined in registry order no matter
/// which are excluded, so two calls with the same exclusion set and equal
/// included-trait values always agree.
pub fn fingerprint(decl: &Declaration, excluded: &[DeclTrait]) -> u64 {
    let mut acc = FINGERPRINT_SEED;
    for t in TRAIT_REGISTRY {
        if !excluded.contains(&t) {
            acc = mix(acc, t.hash_value(decl));
        }
    }
    acc
}

/// Fingerprint with every trait included.
pub fn full_fingerprint(decl: &Declaration) -> u64 {
    fingerprint(decl, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclKind, Term};

    fn decl(name: &str, value: u64, module: &str) -> Declaration {
        Declaration::new(
            name,
            DeclKind::Definition,
            Term::const_ref("Nat"),
            Some(Term::nat(value)),
            module,
        )
    }

    #[test]
    fn test_full_fingerprint_deterministic() {
        let a = decl("foo", 1, "M");
        let b = decl("foo", 1, "M");
        assert_eq!(full_fingerprint(&a), full_fingerprint(&b));
    }

    #[test]
    fn test_full_fingerprint_sensitive_to_each_trait() {
        let base = decl("foo", 1, "M");
        assert_ne!(full_fingerprint(&base), full_fingerprint(&decl("bar", 1, "M")));
        assert_ne!(full_fingerprint(&base), full_fingerprint(&decl("foo", 2, "M")));
        assert_ne!(full_fingerprint(&base), full_fingerprint(&decl("foo", 1, "N")));

        let mut theorem = decl("foo", 1, "M");
        theorem.kind = DeclKind::Theorem;
        assert_ne!(full_fingerprint(&base), full_fingerprint(&theorem));

        let mut retyped = decl("foo", 1, "M");
        retyped.ty = Term::const_ref("Int");
        assert_ne!(full_fingerprint(&base), full_fingerprint(&retyped));
    }

    #[test]
    fn test_excluded_trait_does_not_affect_fingerprint() {
        // Equal outside the exclusion set, different inside it.
        let a = decl("foo", 1, "M");
        let b = decl("bar", 1, "M");
        assert_eq!(
            fingerprint(&a, &[DeclTrait::Name]),
            fingerprint(&b, &[DeclTrait::Name])
        );

        let c = decl("foo", 1, "M");
        let d = decl("qux", 2, "M");
        assert_eq!(
            fingerprint(&c, &[DeclTrait::Name, DeclTrait::Value]),
            fingerprint(&d, &[DeclTrait::Name, DeclTrait::Value])
        );
    }

    #[test]
    fn test_included_trait_still_distinguishes() {
        // Name excluded, but values differ: fingerprints must differ.
        let a = decl("foo", 1, "M");
        let b = decl("bar", 2, "M");
        assert_ne!(
            fingerprint(&a, &[DeclTrait::Name]),
            fingerprint(&b, &[DeclTrait::Name])
        );
    }

    #[test]
    fn test_missing_value_hashes_consistently() {
        let mut a = decl("ax", 0, "M");
        a.kind = DeclKind::Axiom;
        a.value = None;
        let mut b = a.clone();
        assert_eq!(full_fingerprint(&a), full_fingerprint(&b));

        b.value = Some(Term::nat(0));
        assert_ne!(full_fingerprint(&a), full_fingerprint(&b));
    }
}
