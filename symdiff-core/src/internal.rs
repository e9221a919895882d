//! Internal-declaration name heuristics.
//!
//! Compiled symbol databases carry large numbers of auto-generated
//! declarations: equation lemmas, match functions, auxiliary definitions,
//! hygiene-scoped helpers. The default classifier recognizes these by name
//! shape so they can be excluded from matching and metadata diffing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Name;

/// Pluggable predicate deciding whether a declaration name is
/// system-generated rather than authored.
pub trait InternalNameClassifier {
    fn is_internal(&self, name: &Name) -> bool;
}

/// A single internal-name heuristic.
pub struct InternalPattern {
    pub name: &'static str,
    pub regex: &'static Lazy<Regex>,
}

// Define patterns as separate statics
static UNDERSCORE_COMPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\.)_").unwrap());
static EQUATION_LEMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.eq_(\d+|def)$").unwrap());
static MATCH_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.match_\d+$").unwrap());
static PROOF_HELPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.proof_\d+$").unwrap());
static HYGIENE_SCOPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_hyg\.\d+").unwrap());
static COMPILER_STAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\._cstage\d+$").unwrap());
static UNSAFE_UNFOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\._sunfold$").unwrap());

/// Default internal-name heuristics.
pub static DEFAULT_INTERNAL_PATTERNS: &[InternalPattern] = &[
    InternalPattern {
        name: "underscore_component",
        regex: &UNDERSCORE_COMPONENT,
    },
    InternalPattern {
        name: "equation_lemma",
        regex: &EQUATION_LEMMA,
    },
    InternalPattern {
        name: "match_function",
        regex: &MATCH_FUNCTION,
    },
    InternalPattern {
        name: "proof_helper",
        regex: &PROOF_HELPER,
    },
    InternalPattern {
        name: "hygiene_scope",
        regex: &HYGIENE_SCOPE,
    },
    InternalPattern {
        name: "compiler_stage",
        regex: &COMPILER_STAGE,
    },
    InternalPattern {
        name: "unsafe_unfold",
        regex: &UNSAFE_UNFOLD,
    },
];

/// Default classifier backed by [`DEFAULT_INTERNAL_PATTERNS`], optionally
/// extended with user-supplied patterns.
#[derive(Default)]
pub struct HeuristicClassifier {
    extra: Vec<Regex>,
}

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classifier with additional patterns on top of the defaults.
    pub fn with_patterns(patterns: &[String]) -> Result<Self, regex::Error> {
        let extra = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { extra })
    }
}

impl InternalNameClassifier for HeuristicClassifier {
    fn is_internal(&self, name: &Name) -> bool {
        DEFAULT_INTERNAL_PATTERNS
            .iter()
            .any(|p| p.regex.is_match(name.as_str()))
            || self.extra.iter().any(|r| r.is_match(name.as_str()))
    }
}
