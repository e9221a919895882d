//! Show command - summarize a single snapshot artifact.

use std::collections::BTreeMap;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use symdiff_core::loader::{JsonSnapshotProvider, SnapshotProvider};
use symdiff_core::types::Snapshot;

use crate::output::OutputFormat;

/// Counts describing one snapshot.
#[derive(Debug, Serialize)]
pub struct SnapshotSummary {
    pub path: String,
    pub modules: usize,
    pub declarations: usize,
    pub declarations_by_kind: BTreeMap<String, usize>,
    pub extensions: Vec<String>,
}

impl SnapshotSummary {
    fn new(path: &str, snapshot: &Snapshot) -> Self {
        let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for decl in snapshot.decls.values() {
            *by_kind.entry(decl.kind.as_str().to_string()).or_default() += 1;
        }
        Self {
            path: path.to_string(),
            modules: snapshot.modules.len(),
            declarations: snapshot.decls.len(),
            declarations_by_kind: by_kind,
            extensions: snapshot.extensions.keys().cloned().collect(),
        }
    }
}

/// Run the show command.
pub fn run(spec: &str, format: OutputFormat) -> anyhow::Result<()> {
    let snapshot = JsonSnapshotProvider::new()
        .load(spec)
        .with_context(|| format!("failed to load snapshot {}", spec))?;
    let summary = SnapshotSummary::new(spec, &snapshot);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print!("{}", render_table(&summary)),
    }

    Ok(())
}

fn render_table(summary: &SnapshotSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        "SNAPSHOT:".cyan().bold(),
        summary.path
    ));
    out.push_str(&format!("  {:<14} {}\n", "modules:", summary.modules));
    out.push_str(&format!(
        "  {:<14} {}\n",
        "declarations:",
        summary.declarations
    ));
    for (kind, count) in &summary.declarations_by_kind {
        out.push_str(&format!("    {:<12} {}\n", kind, count));
    }
    if !summary.extensions.is_empty() {
        out.push_str(&format!(
            "  {:<14} {}\n",
            "extensions:",
            summary.extensions.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdiff_core::types::{DeclKind, Declaration, Name, Term};

    #[test]
    fn test_summary_counts() {
        let mut snapshot = Snapshot::new();
        snapshot.modules = vec![Name::new("M")];
        snapshot.insert(Declaration::new(
            "foo",
            DeclKind::Definition,
            Term::const_ref("Nat"),
            Some(Term::nat(1)),
            "M",
        ));
        snapshot.insert(Declaration::new(
            "thm",
            DeclKind::Theorem,
            Term::const_ref("True"),
            Some(Term::nat(0)),
            "M",
        ));
        snapshot
            .extensions
            .entry("doc".to_string())
            .or_default()
            .insert(Name::new("foo"), "docs".to_string());

        let summary = SnapshotSummary::new("snap.json", &snapshot);
        assert_eq!(summary.modules, 1);
        assert_eq!(summary.declarations, 2);
        assert_eq!(summary.declarations_by_kind["definition"], 1);
        assert_eq!(summary.declarations_by_kind["theorem"], 1);
        assert_eq!(summary.extensions, vec!["doc".to_string()]);

        colored::control::set_override(false);
        let table = render_table(&summary);
        assert!(table.contains("snap.json"));
        assert!(table.contains("declarations:"));
        assert!(table.contains("doc"));
    }
}
