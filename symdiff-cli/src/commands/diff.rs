//! Diff command - semantic diff between two snapshot artifacts.

use anyhow::Context;
use colored::Colorize;

use symdiff_core::differ::{diff_snapshots, summary, Diff, DiffOptions};
use symdiff_core::internal::HeuristicClassifier;
use symdiff_core::loader::{JsonSnapshotProvider, SnapshotProvider};

use crate::config::SymdiffConfig;
use crate::output::OutputFormat;

/// Run the diff command.
///
/// Exit status is non-zero only when a snapshot fails to load; an empty diff
/// is still a success.
pub fn run(
    old_spec: &str,
    new_spec: &str,
    include_internal: bool,
    config: &SymdiffConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let provider = JsonSnapshotProvider::new();
    let old = provider
        .load(old_spec)
        .with_context(|| format!("failed to load snapshot {}", old_spec))?;
    let new = provider
        .load(new_spec)
        .with_context(|| format!("failed to load snapshot {}", new_spec))?;

    let classifier = HeuristicClassifier::with_patterns(config.internal_patterns())
        .context("invalid internal-name pattern in configuration")?;

    let options = DiffOptions {
        include_internal: include_internal || config.include_internal(),
        classifier: Box::new(classifier),
        ..DiffOptions::default()
    };

    let diffs = diff_snapshots(&old, &new, &options);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diffs)?),
        OutputFormat::Table => print!("{}", render_table(&diffs, old_spec, new_spec)),
    }

    Ok(())
}

fn render_table(diffs: &[Diff], old_spec: &str, new_spec: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} -> {}\n\n",
        "DIFF:".cyan().bold(),
        old_spec.yellow(),
        new_spec.green()
    ));

    if diffs.is_empty() {
        out.push_str(&format!("{}\n", "No semantic changes detected.".dimmed()));
    }
    out.push_str(&summary::render_summary(diffs));
    out
}
