//! Deterministic grouped rendering of a diff list.

use std::fmt::Write;

use crate::differ::changes::Diff;
use crate::types::Name;

/// Sort diffs into their fixed reporting order: case priority first, then
/// owning module, then the rendered line as a final tie-break. Identical
/// diff sets always end up in identical order.
pub fn sort_diffs(diffs: &mut [Diff]) {
    diffs.sort_by_cached_key(|d| (d.priority(), d.module().cloned(), d.render()));
}

/// Render a sorted diff list as grouped text.
///
/// Consecutive entries sharing a module are grouped under one header; diffs
/// with no module of their own are grouped under a fixed placeholder. Ends
/// with the total count.
pub fn render_summary(diffs: &[Diff]) -> String {
    let mut out = String::new();
    let mut current: Option<Option<&Name>> = None;

    for diff in diffs {
        let module = diff.module();
        if current != Some(module) {
            match module {
                Some(m) => {
                    let _ = writeln!(out, "-- {}", m);
                }
                None => out.push_str("-- (no module)\n"),
            }
            current = Some(module);
        }
        let _ = writeln!(out, "  {}", diff.render());
    }

    let n = diffs.len();
    let _ = writeln!(out, "{} change{}", n, if n == 1 { "" } else { "s" });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_diffs() -> Vec<Diff> {
        vec![
            Diff::DocChanged {
                name: Name::new("foo"),
            },
            Diff::Added {
                name: Name::new("zeta"),
                module: Name::new("M2"),
            },
            Diff::Added {
                name: Name::new("alpha"),
                module: Name::new("M1"),
            },
            Diff::Removed {
                name: Name::new("gone"),
                module: Name::new("M1"),
            },
        ]
    }

    #[test]
    fn test_sort_by_priority_then_module() {
        let mut diffs = sample_diffs();
        sort_diffs(&mut diffs);
        let lines: Vec<String> = diffs.iter().map(|d| d.render()).collect();
        assert_eq!(
            lines,
            vec![
                "added alpha",
                "added zeta",
                "removed gone",
                "doc modified for foo",
            ]
        );
    }

    #[test]
    fn test_render_groups_consecutive_modules() {
        let mut diffs = sample_diffs();
        sort_diffs(&mut diffs);
        let text = render_summary(&diffs);
        assert_eq!(
            text,
            "-- M1\n  added alpha\n-- M2\n  added zeta\n-- M1\n  removed gone\n\
             -- (no module)\n  doc modified for foo\n4 changes\n"
        );
    }

    #[test]
    fn test_render_is_deterministic_across_input_orders() {
        let mut a = sample_diffs();
        let mut b = sample_diffs();
        b.reverse();
        sort_diffs(&mut a);
        sort_diffs(&mut b);
        assert_eq!(render_summary(&a), render_summary(&b));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_summary(&[]), "0 changes\n");
    }

    #[test]
    fn test_singular_count() {
        let mut diffs = vec![Diff::Added {
            name: Name::new("foo"),
            module: Name::new("M"),
        }];
        sort_diffs(&mut diffs);
        let text = render_summary(&diffs);
        assert!(text.ends_with("1 change\n"));
    }
}
