use std::collections::BTreeMap;

use crate::model::{
    ChangeKind, ClickTarget, DiffStats, HighlightSet, ModifiedSpanPair, ReportEntry,
};

/// Collect flat highlight lists from a (possibly nested) report.
///
/// Spans are emitted in depth-first report order. Unchanged entries produce
/// no highlights.
pub fn flatten_report(report: &[ReportEntry]) -> HighlightSet {
    let mut highlights = HighlightSet::default();
    collect_highlights(report, &mut highlights);
    highlights
}

fn collect_highlights(report: &[ReportEntry], out: &mut HighlightSet) {
    for item in report {
        match item {
            ReportEntry::Unchanged { .. } => {}
            ReportEntry::Removed { entry } => out.removed_in_a.push(entry.span),
            ReportEntry::Added { entry } => out.added_in_b.push(entry.span),
            ReportEntry::Modified {
                entry,
                match_entry,
                sub_report,
            } => {
                out.modified.push(ModifiedSpanPair {
                    in_a: entry.span,
                    in_b: match_entry.span,
                });
                collect_highlights(sub_report, out);
            }
        }
    }
}

/// Build the display-id to click-target map for jump-to-change navigation.
pub fn build_click_index(report: &[ReportEntry]) -> BTreeMap<String, ClickTarget> {
    let mut index = BTreeMap::new();
    collect_click_targets(report, &mut index);
    index
}

fn collect_click_targets(report: &[ReportEntry], out: &mut BTreeMap<String, ClickTarget>) {
    for item in report {
        match item {
            ReportEntry::Unchanged { entry } => {
                out.insert(
                    entry.summary_id.clone(),
                    ClickTarget {
                        kind: ChangeKind::Unchanged,
                        key: entry.display_key.clone(),
                        span_a: Some(entry.span),
                        span_b: None,
                    },
                );
            }
            ReportEntry::Removed { entry } => {
                out.insert(
                    entry.summary_id.clone(),
                    ClickTarget {
                        kind: ChangeKind::Removed,
                        key: entry.display_key.clone(),
                        span_a: Some(entry.span),
                        span_b: None,
                    },
                );
            }
            ReportEntry::Added { entry } => {
                out.insert(
                    entry.summary_id.clone(),
                    ClickTarget {
                        kind: ChangeKind::Added,
                        key: entry.display_key.clone(),
                        span_a: None,
                        span_b: Some(entry.span),
                    },
                );
            }
            ReportEntry::Modified {
                entry,
                match_entry,
                sub_report,
            } => {
                let target = ClickTarget {
                    kind: ChangeKind::Modified,
                    key: entry.display_key.clone(),
                    span_a: Some(entry.span),
                    span_b: Some(match_entry.span),
                };
                out.insert(entry.summary_id.clone(), target.clone());
                out.insert(match_entry.summary_id.clone(), target);
                collect_click_targets(sub_report, out);
            }
        }
    }
}

/// Count report entries by change kind across all depths.
pub(crate) fn build_stats(report: &[ReportEntry]) -> DiffStats {
    let mut stats = DiffStats::default();
    accumulate_stats(report, &mut stats);
    stats
}

fn accumulate_stats(report: &[ReportEntry], stats: &mut DiffStats) {
    for item in report {
        match item {
            ReportEntry::Unchanged { .. } => stats.unchanged += 1,
            ReportEntry::Added { .. } => stats.added += 1,
            ReportEntry::Removed { .. } => stats.removed += 1,
            ReportEntry::Modified { sub_report, .. } => {
                stats.modified += 1;
                accumulate_stats(sub_report, stats);
            }
        }
    }
}
