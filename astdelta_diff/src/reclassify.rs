use crate::drilldown::drill_down;
use crate::model::{EditOp, Entry, ReportEntry};
use crate::summary::ReportContext;

/// Upgrade paired removed/added operations into modified entries.
///
/// Every `Added` operation enters a working pool up front, so a `Removed`
/// entry may pair with an `Added` entry from anywhere in the script; this
/// intentionally catches reordering combined with identity-preserving
/// edits. When several pool entries share an identity, the first in pool
/// order wins. Unmatched `Added` operations are appended after the rest in
/// their original relative order, so every input entry appears in the
/// output exactly once.
pub fn reclassify(
    edits: Vec<EditOp>,
    source_a: &str,
    source_b: &str,
    ctx: &mut ReportContext,
) -> Vec<ReportEntry> {
    let mut pool: Vec<Option<Entry>> = Vec::new();
    let mut sequenced = Vec::new();
    for op in edits {
        match op {
            EditOp::Added(entry) => pool.push(Some(entry)),
            other => sequenced.push(other),
        }
    }

    let mut report = Vec::new();
    for op in sequenced {
        match op {
            EditOp::Unchanged(entry) => report.push(ReportEntry::Unchanged { entry }),
            EditOp::Added(entry) => report.push(ReportEntry::Added { entry }),
            EditOp::Removed(entry) => {
                let matched = entry
                    .identity
                    .as_deref()
                    .and_then(|identity| {
                        pool.iter().position(|slot| {
                            slot.as_ref()
                                .is_some_and(|candidate| candidate.identity.as_deref() == Some(identity))
                        })
                    })
                    .and_then(|slot| pool[slot].take());

                match matched {
                    Some(match_entry) => {
                        let sub_report =
                            drill_down(&entry.node, &match_entry.node, source_a, source_b, ctx);
                        report.push(ReportEntry::Modified {
                            entry,
                            match_entry,
                            sub_report,
                        });
                    }
                    None => report.push(ReportEntry::Removed { entry }),
                }
            }
        }
    }

    for slot in pool {
        if let Some(entry) = slot {
            report.push(ReportEntry::Added { entry });
        }
    }

    report
}
