use astdelta_ir::{Node, Program};

use crate::fingerprint::fingerprint;
use crate::identity::identity_of;
use crate::model::Entry;
use crate::summary::{ReportContext, node_summary};

/// Build the ordered entry sequence for a program's top-level statements.
///
/// Entries are produced in source order, so `source_index` values are
/// contiguous from zero and the aligner sees original statement order.
pub fn build_entries(program: &Program, source: &str, ctx: &mut ReportContext) -> Vec<Entry> {
    program
        .body
        .iter()
        .enumerate()
        .map(|(source_index, node)| {
            let identity = identity_of(node);
            let display_key = identity
                .clone()
                .unwrap_or_else(|| node.kind.name().to_string());
            let (summary, summary_id) = node_summary(node, source, ctx);
            Entry {
                identity,
                display_key,
                fingerprint: fingerprint(node),
                source_index,
                span: node.span,
                summary,
                summary_id,
                node: node.clone(),
            }
        })
        .collect()
}

/// Build entries for an inner statement sequence during drill-down.
///
/// Inner entries carry no identity; their display key is the statement's
/// kind name.
pub(crate) fn build_inner_entries(
    statements: &[Node],
    source: &str,
    ctx: &mut ReportContext,
) -> Vec<Entry> {
    statements
        .iter()
        .enumerate()
        .map(|(source_index, node)| {
            let (summary, summary_id) = node_summary(node, source, ctx);
            Entry {
                identity: None,
                display_key: node.kind.name().to_string(),
                fingerprint: fingerprint(node),
                source_index,
                span: node.span,
                summary,
                summary_id,
                node: node.clone(),
            }
        })
        .collect()
}
