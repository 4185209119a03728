use astdelta_ir::{ArrowBody, Node, NodeKind};

use crate::align::align;
use crate::model::{EditOp, ReportEntry};
use crate::sequence::build_inner_entries;
use crate::summary::ReportContext;

/// Re-diff the inner statement sequences of a matched pair of composites.
///
/// Drill-down is fixed at one level: the inner edit script is not
/// re-classified into modified pairs, and functions nested inside the
/// bodies are not expanded further.
pub(crate) fn drill_down(
    old_node: &Node,
    new_node: &Node,
    source_a: &str,
    source_b: &str,
    ctx: &mut ReportContext,
) -> Vec<ReportEntry> {
    let old_entries = build_inner_entries(inner_statements(old_node), source_a, ctx);
    let new_entries = build_inner_entries(inner_statements(new_node), source_b, ctx);

    align(old_entries, new_entries)
        .into_iter()
        .map(|op| match op {
            EditOp::Unchanged(entry) => ReportEntry::Unchanged { entry },
            EditOp::Added(entry) => ReportEntry::Added { entry },
            EditOp::Removed(entry) => ReportEntry::Removed { entry },
        })
        .collect()
}

/// Extract the inner statement sequence a composite node carries: a
/// function declaration's body, or the block body of the first function or
/// arrow argument of a call statement. Expression-bodied arrows have no
/// statement list and contribute an empty sequence.
fn inner_statements(node: &Node) -> &[Node] {
    match &node.kind {
        NodeKind::FunctionDecl { body, .. } => body,
        NodeKind::ExpressionStmt { expression } => match &expression.kind {
            NodeKind::Call { arguments, .. } => {
                let callback = arguments.iter().find(|argument| {
                    matches!(
                        argument.kind,
                        NodeKind::FunctionExpr { .. } | NodeKind::ArrowFunctionExpr { .. }
                    )
                });
                match callback.map(|node| &node.kind) {
                    Some(NodeKind::FunctionExpr { body, .. }) => body,
                    Some(NodeKind::ArrowFunctionExpr {
                        body: ArrowBody::Block { statements },
                        ..
                    }) => statements,
                    _ => &[],
                }
            }
            _ => &[],
        },
        _ => &[],
    }
}
