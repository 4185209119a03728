use astdelta_ir::Node;

const SUMMARY_MAX_CHARS: usize = 60;
const SUMMARY_EDGE: usize = 27;

/// Request-scoped state threaded through report construction.
///
/// Owns the display-identifier counter, so identifiers are unique within
/// one diff request and independent requests never share state.
#[derive(Debug, Default)]
pub struct ReportContext {
    next_summary_id: u64,
}

impl ReportContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_summary_id(&mut self) -> String {
        self.next_summary_id += 1;
        format!("sum_id_{}", self.next_summary_id)
    }
}

/// Derive the one-line display excerpt and display identifier for a node.
///
/// A range that does not resolve into the source buffer degrades to the
/// node's kind name; summary derivation never fails.
pub(crate) fn node_summary(
    node: &Node,
    source: &str,
    ctx: &mut ReportContext,
) -> (String, String) {
    let summary_id = ctx.next_summary_id();
    let summary = match source.get(node.span.start..node.span.end) {
        Some(raw) => truncate_summary(&raw.split_whitespace().collect::<Vec<_>>().join(" ")),
        None => node.kind.name().to_string(),
    };
    (summary, summary_id)
}

fn truncate_summary(clean: &str) -> String {
    let chars: Vec<char> = clean.chars().collect();
    if chars.len() <= SUMMARY_MAX_CHARS {
        return clean.to_string();
    }
    let head: String = chars[..SUMMARY_EDGE].iter().collect();
    let tail: String = chars[chars.len() - SUMMARY_EDGE..].iter().collect();
    format!("{head}...{tail}")
}
