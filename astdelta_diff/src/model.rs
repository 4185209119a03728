use std::collections::BTreeMap;
use std::fmt;

use astdelta_ir::{Node, ParseError, ParseOptions, Span};
use serde::Serialize;
use thiserror::Error;

/// Position-independent content hash of a syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(pub String);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One diffable unit: a top-level statement, or an inner statement during
/// drill-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Stable logical identity, when the statement form has one.
    pub identity: Option<String>,
    /// Identity when present, otherwise the node kind name.
    pub display_key: String,
    pub fingerprint: Fingerprint,
    /// Position in the originating sequence, contiguous from zero.
    pub source_index: usize,
    pub span: Span,
    pub summary: String,
    pub summary_id: String,
    /// Retained for drill-down; not part of the serialized contract.
    #[serde(skip)]
    pub node: Node,
}

/// Edit script operation produced by [`align`](crate::align).
///
/// Read in order, the script reconstructs sequence B by skipping `Removed`
/// and sequence A by skipping `Added`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Unchanged(Entry),
    Added(Entry),
    Removed(Entry),
}

/// Change classification carried by report entries and click targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Unchanged => "UNCHANGED",
            ChangeKind::Added => "ADDED",
            ChangeKind::Removed => "REMOVED",
            ChangeKind::Modified => "MODIFIED",
        };
        f.write_str(label)
    }
}

/// One node of the nested diff report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportEntry {
    Unchanged {
        entry: Entry,
    },
    Added {
        entry: Entry,
    },
    Removed {
        entry: Entry,
    },
    /// A removed/added pair sharing an identity, merged in place. `entry`
    /// always originates from sequence A and `match_entry` from sequence B.
    Modified {
        entry: Entry,
        match_entry: Entry,
        sub_report: Vec<ReportEntry>,
    },
}

impl ReportEntry {
    /// The change classification for this entry.
    pub fn kind(&self) -> ChangeKind {
        match self {
            ReportEntry::Unchanged { .. } => ChangeKind::Unchanged,
            ReportEntry::Added { .. } => ChangeKind::Added,
            ReportEntry::Removed { .. } => ChangeKind::Removed,
            ReportEntry::Modified { .. } => ChangeKind::Modified,
        }
    }

    /// The primary entry (the sequence-A side for modified pairs).
    pub fn entry(&self) -> &Entry {
        match self {
            ReportEntry::Unchanged { entry }
            | ReportEntry::Added { entry }
            | ReportEntry::Removed { entry }
            | ReportEntry::Modified { entry, .. } => entry,
        }
    }
}

/// Aggregate counters across all report depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

/// Matched highlight spans for one modified pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModifiedSpanPair {
    pub in_a: Span,
    pub in_b: Span,
}

/// Flat highlight lists handed to the editor surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HighlightSet {
    pub removed_in_a: Vec<Span>,
    pub added_in_b: Vec<Span>,
    pub modified: Vec<ModifiedSpanPair>,
}

/// Resolution data for one display identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickTarget {
    pub kind: ChangeKind,
    pub key: String,
    pub span_a: Option<Span>,
    pub span_b: Option<Span>,
}

/// Options controlling a diff request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    pub parse: ParseOptions,
}

/// Which input of a diff request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// Fatal failure of a diff request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// One of the inputs failed to parse; no report is produced.
    #[error("failed to parse {side} source: {source}")]
    Parse { side: Side, source: ParseError },
}

/// Complete output contract of one diff request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffOutcome {
    pub has_changes: bool,
    pub report: Vec<ReportEntry>,
    pub stats: DiffStats,
    pub highlights: HighlightSet,
    pub click_targets: BTreeMap<String, ClickTarget>,
}
