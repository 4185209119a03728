//! Structural diff engine over `astdelta_ir` syntax trees.
//!
//! The engine fingerprints top-level statements into position-independent
//! content hashes, aligns the two sequences with an LCS pass, pairs
//! removed/added entries that share a stable identity into modified
//! entries, and re-diffs the bodies of matched composites one level deep.
//!
//! Primary entrypoints:
//! - [`diff_sources`]
//! - [`diff_programs`]
//! - [`format_text_report`]
//! - [`format_html_summary`]
//!
//! # Example
//!
//! ```rust
//! use astdelta_diff::{DiffOptions, diff_sources};
//!
//! let outcome = diff_sources("let x = 1;\n", "let x = 2;\n", DiffOptions::default())
//!     .expect("both sources are well formed");
//! assert!(outcome.has_changes);
//! ```

mod align;
mod drilldown;
mod fingerprint;
mod flatten;
mod identity;
mod model;
mod reclassify;
mod report;
mod sequence;
mod summary;


pub use align::align;
pub use fingerprint::fingerprint;
pub use flatten::{build_click_index, flatten_report};
pub use identity::identity_of;
pub use model::{
    ChangeKind, ClickTarget, DiffError, DiffOptions, DiffOutcome, DiffStats, EditOp, Entry,
    Fingerprint, HighlightSet, ModifiedSpanPair, ReportEntry, Side,
};
pub use reclassify::reclassify;
pub use report::{format_html_summary, format_text_report};
pub use sequence::build_entries;
pub use summary::ReportContext;

use astdelta_ir::{Program, parse};

/// Compute a structural diff between two pre-parsed programs.
///
/// The source buffers are only consulted for display summaries; alignment
/// and pairing operate purely on fingerprints and identities.
pub fn diff_programs(
    program_a: &Program,
    program_b: &Program,
    source_a: &str,
    source_b: &str,
) -> DiffOutcome {
    let mut ctx = ReportContext::new();
    let entries_a = build_entries(program_a, source_a, &mut ctx);
    let entries_b = build_entries(program_b, source_b, &mut ctx);

    let edits = align(entries_a, entries_b);
    let report = reclassify(edits, source_a, source_b, &mut ctx);

    let stats = flatten::build_stats(&report);
    let highlights = flatten_report(&report);
    let click_targets = build_click_index(&report);
    let has_changes = stats.added + stats.removed + stats.modified > 0;

    DiffOutcome {
        has_changes,
        report,
        stats,
        highlights,
        click_targets,
    }
}

/// Parse and diff two source buffers.
///
/// A parse failure on either side aborts the whole request: no partial
/// report is produced, and the error records which side failed along with
/// the failure's line and column.
pub fn diff_sources(
    source_a: &str,
    source_b: &str,
    options: DiffOptions,
) -> Result<DiffOutcome, DiffError> {
    let program_a = parse(source_a, options.parse).map_err(|source| DiffError::Parse {
        side: Side::Left,
        source,
    })?;
    let program_b = parse(source_b, options.parse).map_err(|source| DiffError::Parse {
        side: Side::Right,
        source,
    })?;
    Ok(diff_programs(&program_a, &program_b, source_a, source_b))
}
