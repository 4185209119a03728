use crate::model::{DiffOutcome, ReportEntry};

/// Format a human-oriented text report from a diff outcome.
pub fn format_text_report(outcome: &DiffOutcome, left_label: &str, right_label: &str) -> String {
    let mut out = String::new();
    out.push_str("# Structural Diff Report\n\n");
    out.push_str(&format!("- Left: `{left_label}`\n"));
    out.push_str(&format!("- Right: `{right_label}`\n\n"));

    out.push_str("## Stats\n\n");
    out.push_str(&format!("- Unchanged: {}\n", outcome.stats.unchanged));
    out.push_str(&format!("- Added: {}\n", outcome.stats.added));
    out.push_str(&format!("- Removed: {}\n", outcome.stats.removed));
    out.push_str(&format!("- Modified: {}\n\n", outcome.stats.modified));

    out.push_str("## Changes\n\n");
    if outcome.has_changes {
        write_entries(&outcome.report, 0, &mut out);
    } else {
        out.push_str("No changes detected.\n");
    }

    out
}

fn write_entries(report: &[ReportEntry], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for item in report {
        if matches!(item, ReportEntry::Unchanged { .. }) {
            continue;
        }
        let entry = item.entry();
        out.push_str(&format!(
            "{indent}- [{}] {}: {}\n",
            item.kind(),
            entry.display_key,
            entry.summary
        ));
        if let ReportEntry::Modified { sub_report, .. } = item {
            write_entries(sub_report, depth + 1, out);
        }
    }
}

/// Render the nested HTML summary consumed by the editor surface.
///
/// Unchanged entries are skipped; modified entries nest their sub-report in
/// a `sub-diff-container` block. All dynamic content is escaped.
pub fn format_html_summary(report: &[ReportEntry]) -> String {
    let mut items = String::new();
    write_html_entries(report, &mut items);
    if items.is_empty() {
        return r#"<div class="diff-item status-unchanged">No changes detected.</div>"#.to_string();
    }
    format!(r#"<div class="diff-summary-container">{items}</div>"#)
}

fn write_html_entries(report: &[ReportEntry], out: &mut String) {
    for item in report {
        if matches!(item, ReportEntry::Unchanged { .. }) {
            continue;
        }
        let entry = item.entry();
        let kind = item.kind();
        out.push_str(&format!(
            r#"<div class="diff-item status-{status}" id="{id}"><span class="diff-item-type">{kind}</span><span class="identity-label">{key}</span><span class="summary-source">{summary}</span></div>"#,
            status = kind.to_string().to_lowercase(),
            id = escape_html(&entry.summary_id),
            key = escape_html(&entry.display_key),
            summary = escape_html(&entry.summary),
        ));
        if let ReportEntry::Modified { sub_report, .. } = item {
            out.push_str(r#"<div class="sub-diff-container">"#);
            write_html_entries(sub_report, out);
            out.push_str("</div>");
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
