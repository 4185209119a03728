use astdelta_diff::{
    DiffOptions, EditOp, ReportContext, ReportEntry, align, build_entries, diff_sources,
    reclassify,
};
use astdelta_ir::parse_module;
use proptest::prelude::*;

fn ident_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,5}")
        .expect("valid regex")
        .prop_map(|raw| format!("v{raw}"))
}

fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (ident_strategy(), 0u32..100).prop_map(|(name, value)| format!("let {name} = {value};")),
        (ident_strategy(), 0u32..100)
            .prop_map(|(name, value)| format!("function {name}() {{ return {value}; }}")),
        (ident_strategy(), ident_strategy())
            .prop_map(|(object, method)| format!("{object}.{method}('/route', handler);")),
        ident_strategy().prop_map(|name| format!("{name}();")),
    ]
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_strategy(), 0..10).prop_map(|statements| statements.join("\n"))
}

fn fingerprints(source: &str) -> Vec<String> {
    let program = parse_module(source).expect("generated source parses");
    let mut ctx = ReportContext::new();
    build_entries(&program, source, &mut ctx)
        .iter()
        .map(|entry| entry.fingerprint.0.clone())
        .collect()
}

proptest! {
    #[test]
    fn diff_outcome_is_deterministic(a in program_strategy(), b in program_strategy()) {
        let one = diff_sources(&a, &b, DiffOptions::default()).expect("generated source parses");
        let two = diff_sources(&a, &b, DiffOptions::default()).expect("generated source parses");

        let one_json = serde_json::to_string_pretty(&one).expect("serialize first");
        let two_json = serde_json::to_string_pretty(&two).expect("serialize second");
        prop_assert_eq!(one_json, two_json);
    }

    #[test]
    fn aligning_a_sequence_with_itself_is_all_unchanged(a in program_strategy()) {
        let program = parse_module(&a).expect("generated source parses");
        let mut ctx = ReportContext::new();
        let left = build_entries(&program, &a, &mut ctx);
        let right = build_entries(&program, &a, &mut ctx);
        let expected = left.len();

        let ops = align(left, right);
        prop_assert_eq!(ops.len(), expected);
        prop_assert!(ops.iter().all(|op| matches!(op, EditOp::Unchanged(_))));
    }

    #[test]
    fn alignment_preserves_both_sequence_orders(a in program_strategy(), b in program_strategy()) {
        let program_a = parse_module(&a).expect("generated source parses");
        let program_b = parse_module(&b).expect("generated source parses");
        let mut ctx = ReportContext::new();
        let left = build_entries(&program_a, &a, &mut ctx);
        let right = build_entries(&program_b, &b, &mut ctx);

        let left_fingerprints: Vec<String> =
            left.iter().map(|entry| entry.fingerprint.0.clone()).collect();
        let right_fingerprints: Vec<String> =
            right.iter().map(|entry| entry.fingerprint.0.clone()).collect();

        let ops = align(left, right);

        let reconstructed_a: Vec<String> = ops
            .iter()
            .filter_map(|op| match op {
                EditOp::Unchanged(entry) | EditOp::Removed(entry) => {
                    Some(entry.fingerprint.0.clone())
                }
                EditOp::Added(_) => None,
            })
            .collect();
        let reconstructed_b: Vec<String> = ops
            .iter()
            .filter_map(|op| match op {
                EditOp::Unchanged(entry) | EditOp::Added(entry) => {
                    Some(entry.fingerprint.0.clone())
                }
                EditOp::Removed(_) => None,
            })
            .collect();

        prop_assert_eq!(reconstructed_a, left_fingerprints);
        prop_assert_eq!(reconstructed_b, right_fingerprints);
    }

    #[test]
    fn reclassification_accounts_for_every_entry(a in program_strategy(), b in program_strategy()) {
        let program_a = parse_module(&a).expect("generated source parses");
        let program_b = parse_module(&b).expect("generated source parses");
        let mut ctx = ReportContext::new();
        let left = build_entries(&program_a, &a, &mut ctx);
        let right = build_entries(&program_b, &b, &mut ctx);

        let ops = align(left, right);
        let op_count = ops.len();

        let report = reclassify(ops, &a, &b, &mut ctx);
        let entry_count: usize = report
            .iter()
            .map(|item| match item {
                ReportEntry::Modified { .. } => 2,
                _ => 1,
            })
            .sum();

        prop_assert_eq!(entry_count, op_count);
    }

    #[test]
    fn fingerprints_survive_reindentation(a in program_strategy()) {
        let shifted = format!("\n\n    {a}");
        prop_assert_eq!(fingerprints(&a), fingerprints(&shifted));
    }
}
