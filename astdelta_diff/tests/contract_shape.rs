use astdelta_diff::{DiffOptions, diff_sources};
use serde_json::Value;

#[test]
fn outcome_json_shape_contract() {
    let outcome = diff_sources(
        "function foo() { return 1; }\n",
        "function foo() { return 2; }\n",
        DiffOptions::default(),
    )
    .expect("sources parse");
    let value = serde_json::to_value(&outcome).expect("serialize outcome");

    let obj = value.as_object().expect("outcome should be an object");
    assert!(obj.contains_key("has_changes"));
    assert!(obj.contains_key("report"));
    assert!(obj.contains_key("stats"));
    assert!(obj.contains_key("highlights"));
    assert!(obj.contains_key("click_targets"));

    let report = obj
        .get("report")
        .and_then(Value::as_array)
        .expect("report should be an array");
    assert_eq!(report.len(), 1);

    let modified = report[0].as_object().expect("report entry object");
    assert_eq!(
        modified.get("type").and_then(Value::as_str),
        Some("MODIFIED")
    );
    assert!(modified.contains_key("entry"));
    assert!(modified.contains_key("match_entry"));
    assert!(modified.contains_key("sub_report"));

    let entry = modified
        .get("entry")
        .and_then(Value::as_object)
        .expect("entry object");
    for key in [
        "identity",
        "display_key",
        "fingerprint",
        "source_index",
        "span",
        "summary",
        "summary_id",
    ] {
        assert!(entry.contains_key(key), "entry is missing `{key}`");
    }
    assert!(
        !entry.contains_key("node"),
        "syntax nodes must not leak into the serialized contract"
    );

    let sub_report = modified
        .get("sub_report")
        .and_then(Value::as_array)
        .expect("sub_report should be an array");
    for item in sub_report {
        let kind = item
            .as_object()
            .and_then(|entry| entry.get("type"))
            .and_then(Value::as_str)
            .expect("sub-report entry type");
        assert!(
            matches!(kind, "UNCHANGED" | "ADDED" | "REMOVED"),
            "sub-report entries stay one level deep, got {kind}"
        );
    }

    let highlights = obj
        .get("highlights")
        .and_then(Value::as_object)
        .expect("highlights object");
    assert!(highlights.contains_key("removed_in_a"));
    assert!(highlights.contains_key("added_in_b"));
    assert!(highlights.contains_key("modified"));
}

#[test]
fn outcome_json_is_byte_stable_across_runs() {
    let a = "let keep = 1;\nlet x = 1;\nfunction foo() { return 1; }\n";
    let b = "let keep = 1;\nfunction foo() { return 2; }\nlet y = 3;\n";

    let one = diff_sources(a, b, DiffOptions::default()).expect("sources parse");
    let two = diff_sources(a, b, DiffOptions::default()).expect("sources parse");

    let one_json = serde_json::to_string_pretty(&one).expect("serialize first");
    let two_json = serde_json::to_string_pretty(&two).expect("serialize second");
    assert_eq!(one_json, two_json);
}

#[test]
fn report_types_cover_every_change_kind() {
    let outcome = diff_sources(
        "let keep = 1;\nlet x = 1;\nfunction foo() { return 1; }\n",
        "let keep = 1;\nfunction foo() { return 2; }\nlet y = 3;\n",
        DiffOptions::default(),
    )
    .expect("sources parse");
    let value = serde_json::to_value(&outcome).expect("serialize outcome");

    let mut kinds: Vec<String> = value
        .get("report")
        .and_then(Value::as_array)
        .expect("report array")
        .iter()
        .filter_map(|entry| entry.get("type").and_then(Value::as_str))
        .map(ToString::to_string)
        .collect();
    kinds.sort();

    assert_eq!(kinds, ["ADDED", "MODIFIED", "REMOVED", "UNCHANGED"]);
}
