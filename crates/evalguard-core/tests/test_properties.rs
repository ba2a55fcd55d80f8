use std::cell::Cell;

use evalguard::{check, expect, json, RuleKind, RuleSet, ValidationError, ValueKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn present_substring_passes(
        prefix in "\\PC{0,16}",
        needle in "\\PC{0,8}",
        suffix in "\\PC{0,16}"
    ) {
        let haystack = format!("{}{}{}", prefix, needle, suffix);
        prop_assert!(expect(haystack.as_str()).contains(&needle).is_ok());
    }

    #[test]
    fn absent_substring_fails_with_contains(haystack in "[a-z ]{0,32}", needle in "[A-Z0-9]{1,8}") {
        let err = expect(haystack.as_str()).contains(&needle).unwrap_err();
        prop_assert_eq!(err.rule, RuleKind::Contains);
    }
}

#[test]
fn not_empty_rejects_blank_strings() {
    for blank in ["", "   ", "\t\n"] {
        let err = expect(blank).not_empty().unwrap_err();
        assert_eq!(err.rule, RuleKind::NotEmpty);
    }
    assert!(expect("x").not_empty().is_ok());
}

#[test]
fn valid_json_failure_is_a_validation_error() {
    assert!(expect(r#"{"a":1}"#).valid_json().is_ok());

    let err: ValidationError = expect("{a:1}").valid_json().unwrap_err();
    assert_eq!(err.rule, RuleKind::ValidJson);
}

#[test]
fn chain_is_fail_fast() {
    let evaluated = Cell::new(0);
    let err = expect("abc")
        .contains("z")
        .and_then(|e| e.not_contains("a"))
        .and_then(|e| {
            e.satisfies(|_| {
                evaluated.set(evaluated.get() + 1);
                true
            })
        })
        .unwrap_err();

    assert_eq!(err.rule, RuleKind::Contains);
    assert_eq!(evaluated.get(), 0);
}

#[test]
fn checker_passes_and_rejects_sql() {
    let rules = RuleSet::new().contains(vec!["SELECT"]).not_contains(vec!["DROP"]);

    let safe = check(rules.clone()).wrap(|()| "SELECT * FROM t".to_string());
    assert_eq!(safe.call(()).unwrap(), "SELECT * FROM t");

    // Rules run in catalog order, so a value lacking SELECT reports contains
    // even though it also holds DROP. not_contains is only reached once
    // contains passes, as in the mixed case below.
    let dangerous = check(rules.clone()).wrap(|()| "DROP TABLE t".to_string());
    assert_eq!(dangerous.call(()).unwrap_err().rule, RuleKind::Contains);

    let mixed = check(rules).wrap(|()| "SELECT 1; DROP TABLE t".to_string());
    assert_eq!(mixed.call(()).unwrap_err().rule, RuleKind::NotContains);
}

#[test]
fn checker_not_contains_alone_rejects_drop() {
    let dangerous =
        check(RuleSet::new().not_contains(["DROP"])).wrap(|()| "DROP TABLE t".to_string());
    assert_eq!(dangerous.call(()).unwrap_err().rule, RuleKind::NotContains);
}

#[test]
fn fallback_replaces_result() {
    let func = check(RuleSet::new().contains(["X"]))
        .on_fail(|_| "fallback".to_string())
        .wrap(|()| "no match".to_string());
    assert_eq!(func.call(()).unwrap(), "fallback");
}

#[test]
fn max_length_boundary_is_inclusive() {
    assert!(expect("hello!").max_length(5).is_err());
    assert!(expect("hello").max_length(5).is_ok());
}

#[test]
fn is_type_string() {
    assert!(expect("any string").is_type(ValueKind::String).is_ok());

    let err = expect(7).is_type(ValueKind::String).unwrap_err();
    assert_eq!(err.rule, RuleKind::IsType);
    assert_eq!(err.value, json!(7));
}
