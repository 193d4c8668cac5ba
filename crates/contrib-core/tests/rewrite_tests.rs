//! Tests for significant-first rewriting

use std::collections::HashMap;
use std::rc::Rc;

use contrib_core::{Error, Rewriter, SignificantKeyTable};
use contrib_expr::{Expr, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn rewriter() -> Rewriter {
    Rewriter::new(Rc::new(SignificantKeyTable::builtin()))
}

#[rstest]
#[case::view_title(
    "view/title",
    "gitlens:enabled && view == gitlens.views.commits",
    "view == gitlens.views.commits && gitlens:enabled"
)]
#[case::view_item_both_keys(
    "view/item/context",
    "!listMultiSelection && view == gitlens.views.commits && viewItem == commit",
    "view == gitlens.views.commits && viewItem == commit && !listMultiSelection"
)]
#[case::scm_secondary_key(
    "scm/resourceState/context",
    "config.gitlens.enabled && scmProvider == git",
    "scmProvider == git && config.gitlens.enabled"
)]
#[case::webview_two_primaries(
    "webview/context",
    "a && webviewItemValue == x && webviewItem == y",
    "webviewItemValue == x && webviewItem == y && a"
)]
#[case::negated_significant_clause(
    "view/title",
    "a && !(view == x || view == y)",
    "!(view == x || view == y) && a"
)]
#[case::already_ordered("view/title", "view == x && a", "view == x && a")]
#[case::quoted_value_is_canonicalised("view/title", "a && view == \"x\"", "view == 'x' && a")]
fn test_rewrite_cases(#[case] location: &str, #[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewriter().rewrite_text(location, "owner", input).unwrap(), expected);
}

#[rstest]
#[case::command_palette("commandPalette")]
#[case::editor_context("editor/context")]
fn test_locations_without_keys_pass_through(#[case] location: &str) {
    let text = "a&&view==x";
    assert_eq!(rewriter().rewrite_text(location, "owner", text).unwrap(), text);
}

#[test]
fn test_malformed_text_is_fatal_at_keyed_location() {
    let err = rewriter()
        .rewrite_text("view/title", "gitlens.x", "view == ")
        .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("gitlens.x"));
}

#[test]
fn test_malformed_text_passes_at_unkeyed_location() {
    let text = "view == ";
    assert_eq!(rewriter().rewrite_text("commandPalette", "c", text).unwrap(), text);
}

#[rstest]
#[case("a && view == 1.0", "view == 1.0 && a")]
#[case("a && view == 01", "view == 01 && a")]
#[case("a && view != 1.50", "view != 1.50 && a")]
#[case("a && view == -0", "view == -0 && a")]
fn test_numeric_values_keep_their_text(#[case] when: &str, #[case] expected: &str) {
    assert_eq!(rewriter().rewrite_text("view/title", "c", when).unwrap(), expected);
}

// A minimal evaluator over string-valued contexts; truthy means present
// and not "false".
fn eval(expr: &Expr, ctx: &HashMap<String, String>) -> bool {
    fn text(value: &Value) -> String {
        match value {
            Value::Str(s) | Value::Word(s) | Value::Number(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
        }
    }

    match expr {
        Expr::True => true,
        Expr::False => false,
        Expr::Defined(key) => ctx.get(key).is_some_and(|v| v != "false"),
        Expr::Equals { key, value } => ctx.get(key) == Some(&text(value)),
        Expr::NotEquals { key, value } => ctx.get(key) != Some(&text(value)),
        Expr::Matches { .. } | Expr::In { .. } => false,
        Expr::Not(inner) => !eval(inner, ctx),
        Expr::And(children) => children.iter().all(|c| eval(c, ctx)),
        Expr::Or(children) => children.iter().any(|c| eval(c, ctx)),
    }
}

const KEYS: [&str; 5] = [
    "view",
    "viewItem",
    "gitlens:enabled",
    "listMultiSelection",
    "resourceScheme",
];
const VALUES: [&str; 6] = ["a", "b", "commit", "1", "1.0", "01"];

fn arb_atom() -> impl Strategy<Value = String> {
    let key = prop::sample::select(KEYS.to_vec());
    let value = prop::sample::select(VALUES.to_vec());
    prop_oneof![
        key.clone().prop_map(|k| k.to_string()),
        key.clone().prop_map(|k| format!("!{k}")),
        (key.clone(), value.clone()).prop_map(|(k, v)| format!("{k} == {v}")),
        (key, value).prop_map(|(k, v)| format!("{k} != {v}")),
    ]
}

fn arb_clause() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_atom(),
        1 => (arb_atom(), arb_atom()).prop_map(|(a, b)| format!("({a} || {b})")),
    ]
}

fn arb_conjunction() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_clause(), 1..6).prop_map(|clauses| clauses.join(" && "))
}

fn arb_context() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map(
        prop::sample::select(KEYS.to_vec()).prop_map(str::to_string),
        prop::sample::select(vec!["a", "b", "commit", "true", "false", "1", "1.0", "01"])
            .prop_map(str::to_string),
        0..5,
    )
}

proptest! {
    #[test]
    fn rewriting_preserves_meaning(when in arb_conjunction(), ctx in arb_context()) {
        let rewritten = rewriter().rewrite_text("view/item/context", "owner", &when).unwrap();
        let before = contrib_expr::parse(&when).unwrap().unwrap();
        let after = contrib_expr::parse(&rewritten).unwrap().unwrap();
        prop_assert_eq!(eval(&before, &ctx), eval(&after, &ctx));
    }

    #[test]
    fn significant_clauses_come_first(when in arb_conjunction()) {
        let rewritten = rewriter().rewrite_text("view/item/context", "owner", &when).unwrap();
        if let Some(Expr::And(children)) = contrib_expr::parse(&rewritten).unwrap() {
            let flags: Vec<bool> = children
                .iter()
                .map(|c| c.keys().iter().any(|k| k.contains("view")))
                .collect();
            let first_plain = flags.iter().position(|f| !f).unwrap_or(flags.len());
            prop_assert!(flags[first_plain..].iter().all(|f| !f));
        }
    }

    #[test]
    fn rewriting_is_idempotent(when in arb_conjunction()) {
        let rewriter = rewriter();
        let once = rewriter.rewrite_text("view/item/context", "owner", &when).unwrap();
        let twice = rewriter.rewrite_text("view/item/context", "owner", &once).unwrap();
        prop_assert_eq!(once, twice);
    }
}
