use contrib_expr::{Expr, RegexLiteral, Value, parse, serialize};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_.:-]{0,12}"
        .prop_filter("reserved words", |k| k != "true" && k != "false")
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z ,'\\\\]{0,10}".prop_map(Value::Str),
        "[a-z][a-z0-9.:]{0,8}"
            .prop_filter("reserved words", |w| w != "true" && w != "false")
            .prop_map(Value::Word),
        "-?[0-9]{1,4}(\\.[0-9]{1,3})?".prop_map(Value::Number),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        Just(Expr::True),
        Just(Expr::False),
        arb_key().prop_map(Expr::Defined),
        (arb_key(), arb_value()).prop_map(|(key, value)| Expr::Equals { key, value }),
        (arb_key(), arb_value()).prop_map(|(key, value)| Expr::NotEquals { key, value }),
        (arb_key(), "[a-z|()^$]{1,10}", "[im]{0,1}").prop_map(|(key, body, flags)| {
            Expr::Matches {
                key,
                pattern: RegexLiteral { body, flags },
            }
        }),
        (arb_key(), arb_key()).prop_map(|(key, collection)| Expr::In { key, collection }),
    ]
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Expr::Not(Box::new(e))),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Expr::And),
            prop::collection::vec(inner, 2..4).prop_map(Expr::Or),
        ]
    })
}

proptest! {
    #[test]
    fn test_parse_serialize_identity(expr in arb_expr()) {
        let text = serialize(&expr);
        let reparsed = parse(&text);
        prop_assert!(reparsed.is_ok(), "failed to reparse {:?}: {:?}", text, reparsed);
        prop_assert_eq!(reparsed.unwrap(), Some(expr));
    }

    #[test]
    fn test_serialize_is_a_fixed_point(expr in arb_expr()) {
        let once = serialize(&expr);
        let twice = serialize(&parse(&once).unwrap().unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_parser_never_panics(input in "\\PC{0,40}") {
        let _ = parse(&input);
    }
}
