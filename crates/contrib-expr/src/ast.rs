//! Expression tree for context-key ("when") clauses.

/// A parsed context-key expression.
///
/// `And` and `Or` always hold at least two operands; the parser never builds
/// a single-operand conjunction or disjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    True,
    False,
    /// A bare key, true when the key is set to a truthy value.
    Defined(String),
    Equals {
        key: String,
        value: Value,
    },
    NotEquals {
        key: String,
        value: Value,
    },
    Matches {
        key: String,
        pattern: RegexLiteral,
    },
    /// `key in collection`, where `collection` names another context key.
    In {
        key: String,
        collection: String,
    },
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

/// Right-hand side of `==` and `!=`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A quoted string literal.
    Str(String),
    /// An unquoted word such as `gitlens.views.commits`.
    Word(String),
    /// A numeric literal, kept as written so `1.0` and `1` stay distinct.
    Number(String),
    Bool(bool),
}

/// A `/body/flags` regex literal, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexLiteral {
    pub body: String,
    pub flags: String,
}

impl Expr {
    /// Returns the distinct context keys referenced by this expression, in
    /// order of first occurrence.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Expr::True | Expr::False => {}
            Expr::Defined(key)
            | Expr::Equals { key, .. }
            | Expr::NotEquals { key, .. }
            | Expr::Matches { key, .. } => push_unique(keys, key),
            Expr::In { key, collection } => {
                push_unique(keys, key);
                push_unique(keys, collection);
            }
            Expr::Not(inner) => inner.collect_keys(keys),
            Expr::And(children) | Expr::Or(children) => {
                for child in children {
                    child.collect_keys(keys);
                }
            }
        }
    }

    /// Top-level conjuncts if this is an `And` node.
    pub fn conjuncts(&self) -> Option<&[Expr]> {
        match self {
            Expr::And(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Expr::And(_) | Expr::Or(_))
    }
}

fn push_unique<'a>(keys: &mut Vec<&'a str>, key: &'a str) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct_and_ordered() {
        let expr = Expr::And(vec![
            Expr::Defined("b".into()),
            Expr::Or(vec![
                Expr::Equals {
                    key: "a".into(),
                    value: Value::Word("x".into()),
                },
                Expr::Defined("b".into()),
            ]),
            Expr::In {
                key: "c".into(),
                collection: "a".into(),
            },
        ]);

        assert_eq!(expr.keys(), vec!["b", "a", "c"]);
    }

    #[test]
    fn constants_reference_no_keys() {
        assert!(Expr::True.keys().is_empty());
        assert!(Expr::Not(Box::new(Expr::False)).keys().is_empty());
    }

    #[test]
    fn conjuncts_only_for_and() {
        let and = Expr::And(vec![Expr::True, Expr::False]);
        assert_eq!(and.conjuncts().map(<[Expr]>::len), Some(2));
        assert!(Expr::Or(vec![Expr::True, Expr::False]).conjuncts().is_none());
    }
}
