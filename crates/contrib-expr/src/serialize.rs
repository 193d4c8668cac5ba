//! Canonical text form of an expression.
//!
//! Operands are written in their current order; nothing is reordered here.
//! Parentheses are emitted only where dropping them would change the tree
//! the parser rebuilds.

use std::fmt;

use crate::ast::{Expr, RegexLiteral, Value};

/// Renders `expr` in canonical form.
///
/// The output reparses to a structurally equal tree.
pub fn serialize(expr: &Expr) -> String {
    expr.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::True => f.write_str("true"),
            Expr::False => f.write_str("false"),
            Expr::Defined(key) => f.write_str(key),
            Expr::Equals { key, value } => write!(f, "{key} == {value}"),
            Expr::NotEquals { key, value } => write!(f, "{key} != {value}"),
            Expr::Matches { key, pattern } => write!(f, "{key} =~ {pattern}"),
            Expr::In { key, collection } => write!(f, "{key} in {collection}"),
            Expr::Not(inner) => {
                if inner.is_compound() {
                    write!(f, "!({inner})")
                } else {
                    write!(f, "!{inner}")
                }
            }
            Expr::And(children) => write_joined(f, children, " && ", Expr::is_compound),
            Expr::Or(children) => {
                write_joined(f, children, " || ", |child| matches!(child, Expr::Or(_)))
            }
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[Expr],
    separator: &str,
    needs_parens: fn(&Expr) -> bool,
) -> fmt::Result {
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(child) {
            write!(f, "({child})")?;
        } else {
            write!(f, "{child}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => {
                f.write_str("'")?;
                for ch in text.chars() {
                    if ch == '\'' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                f.write_str("'")
            }
            Value::Word(word) | Value::Number(word) => f.write_str(word),
            Value::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.body, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_inside_and_is_parenthesised() {
        let expr = Expr::And(vec![
            Expr::Defined("a".into()),
            Expr::Or(vec![Expr::Defined("b".into()), Expr::Defined("c".into())]),
        ]);
        assert_eq!(serialize(&expr), "a && (b || c)");
    }

    #[test]
    fn and_inside_or_is_bare() {
        let expr = Expr::Or(vec![
            Expr::And(vec![Expr::Defined("a".into()), Expr::Defined("b".into())]),
            Expr::Defined("c".into()),
        ]);
        assert_eq!(serialize(&expr), "a && b || c");
    }

    #[test]
    fn string_quotes_are_escaped() {
        let value = Value::Str(r"it's a \ path".into());
        assert_eq!(value.to_string(), r"'it\'s a \\ path'");
    }

    #[test]
    fn numbers_render_as_written() {
        assert_eq!(Value::Number("1.0".into()).to_string(), "1.0");
        assert_eq!(Value::Number("01".into()).to_string(), "01");
        assert_eq!(Value::Number("-2.50".into()).to_string(), "-2.50");
    }
}
