//! Recursive-descent parser for context-key expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or      := and ('||' and)*
//! and     := unary ('&&' unary)*
//! unary   := '!' unary | primary
//! primary := '(' or ')' | key ('==' | '!=') value | key '=~' regex | key 'in' key | key
//! ```

use crate::ast::{Expr, RegexLiteral, Value};
use crate::error::{ParseError, Result};

/// Parses a context-key expression.
///
/// Returns `Ok(None)` for empty or whitespace-only input, which callers treat
/// as an always-true context.
///
/// # Example
/// ```
/// use contrib_expr::{Expr, parse};
///
/// let expr = parse("view == gitlens.views.commits && !listMultiSelection")
///     .unwrap()
///     .unwrap();
/// assert!(matches!(expr, Expr::And(ref parts) if parts.len() == 2));
/// assert_eq!(parse("   ").unwrap(), None);
/// ```
pub fn parse(input: &str) -> Result<Option<Expr>> {
    Parser::new(input).parse()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<Option<Expr>> {
        self.skip_ws();
        if self.eof() {
            return Ok(None);
        }

        let expr = self.parse_or()?;
        self.skip_ws();
        match self.peek_char() {
            None => Ok(Some(expr)),
            Some(')') => Err(self.error("unbalanced ')'")),
            Some(_) => Err(self.error("unexpected trailing characters")),
        }
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut parts = vec![self.parse_and()?];
        loop {
            self.skip_ws();
            if !self.consume("||") {
                break;
            }
            parts.push(self.parse_and()?);
        }

        Ok(collapse(parts, Expr::Or))
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut parts = vec![self.parse_unary()?];
        loop {
            self.skip_ws();
            if !self.consume("&&") {
                break;
            }
            parts.push(self.parse_unary()?);
        }

        Ok(collapse(parts, Expr::And))
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        self.skip_ws();
        if self.peek_char() == Some('!') {
            self.advance_char();
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        self.skip_ws();
        let Some(ch) = self.peek_char() else {
            return Err(self.error("expected expression"));
        };

        match ch {
            '(' => {
                let open = self.pos;
                self.advance_char();
                let expr = self.parse_or()?;
                self.skip_ws();
                if self.peek_char() == Some(')') {
                    self.advance_char();
                    Ok(expr)
                } else if self.eof() {
                    Err(ParseError::new("unclosed '('", open))
                } else {
                    Err(self.error("expected ')'"))
                }
            }
            ')' => Err(self.error("unbalanced ')'")),
            '&' | '|' | '=' | '~' => Err(self.error("dangling operator")),
            '\'' | '"' => Err(self.error("expected context key, found string literal")),
            _ => self.parse_comparison(),
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let key = self.read_key();
        if key.is_empty() {
            return Err(self.error("expected context key"));
        }

        self.skip_ws();
        if self.consume("==") {
            let value = self.parse_value("==")?;
            return Ok(Expr::Equals { key, value });
        }
        if self.consume("!=") {
            let value = self.parse_value("!=")?;
            return Ok(Expr::NotEquals { key, value });
        }
        if self.consume("=~") {
            let pattern = self.parse_regex()?;
            return Ok(Expr::Matches { key, pattern });
        }
        if self.peek_char() == Some('=') {
            return Err(self.error("expected '==' or '=~'"));
        }
        if self.consume_keyword("in") {
            self.skip_ws();
            let collection = self.read_key();
            if collection.is_empty() {
                return Err(self.error("expected context key after 'in'"));
            }
            return Ok(Expr::In { key, collection });
        }

        Ok(match key.as_str() {
            "true" => Expr::True,
            "false" => Expr::False,
            _ => Expr::Defined(key),
        })
    }

    fn parse_value(&mut self, op: &str) -> Result<Value> {
        self.skip_ws();
        match self.peek_char() {
            None => Err(self.error(format!("expected value after '{op}'"))),
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(Value::Str),
            Some(_) => {
                let start = self.pos;
                while let Some(ch) = self.peek_char() {
                    if ch.is_whitespace()
                        || ch == '('
                        || ch == ')'
                        || self.starts_with("&&")
                        || self.starts_with("||")
                    {
                        break;
                    }
                    self.advance_char();
                }

                let word = &self.input[start..self.pos];
                if word.is_empty() {
                    return Err(self.error(format!("expected value after '{op}'")));
                }
                Ok(classify_word(word))
            }
        }
    }

    // Backslash escapes the next character; nothing else is special inside
    // quotes.
    fn parse_string(&mut self, quote: char) -> Result<String> {
        let open = self.pos;
        self.advance_char();

        let mut text = String::new();
        let mut escaped = false;
        while let Some(ch) = self.peek_char() {
            self.advance_char();
            if escaped {
                text.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                return Ok(text);
            } else {
                text.push(ch);
            }
        }

        Err(ParseError::new("unterminated string literal", open))
    }

    fn parse_regex(&mut self) -> Result<RegexLiteral> {
        self.skip_ws();
        if self.peek_char() != Some('/') {
            return Err(self.error("expected regex literal after '=~'"));
        }

        let open = self.pos;
        self.advance_char();
        let body_start = self.pos;

        let mut escaped = false;
        let mut in_class = false;
        loop {
            let Some(ch) = self.peek_char() else {
                return Err(ParseError::new("unterminated regex literal", open));
            };
            if escaped {
                escaped = false;
            } else {
                match ch {
                    '\\' => escaped = true,
                    '[' => in_class = true,
                    ']' => in_class = false,
                    '/' if !in_class => break,
                    _ => {}
                }
            }
            self.advance_char();
        }

        let body = self.input[body_start..self.pos].to_string();
        self.advance_char();

        let flags_start = self.pos;
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_alphabetic()) {
            self.advance_char();
        }
        let flags = self.input[flags_start..self.pos].to_string();

        Ok(RegexLiteral { body, flags })
    }

    fn read_key(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if !is_key_char(ch) {
                break;
            }
            self.advance_char();
        }
        self.input[start..self.pos].to_string()
    }

    fn consume(&mut self, token: &str) -> bool {
        if self.starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    // Keywords must be followed by whitespace so keys such as `inline` are
    // not split.
    fn consume_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.remaining();
        let matched = rest.starts_with(keyword)
            && rest[keyword.len()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace);
        if matched {
            self.pos += keyword.len();
        }
        matched
    }

    fn starts_with(&self, token: &str) -> bool {
        self.remaining().starts_with(token)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek_char(), Some(ch) if ch.is_whitespace()) {
            self.advance_char();
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.pos)
    }
}

fn collapse(mut parts: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Expr {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        build(parts)
    }
}

pub(crate) fn is_key_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')' | '!' | '=' | '&' | '|' | '~' | '\'' | '"' | '/')
}

fn classify_word(word: &str) -> Value {
    match word {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if is_number(word) => Value::Number(word.to_string()),
        _ => Value::Word(word.to_string()),
    }
}

/// `-?digits(.digits)?`
pub(crate) fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_no_expression() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse(" \t ").unwrap(), None);
    }

    #[test]
    fn bare_key_is_defined() {
        assert_eq!(
            parse("gitlens:enabled").unwrap(),
            Some(Expr::Defined("gitlens:enabled".into()))
        );
    }

    #[test]
    fn key_named_like_keyword_prefix_is_not_split() {
        assert_eq!(
            parse("inline").unwrap(),
            Some(Expr::Defined("inline".into()))
        );
    }

    #[test]
    fn number_detection() {
        assert!(is_number("1"));
        assert!(is_number("-12.5"));
        assert!(!is_number("1."));
        assert!(!is_number("1.2.3"));
        assert!(!is_number("NaN"));
        assert!(!is_number("-"));
    }

    #[test]
    fn regex_with_escaped_slash_and_class() {
        let expr = parse(r"resource =~ /a\/b[/]c/i").unwrap().unwrap();
        assert_eq!(
            expr,
            Expr::Matches {
                key: "resource".into(),
                pattern: RegexLiteral {
                    body: r"a\/b[/]c".into(),
                    flags: "i".into(),
                },
            }
        );
    }

    #[test]
    fn unterminated_string_reports_opening_quote() {
        let err = parse("view == 'abc").unwrap_err();
        assert_eq!(err.position, 8);
        assert!(err.message.contains("unterminated string"));
    }
}
