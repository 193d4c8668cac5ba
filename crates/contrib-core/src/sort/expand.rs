//! Expansion of finite regular expressions into the literals they match
//!
//! `when` clauses often pin a key with a regex such as
//! `/^(branch|remote)(\+current)?$/`. Sorting by the smallest literal the
//! pattern accepts keeps such entries next to their `==` siblings. Only
//! patterns whose language is finite are expanded; anything unbounded is
//! reported as an [`ExpandError`].

/// Largest literal set a pattern may expand to
pub const MAX_LITERALS: usize = 1024;

/// Largest character class that is expanded member by member
const MAX_CLASS_MEMBERS: usize = 64;

/// Largest `{n}` / `{n,m}` repetition count
pub const MAX_REPETITION: usize = 64;

/// Longest literal a pattern may expand to, in bytes
pub const MAX_LITERAL_LEN: usize = 256;

/// Why a pattern could not be expanded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("unbounded repetition `{token}` at byte {position}")]
    Unbounded { token: String, position: usize },

    #[error("`{construct}` matches an open set of characters (at byte {position})")]
    OpenSet { construct: String, position: usize },

    #[error("unsupported construct `{construct}` at byte {position}")]
    Unsupported { construct: String, position: usize },

    #[error("pattern expands to more than {limit} literals")]
    TooLarge { limit: usize },

    #[error("repetition count {count} exceeds {limit} (at byte {position})")]
    RepetitionTooLarge {
        count: usize,
        limit: usize,
        position: usize,
    },

    #[error("pattern expands to a literal longer than {limit} bytes")]
    LiteralTooLong { limit: usize },

    #[error("{message} (at byte {position})")]
    Syntax { message: String, position: usize },
}

type Result<T> = std::result::Result<T, ExpandError>;

/// Expands `pattern` into the sorted, de-duplicated set of strings it
/// matches.
///
/// Anchors and word boundaries match the empty string. Flags are not part
/// of the pattern and must be stripped by the caller.
///
/// # Example
/// ```
/// use contrib_core::expand;
///
/// assert_eq!(
///     expand("^(remote|tag)s?$").unwrap(),
///     vec!["remote", "remotes", "tag", "tags"]
/// );
/// assert!(expand("commit.*").is_err());
/// ```
pub fn expand(pattern: &str) -> Result<Vec<String>> {
    let mut expander = Expander {
        input: pattern,
        pos: 0,
    };
    let mut literals = expander.alternation()?;
    if let Some(ch) = expander.peek_char() {
        return Err(expander.syntax(format!("unexpected '{ch}'")));
    }

    literals.sort();
    literals.dedup();
    Ok(literals)
}

struct Expander<'a> {
    input: &'a str,
    pos: usize,
}

impl Expander<'_> {
    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn consume(&mut self, token: &str) -> bool {
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn syntax(&self, message: impl Into<String>) -> ExpandError {
        ExpandError::Syntax {
            message: message.into(),
            position: self.pos,
        }
    }

    fn alternation(&mut self) -> Result<Vec<String>> {
        let mut out = self.concatenation()?;
        while self.peek_char() == Some('|') {
            self.advance_char();
            out.extend(self.concatenation()?);
            check_size(out.len())?;
        }
        Ok(out)
    }

    fn concatenation(&mut self) -> Result<Vec<String>> {
        let mut acc = vec![String::new()];
        while let Some(ch) = self.peek_char() {
            if ch == '|' || ch == ')' {
                break;
            }
            let atom = self.atom()?;
            let atom = self.quantified(atom)?;
            acc = product(&acc, &atom)?;
        }
        Ok(acc)
    }

    fn atom(&mut self) -> Result<Vec<String>> {
        let start = self.pos;
        let Some(ch) = self.advance_char() else {
            return Err(self.syntax("unexpected end of pattern"));
        };

        match ch {
            '(' => self.group(start),
            '[' => self.class(start),
            '.' => Err(ExpandError::OpenSet {
                construct: ".".to_string(),
                position: start,
            }),
            '^' | '$' => Ok(vec![String::new()]),
            '\\' => self
                .escape(start)
                .map(|members| members.unwrap_or_else(|| vec![String::new()])),
            '*' | '+' | '?' | '{' => Err(ExpandError::Syntax {
                message: format!("nothing to repeat before '{ch}'"),
                position: start,
            }),
            other => Ok(vec![other.to_string()]),
        }
    }

    fn group(&mut self, start: usize) -> Result<Vec<String>> {
        if self.consume("?") {
            if self.consume(":") {
                // non-capturing
            } else if self.consume("P<") || self.consume("<") {
                if matches!(self.peek_char(), Some('=' | '!')) {
                    return Err(ExpandError::Unsupported {
                        construct: "lookbehind".to_string(),
                        position: start,
                    });
                }
                while let Some(ch) = self.advance_char() {
                    if ch == '>' {
                        break;
                    }
                    if !(ch.is_alphanumeric() || ch == '_') {
                        return Err(self.syntax("invalid group name"));
                    }
                }
            } else if matches!(self.peek_char(), Some('=' | '!')) {
                return Err(ExpandError::Unsupported {
                    construct: "lookahead".to_string(),
                    position: start,
                });
            } else {
                return Err(ExpandError::Unsupported {
                    construct: "inline flags".to_string(),
                    position: start,
                });
            }
        }

        let inner = self.alternation()?;
        if self.advance_char() != Some(')') {
            return Err(ExpandError::Syntax {
                message: "unclosed group".to_string(),
                position: start,
            });
        }
        Ok(inner)
    }

    /// Parses the escape after a `\`. `None` means a zero-width assertion.
    fn escape(&mut self, start: usize) -> Result<Option<Vec<String>>> {
        let Some(ch) = self.advance_char() else {
            return Err(self.syntax("trailing backslash"));
        };

        let members = match ch {
            'b' | 'B' | 'A' | 'z' => return Ok(None),
            'd' => ('0'..='9').map(String::from).collect(),
            'w' | 'W' | 's' | 'S' | 'D' | 'p' | 'P' => {
                return Err(ExpandError::OpenSet {
                    construct: format!("\\{ch}"),
                    position: start,
                });
            }
            'n' => vec!["\n".to_string()],
            't' => vec!["\t".to_string()],
            'r' => vec!["\r".to_string()],
            other if other.is_ascii_alphanumeric() => {
                return Err(ExpandError::Unsupported {
                    construct: format!("\\{other}"),
                    position: start,
                });
            }
            other => vec![other.to_string()],
        };
        Ok(Some(members))
    }

    fn class(&mut self, start: usize) -> Result<Vec<String>> {
        if self.peek_char() == Some('^') {
            return Err(ExpandError::OpenSet {
                construct: "[^...]".to_string(),
                position: start,
            });
        }

        let mut members: Vec<char> = Vec::new();
        let mut first = true;
        loop {
            let at = self.pos;
            let Some(ch) = self.advance_char() else {
                return Err(ExpandError::Syntax {
                    message: "unclosed character class".to_string(),
                    position: start,
                });
            };

            let low = match ch {
                ']' if !first => break,
                '\\' => match self.escape(at)? {
                    Some(escaped) if escaped.len() == 1 => single_char(&escaped[0]),
                    Some(digits) => {
                        members.extend(digits.iter().filter_map(|d| d.chars().next()));
                        first = false;
                        continue;
                    }
                    None => {
                        return Err(ExpandError::Unsupported {
                            construct: "assertion in character class".to_string(),
                            position: at,
                        });
                    }
                },
                other => other,
            };
            first = false;

            // `a-z`, but a trailing `-` is literal
            if self.peek_char() == Some('-') && !self.input[self.pos + 1..].starts_with(']') {
                self.advance_char();
                let Some(high) = self.advance_char() else {
                    return Err(self.syntax("unclosed character class"));
                };
                if high < low {
                    return Err(ExpandError::Syntax {
                        message: format!("invalid range {low}-{high}"),
                        position: at,
                    });
                }
                let span = (high as u32 - low as u32) as usize + 1;
                if members.len() + span > MAX_CLASS_MEMBERS {
                    return Err(ExpandError::OpenSet {
                        construct: format!("[{low}-{high}]"),
                        position: at,
                    });
                }
                members.extend(low..=high);
            } else {
                members.push(low);
            }
        }

        members.sort_unstable();
        members.dedup();
        if members.len() > MAX_CLASS_MEMBERS {
            return Err(ExpandError::OpenSet {
                construct: "character class".to_string(),
                position: start,
            });
        }
        Ok(members.into_iter().map(String::from).collect())
    }

    fn quantified(&mut self, atom: Vec<String>) -> Result<Vec<String>> {
        let start = self.pos;
        let out = match self.peek_char() {
            Some('?') => {
                self.advance_char();
                let mut out = atom;
                out.push(String::new());
                out
            }
            Some(ch @ ('*' | '+')) => {
                return Err(ExpandError::Unbounded {
                    token: ch.to_string(),
                    position: start,
                });
            }
            Some('{') => {
                self.advance_char();
                let (min, max) = self.bounds(start)?;
                let mut out = Vec::new();
                let mut power = vec![String::new()];
                for count in 0..=max {
                    if count >= min {
                        out.extend(power.iter().cloned());
                        check_size(out.len())?;
                    }
                    if count < max {
                        power = product(&power, &atom)?;
                    }
                }
                out
            }
            _ => return Ok(atom),
        };

        // lazy suffix does not change the language
        if self.peek_char() == Some('?') {
            self.advance_char();
        }
        Ok(out)
    }

    fn bounds(&mut self, start: usize) -> Result<(usize, usize)> {
        let min = self.number()?;
        let max = if self.consume(",") {
            if self.peek_char() == Some('}') {
                return Err(ExpandError::Unbounded {
                    token: format!("{{{min},}}"),
                    position: start,
                });
            }
            self.number()?
        } else {
            min
        };

        if !self.consume("}") {
            return Err(self.syntax("unclosed repetition"));
        }
        if max < min {
            return Err(ExpandError::Syntax {
                message: format!("invalid repetition {{{min},{max}}}"),
                position: start,
            });
        }
        if max > MAX_REPETITION {
            return Err(ExpandError::RepetitionTooLarge {
                count: max,
                limit: MAX_REPETITION,
                position: start,
            });
        }
        Ok((min, max))
    }

    fn number(&mut self) -> Result<usize> {
        let start = self.pos;
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.advance_char();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| self.syntax("expected repetition count"))
    }
}

fn single_char(text: &str) -> char {
    text.chars().next().unwrap_or_default()
}

fn check_size(len: usize) -> Result<()> {
    if len > MAX_LITERALS {
        return Err(ExpandError::TooLarge {
            limit: MAX_LITERALS,
        });
    }
    Ok(())
}

fn product(prefixes: &[String], suffixes: &[String]) -> Result<Vec<String>> {
    check_size(prefixes.len().saturating_mul(suffixes.len()))?;
    let longest = |items: &[String]| items.iter().map(String::len).max().unwrap_or(0);
    if longest(prefixes) + longest(suffixes) > MAX_LITERAL_LEN {
        return Err(ExpandError::LiteralTooLong {
            limit: MAX_LITERAL_LEN,
        });
    }
    Ok(prefixes
        .iter()
        .flat_map(|p| suffixes.iter().map(move |s| format!("{p}{s}")))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_literal() {
        assert_eq!(expand("commit").unwrap(), strings(&["commit"]));
    }

    #[test]
    fn test_anchored_alternation() {
        assert_eq!(
            expand("^(?:branch|remote)$").unwrap(),
            strings(&["branch", "remote"])
        );
    }

    #[test]
    fn test_optional_suffix() {
        assert_eq!(
            expand(r"^commit(\+current)?$").unwrap(),
            strings(&["commit", "commit+current"])
        );
    }

    #[test]
    fn test_class_and_range() {
        assert_eq!(expand("v[1-3]").unwrap(), strings(&["v1", "v2", "v3"]));
        assert_eq!(expand("[-a]").unwrap(), strings(&["-", "a"]));
        assert_eq!(expand("[a-]").unwrap(), strings(&["-", "a"]));
    }

    #[test]
    fn test_bounded_repetition() {
        assert_eq!(expand("a{2}").unwrap(), strings(&["aa"]));
        assert_eq!(expand("a{0,2}").unwrap(), strings(&["", "a", "aa"]));
    }

    #[test]
    fn test_named_group_and_boundary() {
        assert_eq!(
            expand(r"\b(?P<kind>tag|stash)\b").unwrap(),
            strings(&["stash", "tag"])
        );
    }

    #[test]
    fn test_unbounded_is_rejected() {
        assert!(matches!(expand("a*"), Err(ExpandError::Unbounded { .. })));
        assert!(matches!(expand("a+"), Err(ExpandError::Unbounded { .. })));
        assert!(matches!(expand("a{2,}"), Err(ExpandError::Unbounded { .. })));
    }

    #[test]
    fn test_open_sets_are_rejected() {
        assert!(matches!(expand("a.b"), Err(ExpandError::OpenSet { .. })));
        assert!(matches!(expand(r"\w"), Err(ExpandError::OpenSet { .. })));
        assert!(matches!(expand("[^a]"), Err(ExpandError::OpenSet { .. })));
    }

    #[test]
    fn test_lookaround_is_rejected() {
        assert!(matches!(expand("(?=a)"), Err(ExpandError::Unsupported { .. })));
        assert!(matches!(expand("(?<!a)b"), Err(ExpandError::Unsupported { .. })));
    }

    #[test]
    fn test_too_large() {
        assert_eq!(
            expand(r"\d{4}"),
            Err(ExpandError::TooLarge {
                limit: MAX_LITERALS
            })
        );
    }

    #[test]
    fn test_repetition_count_is_bounded() {
        assert!(expand("a{64}").is_ok());
        assert_eq!(
            expand("a{200000}"),
            Err(ExpandError::RepetitionTooLarge {
                count: 200000,
                limit: MAX_REPETITION,
                position: 1,
            })
        );
        assert!(matches!(
            expand("(){1,100000}"),
            Err(ExpandError::RepetitionTooLarge { .. })
        ));
    }

    #[test]
    fn test_nested_repetition_length_is_bounded() {
        assert_eq!(
            expand("((ab){64}){64}"),
            Err(ExpandError::LiteralTooLong {
                limit: MAX_LITERAL_LEN
            })
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(expand("(a"), Err(ExpandError::Syntax { .. })));
        assert!(matches!(expand("a)"), Err(ExpandError::Syntax { .. })));
        assert!(matches!(expand("[ab"), Err(ExpandError::Syntax { .. })));
    }
}
