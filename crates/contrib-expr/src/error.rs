//! Error types for contrib-expr

/// Result type for contrib-expr operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// A syntax error in a context-key expression.
///
/// `position` is the byte offset into the source text where the parser
/// gave up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at byte {position})")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
