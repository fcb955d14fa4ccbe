use thiserror::Error;

/// A syntax error with the 1-based position where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {line}, column {column}.")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// Build a positioned error from the source text and the unconsumed
    /// suffix the parser stopped at.
    pub(crate) fn at(source: &str, remaining: &str) -> Self {
        let consumed = source.len() - remaining.len();
        let prefix = &source[..consumed];
        let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
        ParseError {
            line: prefix.matches('\n').count() + 1,
            column: consumed - line_start + 1,
        }
    }
}
