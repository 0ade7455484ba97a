// crates/engine/src/token.rs

/// Position of a token in the source text. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Closed set of token kinds the counter discriminates on, plus the
/// ordinary code kinds. Anything more exotic the tokenizer would produce
/// (indentation, for instance) has no effect on counting and is not
/// modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Statement-terminating newline.
    Newline,
    /// Non-logical newline: blank line, comment-only line, or a line end
    /// inside brackets.
    Nl,
    Comment,
    Str,
    Op,
    Name,
    Number,
    /// Synthetic end-of-file marker; its start line is one past the last
    /// source line.
    EndMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal source text. For strings this includes prefix and quotes,
    /// which is what the docstring check looks at.
    pub text: String,
    pub start: Position,
    pub end: Position,
}
