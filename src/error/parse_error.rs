use thiserror::Error;

use crate::source::Span;

/// A syntax error, pointing at the token where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Syntax Error at {span}: {kind}")]
pub struct ParseError {
    /// What the parser was looking for.
    pub kind: ParseErrorKind,
    /// The token that did not fit.
    pub span: Span,
}

impl ParseError {
    /// Creates a new syntax error at `span`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Shorthand for an [`ParseErrorKind::Expected`] error.
    #[must_use]
    pub fn expected(what: &str, span: Span) -> Self {
        Self::new(ParseErrorKind::Expected(what.to_string()), span)
    }
}

/// Represents all the ways a token stream can fail to match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A specific token or construct was required, e.g. `Expected 'end'`.
    #[error("Expected {0}")]
    Expected(String),
    /// A token that cannot start an expression.
    #[error("Unexpected token {0}")]
    UnexpectedToken(String),
    /// The input ended in the middle of a construct.
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    /// An integer literal whose magnitude only fits with a minus in front.
    #[error("Integer literal {0} is too large")]
    IntegerTooLarge(String),
    /// A complete program was parsed but tokens remained.
    #[error("Expected operator or end of input")]
    TrailingTokens,
}
