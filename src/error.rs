/// Lexing errors.
///
/// Lexing is all-or-nothing: the first character the lexer cannot place into
/// a token aborts the whole pass with a single `LexError`.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the syntax errors raised while building the AST, such as missing
/// keyword terminators, unbalanced parentheses or trailing tokens.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error kinds that can be raised during evaluation: undefined or
/// immutable variables, arity mismatches, division by zero, illegal operations
/// and failed module loads. Each error keeps the traceback of the contexts it
/// was raised in.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::{ParseError, ParseErrorKind};
pub use runtime_error::{RuntimeError, RuntimeErrorKind, TraceFrame};
use thiserror::Error;

use crate::source::Span;

/// Any error produced while running Sympl source text.
///
/// The three pipeline stages each have their own error type; this enum lets
/// hosts handle them uniformly while keeping the original error intact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymplError {
    /// The source contained a character no token starts with.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream did not match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl SymplError {
    /// The source range the error points at.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Lex(e) => e.span(),
            Self::Parse(e) => &e.span,
            Self::Runtime(e) => &e.span,
        }
    }

    /// Renders the error for a terminal.
    ///
    /// Runtime errors start with their traceback. Every error ends with the
    /// offending source line(s) and `^` markers under the failing range.
    #[must_use]
    pub fn report(&self) -> String {
        match self {
            Self::Runtime(e) => e.report(),
            _ => format!("{self}\n\n{}", self.span().underline()),
        }
    }
}
