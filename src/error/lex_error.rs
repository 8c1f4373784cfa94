use thiserror::Error;

use crate::source::Span;

/// Represents the ways the lexer can reject source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that cannot start any token, or an unterminated string.
    #[error("Illegal Character Error at {span}: '{character}'")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        span:      Span,
    },
    /// An integer literal that does not fit into a 64-bit signed integer.
    #[error("Illegal Character Error at {span}: integer literal '{literal}' is too large")]
    IntegerTooLarge {
        /// The literal as written.
        literal: String,
        /// Where the literal was found.
        span:    Span,
    },
}

impl LexError {
    /// The source range of the rejected text.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::IllegalCharacter { span, .. } | Self::IntegerTooLarge { span, .. } => span,
        }
    }
}
