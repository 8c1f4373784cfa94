use std::{fmt, rc::Rc};

use logos::Logos;
use tracing::debug;

use crate::{
    error::LexError,
    source::{Position, SourceFile, Span},
};

/// Represents the kind of a lexical token.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    /// Float literal tokens, such as `3.14` or `2.0`.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    ///
    /// Holds the magnitude: `9223372036854775808` only fits into an `i64`
    /// with a minus in front, which the parser folds in.
    #[regex(r"[0-9]+", parse_integer)]
    Int(u64),
    /// String literal tokens with escapes already resolved, such as `"a\n"`.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    Str(String),
    /// `var`
    #[token("var")]
    Var,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `while`
    #[token("while")]
    While,
    /// `func`
    #[token("func")]
    Func,
    /// `end`
    #[token("end")]
    End,
    /// `return`
    #[token("return")]
    Return,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `and` or `&&`
    #[token("and")]
    #[token("&&")]
    And,
    /// `or` or `||`
    #[token("or")]
    #[token("||")]
    Or,
    /// `not` or `!`
    #[token("not")]
    #[token("!")]
    Not,
    /// `object`
    #[token("object")]
    Object,
    /// `new`
    #[token("new")]
    New,
    /// Identifier tokens; variable or function names such as `x` or `Print`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `->`
    #[token("->")]
    Arrow,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// Statement separator `\n`.
    #[token("\n")]
    Newline,
    /// Statement separator `;`.
    #[token(";")]
    Semicolon,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input, appended by [`tokenize`].
    Eof,
}

impl TokenKind {
    /// Returns `true` for tokens that end a statement.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Newline | Self::Semicolon)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Float(value) => return write!(f, "float '{value}'"),
            Self::Int(value) => return write!(f, "integer '{value}'"),
            Self::Str(value) => return write!(f, "string {value:?}"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Newline => return f.write_str("newline"),
            Self::Eof => return f.write_str("end of input"),
            Self::Var => "var",
            Self::If => "if",
            Self::Then => "then",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::For => "for",
            Self::To => "to",
            Self::Step => "step",
            Self::While => "while",
            Self::Func => "func",
            Self::End => "end",
            Self::Return => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Object => "object",
            Self::New => "new",
            Self::Comment => "#",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Arrow => "->",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Semicolon => ";",
            Self::Ignored => "whitespace",
        };
        write!(f, "'{text}'")
    }
}

/// A token together with the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was read.
    pub kind: TokenKind,
    /// Where it was read.
    pub span: Span,
}

/// Error values produced by the logos callbacks, converted into
/// [`LexError`] once the offending position is known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token matches the input.
    #[default]
    IllegalCharacter,
    /// An integer literal overflowed `i64`.
    IntegerTooLarge,
}

/// Splits `text` into tokens, terminated by a single [`TokenKind::Eof`].
///
/// Lexing is all-or-nothing: on the first illegal character every token read
/// so far is dropped and only the error is returned.
///
/// # Parameters
/// - `file_name`: Name used for spans and tracebacks.
/// - `text`: The source text.
///
/// # Example
/// ```
/// use sympl::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("<test>", "var x = 1.5").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            vec![TokenKind::Var,
///                 TokenKind::Identifier("x".into()),
///                 TokenKind::Equals,
///                 TokenKind::Float(1.5),
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(file_name: &str, text: &str) -> Result<Vec<Token>, LexError> {
    tokenize_source(&SourceFile::new(file_name, text))
}

/// Splits an already shared source file into tokens.
///
/// See [`tokenize`].
pub fn tokenize_source(source: &Rc<SourceFile>) -> Result<Vec<Token>, LexError> {
    let text = source.text.as_str();
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(text);
    let mut cursor = Position::start();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        cursor.advance_to(text, range.start);
        let start = cursor;

        match result {
            Ok(kind) => {
                cursor.advance_to(text, range.end);
                tokens.push(Token { kind,
                                    span: Span::new(Rc::clone(source), start, cursor) });
            },
            Err(LexErrorKind::IntegerTooLarge) => {
                cursor.advance_to(text, range.end);
                return Err(LexError::IntegerTooLarge { literal: lexer.slice().to_string(),
                                                       span:    Span::new(Rc::clone(source),
                                                                          start,
                                                                          cursor), });
            },
            Err(LexErrorKind::IllegalCharacter) => {
                let character = lexer.slice().chars().next().unwrap_or_default();
                let mut end = start;
                end.advance(character);
                return Err(LexError::IllegalCharacter { character,
                                                        span: Span::new(Rc::clone(source),
                                                                        start,
                                                                        end) });
            },
        }
    }

    cursor.advance_to(text, text.len());
    tokens.push(Token { kind: TokenKind::Eof,
                        span: Span::new(Rc::clone(source), cursor, cursor), });

    debug!(file = %source.name, count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Ok(u64)`: The magnitude, at most `i64::MIN.unsigned_abs()`.
/// - `Err(LexErrorKind::IntegerTooLarge)`: If no `i64` can hold the literal,
///   with or without a minus sign.
fn parse_integer(lex: &logos::Lexer<TokenKind>) -> Result<u64, LexErrorKind> {
    lex.slice()
       .parse()
       .ok()
       .filter(|magnitude| *magnitude <= i64::MIN.unsigned_abs())
       .ok_or(LexErrorKind::IntegerTooLarge)
}

/// Strips the quotes of a string literal and resolves its escapes.
///
/// `\n` and `\t` become newline and tab; any other escaped character stands
/// for itself, so `\"` is a quote and `\\` a backslash.
fn parse_string(lex: &logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    let body = slice.get(1..slice.len() - 1).unwrap_or_default();

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(character) = chars.next() {
        if character != '\\' {
            value.push(character);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(escaped) => value.push(escaped),
            None => break,
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize("<test>", text).unwrap()
                                .into_iter()
                                .map(|token| token.kind)
                                .collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("func fn_1 end ender"),
                   vec![TokenKind::Func,
                        TokenKind::Identifier("fn_1".into()),
                        TokenKind::End,
                        TokenKind::Identifier("ender".into()),
                        TokenKind::Eof]);
    }

    #[test]
    fn numbers_stop_at_second_dot() {
        assert_eq!(kinds("1.2.3"),
                   vec![TokenKind::Float(1.2), TokenKind::Dot, TokenKind::Int(3), TokenKind::Eof]);
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(kinds("a <= b == c -> !d != e"),
                   vec![TokenKind::Identifier("a".into()),
                        TokenKind::LessEqual,
                        TokenKind::Identifier("b".into()),
                        TokenKind::EqualEqual,
                        TokenKind::Identifier("c".into()),
                        TokenKind::Arrow,
                        TokenKind::Not,
                        TokenKind::Identifier("d".into()),
                        TokenKind::BangEqual,
                        TokenKind::Identifier("e".into()),
                        TokenKind::Eof]);
    }

    #[test]
    fn string_escapes_are_resolved() {
        assert_eq!(kinds(r#""a\tb\n\"q\" \\""#),
                   vec![TokenKind::Str("a\tb\n\"q\" \\".into()), TokenKind::Eof]);
    }

    #[test]
    fn comments_are_skipped_but_newlines_kept() {
        assert_eq!(kinds("1 # one\n2; 3"),
                   vec![TokenKind::Int(1),
                        TokenKind::Newline,
                        TokenKind::Int(2),
                        TokenKind::Semicolon,
                        TokenKind::Int(3),
                        TokenKind::Eof]);
    }

    #[test]
    fn spans_track_lines_and_columns() {
        let tokens = tokenize("<test>", "var x\n  = 10").unwrap();
        let number = &tokens[4];
        assert_eq!(number.kind, TokenKind::Int(10));
        assert_eq!(number.span.to_string(), "Line 2 (5, 7)");
        assert_eq!(number.span.text(), "10");
        assert_eq!(tokens.last().unwrap().span.start.column, 7);
    }

    #[test]
    fn illegal_character_aborts_lexing() {
        let error = tokenize("<test>", "var x = 1\nvar y = $").unwrap_err();
        assert_eq!(error.to_string(), "Illegal Character Error at Line 2 (9, 10): '$'");
    }

    #[test]
    fn unterminated_string_is_illegal() {
        let error = tokenize("<test>", "\"abc").unwrap_err();
        assert!(matches!(error, LexError::IllegalCharacter { character: '"', .. }));
    }

    #[test]
    fn oversized_integer_is_reported() {
        let error = tokenize("<test>", "99999999999999999999").unwrap_err();
        assert!(matches!(error, LexError::IntegerTooLarge { .. }));
        let error = tokenize("<test>", "9223372036854775809").unwrap_err();
        assert!(matches!(error, LexError::IntegerTooLarge { .. }));
    }

    #[test]
    fn smallest_integer_magnitude_is_a_token() {
        assert_eq!(kinds("-9223372036854775808"),
                   vec![TokenKind::Minus, TokenKind::Int(9_223_372_036_854_775_808), TokenKind::Eof]);
    }
}
