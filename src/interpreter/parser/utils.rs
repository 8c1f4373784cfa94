use std::iter::Peekable;

use crate::{
    error::{ParseError, ParseErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
    source::{Position, SourceFile, Span},
};

/// Returns the next token without consuming it.
///
/// Token streams produced by the lexer always end in [`TokenKind::Eof`], so
/// running out of tokens only happens for hand-built streams and is reported
/// as an unexpected end of input.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.peek().copied().ok_or_else(end_of_input)
}

/// Consumes and returns the next token.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.next().ok_or_else(end_of_input)
}

/// Consumes the next token if it has the given kind.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>,
                                                 kind: &TokenKind)
                                                 -> Option<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.next_if(|token| &token.kind == kind)
}

/// Consumes a token of the given kind or fails with `Expected <what>`.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `kind`: The required token kind.
/// - `what`: How the token is named in the error, e.g. `'then'`.
///
/// # Returns
/// The consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: &TokenKind,
                                                    what: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek(tokens)?;
    if &token.kind == kind {
        tokens.next();
        Ok(token)
    } else {
        Err(ParseError::expected(what, token.span.clone()))
    }
}

/// Skips newlines and semicolons, returning how many were skipped.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut count = 0;
    while tokens.next_if(|token| token.kind.is_separator()).is_some() {
        count += 1;
    }
    count
}

/// Returns `true` if the next token is a statement separator.
pub(in crate::interpreter::parser) fn at_separator<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.peek().is_some_and(|token| token.kind.is_separator())
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, argument lists and parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `what`: Error text used when neither a comma nor `closing` follows an
///   item, e.g. `',' or ')'`.
///
/// # Returns
/// The parsed items and the closing token, whose span ends the construct.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind,
    what: &str)
    -> ParseResult<(Vec<T>, &'a Token)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if let Some(token) = eat(tokens, closing) {
        return Ok((items, token));
    }
    loop {
        items.push(parse_item(tokens)?);
        let token = advance(tokens)?;
        match &token.kind {
            TokenKind::Comma => {},
            kind if kind == closing => return Ok((items, token)),
            _ => return Err(ParseError::expected(what, token.span.clone())),
        }
    }
}

/// Parses a plain identifier and returns its name and span.
///
/// The next token must be `TokenKind::Identifier`; keywords are separate
/// token kinds and are rejected here.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek(tokens)?;
    match &token.kind {
        TokenKind::Identifier(name) => {
            tokens.next();
            Ok((name.clone(), token.span.clone()))
        },
        _ => Err(ParseError::expected("identifier", token.span.clone())),
    }
}

/// Parses a parameter name; used with [`parse_comma_separated`].
pub(in crate::interpreter::parser) fn parse_parameter<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<String>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_identifier(tokens).map(|(name, _)| name)
}

fn end_of_input() -> ParseError {
    let source = SourceFile::new("<unknown>", "");
    ParseError::new(ParseErrorKind::UnexpectedEndOfInput,
                    Span::new(source, Position::start(), Position::start()))
}
