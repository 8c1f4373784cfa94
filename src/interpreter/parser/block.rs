use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{at_separator, peek, skip_separators},
        },
    },
};

/// Parses a sequence of statements separated by newlines or semicolons.
///
/// Leading and trailing separators are ignored. Parsing stops before end of
/// input, before any of the `terminators` (such as `end` or `else`) and after
/// a statement that is not followed by a separator. Checking what comes next
/// is left to the caller.
///
/// Grammar: `statements := SEP* statement (SEP+ statement)* SEP*`
///
/// The result is returned as `Node::List`; its span covers the first to the
/// last statement.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first statement or separator.
/// - `terminators`: Tokens that end the sequence.
///
/// # Returns
/// A list node containing all parsed statements.
pub fn parse_statements<'a, I>(tokens: &mut Peekable<I>,
                               terminators: &[TokenKind])
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    skip_separators(tokens);
    let first = peek(tokens)?.span.clone();
    let mut elements: Vec<Node> = Vec::new();

    loop {
        let token = peek(tokens)?;
        if token.kind == TokenKind::Eof || terminators.contains(&token.kind) {
            break;
        }

        elements.push(parse_statement(tokens)?);

        if skip_separators(tokens) == 0 {
            break;
        }
    }

    let span = match (elements.first(), elements.last()) {
        (Some(first), Some(last)) => first.span().to(last.span()),
        _ => first,
    };
    Ok(Node::List { elements, span })
}

/// Parses the body of an `if`, `elif`, `else`, `for` or `while`.
///
/// A body that starts on the same line is a single statement. A body that
/// starts after a separator is a block of statements running up to one of the
/// `terminators`; the caller consumes the terminator itself.
///
/// # Parameters
/// - `tokens`: Token stream positioned right after `then` or `else`.
/// - `terminators`: Tokens that end a block body.
///
/// # Returns
/// The body and whether it was a block.
pub fn parse_body<'a, I>(tokens: &mut Peekable<I>,
                         terminators: &[TokenKind])
                         -> ParseResult<(Node, bool)>
    where I: Iterator<Item = &'a Token> + Clone
{
    if at_separator(tokens) {
        Ok((parse_statements(tokens, terminators)?, true))
    } else {
        Ok((parse_statement(tokens)?, false))
    }
}
