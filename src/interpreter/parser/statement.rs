use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::{parse_body, parse_statements},
            core::{ParseResult, parse_expression},
            utils::{
                at_separator, eat, expect, parse_comma_separated, parse_identifier, parse_parameter,
                peek,
            },
        },
    },
    source::Span,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - `return`, with an optional value.
/// - `continue`.
/// - `break`.
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the statement.
///
/// # Returns
/// The parsed node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek(tokens)?;
    match token.kind {
        TokenKind::Return => {
            tokens.next();
            if at_statement_end(peek(tokens)?) {
                return Ok(Node::Return { value: None,
                                         span:  token.span.clone(), });
            }
            let value = parse_expression(tokens)?;
            let span = token.span.to(value.span());
            Ok(Node::Return { value: Some(Box::new(value)),
                              span })
        },
        TokenKind::Continue => {
            tokens.next();
            Ok(Node::Continue { span: token.span.clone() })
        },
        TokenKind::Break => {
            tokens.next();
            Ok(Node::Break { span: token.span.clone() })
        },
        _ => parse_expression(tokens),
    }
}

/// Parses a `for` loop.
///
/// Syntax:
/// ```text
///     for <name> = <start> to <end> [step <step>] then <statement>
///
///     for <name> = <start> to <end> [step <step>] then
///         <statements>
///     end
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `for` keyword.
/// - `for_token`: The `for` keyword, used for the node span.
///
/// # Errors
/// `Expected identifier`, `Expected '='`, `Expected 'to'`, `Expected 'then'`
/// or `Expected 'end'` when the corresponding part is missing.
pub fn parse_for<'a, I>(tokens: &mut Peekable<I>, for_token: &Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let (var_name, _) = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::Equals, "'='")?;
    let start = parse_expression(tokens)?;
    expect(tokens, &TokenKind::To, "'to'")?;
    let end = parse_expression(tokens)?;
    let step = match eat(tokens, &TokenKind::Step) {
        Some(_) => Some(Box::new(parse_expression(tokens)?)),
        None => None,
    };
    expect(tokens, &TokenKind::Then, "'then'")?;

    let (body, discard_value) = parse_body(tokens, &[TokenKind::End])?;
    let span = for_token.span.to(&closing_span(tokens, &body, discard_value)?);

    Ok(Node::For { var_name,
                   start: Box::new(start),
                   end: Box::new(end),
                   step,
                   body: Box::new(body),
                   discard_value,
                   span })
}

/// Parses a `while` loop.
///
/// Syntax:
/// ```text
///     while <condition> then <statement>
///
///     while <condition> then
///         <statements>
///     end
/// ```
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>, while_token: &Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let condition = parse_expression(tokens)?;
    expect(tokens, &TokenKind::Then, "'then'")?;

    let (body, discard_value) = parse_body(tokens, &[TokenKind::End])?;
    let span = while_token.span.to(&closing_span(tokens, &body, discard_value)?);

    Ok(Node::While { condition: Box::new(condition),
                     body: Box::new(body),
                     discard_value,
                     span })
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     func [<name>](<params>) -> <expression>
///
///     func [<name>](<params>)
///         <statements>
///     end
/// ```
/// The arrow form returns the value of its expression. The block form returns
/// `null` unless a `return` statement runs.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `func` keyword.
/// - `func_token`: The `func` keyword, used for the node span.
pub fn parse_func_def<'a, I>(tokens: &mut Peekable<I>, func_token: &Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let name = match &peek(tokens)?.kind {
        TokenKind::Identifier(_) => Some(parse_identifier(tokens)?.0),
        _ => None,
    };

    expect(tokens, &TokenKind::LParen, "'('")?;
    let (params, _) =
        parse_comma_separated(tokens, parse_parameter, &TokenKind::RParen, "',' or ')'")?;

    if eat(tokens, &TokenKind::Arrow).is_some() {
        let body = parse_expression(tokens)?;
        let span = func_token.span.to(body.span());
        return Ok(Node::FuncDef { name,
                                  params,
                                  body: Rc::new(body),
                                  auto_return: true,
                                  span });
    }

    if !at_separator(tokens) {
        return Err(ParseError::expected("'->' or a new line", peek(tokens)?.span.clone()));
    }
    let body = parse_statements(tokens, &[TokenKind::End])?;
    let end = expect(tokens, &TokenKind::End, "'end'")?;

    Ok(Node::FuncDef { name,
                       params,
                       body: Rc::new(body),
                       auto_return: false,
                       span: func_token.span.to(&end.span) })
}

/// Parses an object template definition.
///
/// Syntax:
/// ```text
///     object <name>
///         <member statements>
///     end
/// ```
/// The member statements are kept unevaluated and run once for every
/// `new <name>`.
pub fn parse_object_def<'a, I>(tokens: &mut Peekable<I>, object_token: &Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let (name, _) = parse_identifier(tokens)?;
    if !at_separator(tokens) {
        return Err(ParseError::expected("a new line", peek(tokens)?.span.clone()));
    }
    let body = parse_statements(tokens, &[TokenKind::End])?;
    let end = expect(tokens, &TokenKind::End, "'end'")?;

    Ok(Node::ObjectDef { name,
                         body: Rc::new(body),
                         span: object_token.span.to(&end.span) })
}

/// Consumes the `end` of a block body and returns the span the construct
/// ends with.
fn closing_span<'a, I>(tokens: &mut Peekable<I>,
                       body: &Node,
                       is_block: bool)
                       -> ParseResult<Span>
    where I: Iterator<Item = &'a Token> + Clone
{
    if is_block {
        Ok(expect(tokens, &TokenKind::End, "'end'")?.span.clone())
    } else {
        Ok(body.span().clone())
    }
}

/// Returns `true` if `token` cannot start the value of a `return`.
const fn at_statement_end(token: &Token) -> bool {
    matches!(token.kind,
             TokenKind::Newline
             | TokenKind::Semicolon
             | TokenKind::Eof
             | TokenKind::End
             | TokenKind::Elif
             | TokenKind::Else)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ParseErrorKind, interpreter::lexer::tokenize};

    fn statement(text: &str) -> ParseResult<Node> {
        let tokens = tokenize("<test>", text).unwrap();
        parse_statement(&mut tokens.iter().peekable())
    }

    #[test]
    fn return_with_and_without_value() {
        assert!(matches!(statement("return").unwrap(), Node::Return { value: None, .. }));
        assert!(matches!(statement("return 1 + 2").unwrap(),
                         Node::Return { value: Some(_), .. }));
    }

    #[test]
    fn single_line_for_with_step() {
        let Node::For { var_name, step, discard_value, .. } =
            statement("for i = 10 to 0 step -2 then i").unwrap()
        else {
            panic!("expected a for loop");
        };
        assert_eq!(var_name, "i");
        assert!(step.is_some());
        assert!(!discard_value);
    }

    #[test]
    fn block_while() {
        let node = statement("while x < 3 then\n  var x = x + 1\nend").unwrap();
        assert!(matches!(node, Node::While { discard_value: true, .. }));
        assert_eq!(node.span().end.line, 3);
    }

    #[test]
    fn arrow_and_block_functions() {
        let Node::FuncDef { name, params, auto_return, .. } = statement("func add(a, b) -> a + b").unwrap()
        else {
            panic!("expected a function");
        };
        assert_eq!(name.as_deref(), Some("add"));
        assert_eq!(params, vec!["a".to_string(), "b".to_string()]);
        assert!(auto_return);

        let Node::FuncDef { name, auto_return, .. } = statement("func ()\n  return 1\nend").unwrap()
        else {
            panic!("expected a function");
        };
        assert_eq!(name, None);
        assert!(!auto_return);
    }

    #[test]
    fn object_definition() {
        let Node::ObjectDef { name, body, .. } = statement("object Point\n  var x = 0\n  var y = 0\nend").unwrap()
        else {
            panic!("expected an object");
        };
        assert_eq!(name, "Point");
        assert!(matches!(&*body, Node::List { elements, .. } if elements.len() == 2));
    }

    #[test]
    fn for_requires_to() {
        let error = statement("for i = 0 5 then i").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::Expected("'to'".into()));
    }

    #[test]
    fn function_requires_body() {
        let error = statement("func f() 1").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::Expected("'->' or a new line".into()));
    }
}
