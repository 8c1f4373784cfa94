use std::iter::Peekable;

use crate::{
    ast::{LiteralValue, Node, UnaryOperator},
    error::{ParseError, ParseErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression, parse_if},
            statement::{parse_for, parse_func_def, parse_object_def, parse_while},
            utils::{advance, eat, expect, parse_comma_separated, parse_identifier},
        },
    },
    source::Span,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `+`  (identity)
/// - `-`  (numeric negation)
///
/// Unary operators are right-associative, so an input like `-+x` is parsed as
/// `-(+x)`. `not` is handled one level up, at the comparison level.
///
/// `-9223372036854775808` becomes a single literal, since its magnitude alone
/// does not fit into an integer.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-") unary
///            | call
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A [`Node::UnaryOp`] or a call-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let op = match tokens.peek().map(|token| &token.kind) {
        Some(TokenKind::Plus) => UnaryOperator::Plus,
        Some(TokenKind::Minus) => UnaryOperator::Negate,
        _ => return parse_call(tokens),
    };
    let operator = advance(tokens)?;
    if op == UnaryOperator::Negate
       && let Some(literal) = tokens.peek().copied()
       && literal.kind == TokenKind::Int(i64::MIN.unsigned_abs())
    {
        advance(tokens)?;
        return Ok(Node::Literal { value: LiteralValue::Int(i64::MIN),
                                  span:  operator.span.to(&literal.span) });
    }
    let operand = parse_unary(tokens)?;
    let span = operator.span.to(operand.span());

    Ok(Node::UnaryOp { op,
                       operand: Box::new(operand),
                       span })
}

/// Parses an atom followed by any number of call suffixes.
///
/// A call suffix is recognized when the atom is immediately followed by `(`,
/// so `f(1)(2)` calls the result of `f(1)`.
///
/// Grammar: `call := atom ("(" (expression ("," expression)*)? ")")*`
fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut node = parse_atom(tokens)?;
    while eat(tokens, &TokenKind::LParen).is_some() {
        let (arguments, closing) =
            parse_comma_separated(tokens, parse_expression, &TokenKind::RParen, "',' or ')'")?;
        let span = node.span().to(&closing.span);
        node = Node::Call { callee: Box::new(node),
                            arguments,
                            span };
    }
    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - integer, float and string literals
/// - identifiers and dotted member access (`obj.member`, `obj.member = x`)
/// - parenthesized expressions
/// - list literals (`[ ... ]`)
/// - `if`, `for`, `while`, `func` and `object` constructs
/// - `new Name` instantiations
///
/// This function does not handle unary operators or call suffixes.
fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = advance(tokens)?;
    let span = token.span.clone();

    match &token.kind {
        TokenKind::Int(value) => match i64::try_from(*value) {
            Ok(value) => Ok(Node::Literal { value: LiteralValue::Int(value),
                                            span }),
            Err(_) => {
                Err(ParseError::new(ParseErrorKind::IntegerTooLarge(value.to_string()), span))
            },
        },
        TokenKind::Float(value) => Ok(Node::Literal { value: LiteralValue::Float(*value),
                                                      span }),
        TokenKind::Str(value) => Ok(Node::Literal { value: LiteralValue::Str(value.clone()),
                                                    span }),
        TokenKind::Identifier(name) => parse_identifier_atom(tokens, name, span),
        TokenKind::LParen => {
            let expression = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RParen, "')'")?;
            Ok(expression)
        },
        TokenKind::LBracket => {
            let (elements, closing) = parse_comma_separated(tokens,
                                                            parse_expression,
                                                            &TokenKind::RBracket,
                                                            "',' or ']'")?;
            Ok(Node::List { elements,
                            span: span.to(&closing.span) })
        },
        TokenKind::If => parse_if(tokens, token),
        TokenKind::For => parse_for(tokens, token),
        TokenKind::While => parse_while(tokens, token),
        TokenKind::Func => parse_func_def(tokens, token),
        TokenKind::Object => parse_object_def(tokens, token),
        TokenKind::New => {
            let (name, name_span) = parse_identifier(tokens)?;
            Ok(Node::NewObject { name,
                                 span: span.to(&name_span) })
        },
        TokenKind::Eof => Err(ParseError::expected("an expression", span)),
        other => Err(ParseError::new(ParseErrorKind::UnexpectedToken(other.to_string()), span)),
    }
}

/// Parses what follows an identifier: a plain variable read, or a dotted
/// member read or assignment.
///
/// Grammar: `IDENT ("." IDENT ("=" expression)?)?`
fn parse_identifier_atom<'a, I>(tokens: &mut Peekable<I>,
                                name: &str,
                                span: Span)
                                -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if eat(tokens, &TokenKind::Dot).is_none() {
        return Ok(Node::VarAccess { name: name.to_string(),
                                    span });
    }

    let (member, member_span) = parse_identifier(tokens)?;
    if eat(tokens, &TokenKind::Equals).is_some() {
        let value = parse_expression(tokens)?;
        let span = span.to(value.span());
        return Ok(Node::ScopeAccess { object: name.to_string(),
                                      member,
                                      value: Some(Box::new(value)),
                                      span });
    }

    Ok(Node::ScopeAccess { object: name.to_string(),
                           member,
                           value: None,
                           span: span.to(&member_span) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn atom(text: &str) -> Node {
        let tokens = tokenize("<test>", text).unwrap();
        parse_unary(&mut tokens.iter().peekable()).unwrap()
    }

    #[test]
    fn list_literal() {
        let Node::List { elements, span } = atom("[1, \"a\", []]") else {
            panic!("expected a list");
        };
        assert_eq!(elements.len(), 3);
        assert!(matches!(&elements[1],
                         Node::Literal { value: LiteralValue::Str(s), .. } if s == "a"));
        assert_eq!(span.text(), "[1, \"a\", []]");
    }

    #[test]
    fn member_access_and_assignment() {
        assert!(matches!(atom("p.x"),
                         Node::ScopeAccess { value: None, .. }));
        let Node::ScopeAccess { object, member, value, .. } = atom("p.x = 3") else {
            panic!("expected a scope access");
        };
        assert_eq!((object.as_str(), member.as_str()), ("p", "x"));
        assert!(value.is_some());
    }

    #[test]
    fn method_call_on_member() {
        let Node::Call { callee, arguments, .. } = atom("p.greet(1)") else {
            panic!("expected a call");
        };
        assert!(matches!(*callee, Node::ScopeAccess { .. }));
        assert_eq!(arguments.len(), 1);
    }

    #[test]
    fn new_instance() {
        assert!(matches!(atom("new Point"),
                         Node::NewObject { name, .. } if name == "Point"));
    }

    #[test]
    fn list_needs_separator() {
        let tokens = tokenize("<test>", "[1 2]").unwrap();
        let error = parse_unary(&mut tokens.iter().peekable()).unwrap_err();
        assert_eq!(error.to_string(),
                   "Invalid Syntax Error at Line 1 (4, 5): Expected ',' or ']'");
    }

    #[test]
    fn unexpected_token() {
        let tokens = tokenize("<test>", ")").unwrap();
        let error = parse_unary(&mut tokens.iter().peekable()).unwrap_err();
        assert_eq!(error.to_string(), "Invalid Syntax Error at Line 1 (1, 2): Unexpected token ')'");
    }

    #[test]
    fn smallest_integer_is_one_literal() {
        let node = atom("-9223372036854775808");
        assert!(matches!(&node, Node::Literal { value: LiteralValue::Int(value), .. } if *value == i64::MIN));
        assert_eq!(node.span().text(), "-9223372036854775808");
        assert!(matches!(atom("-9223372036854775807"),
                         Node::UnaryOp { op: UnaryOperator::Negate, .. }));
    }

    #[test]
    fn unsigned_smallest_integer_magnitude_is_rejected() {
        let tokens = tokenize("<test>", "9223372036854775808").unwrap();
        let error = parse_unary(&mut tokens.iter().peekable()).unwrap_err();
        assert_eq!(error.kind,
                   ParseErrorKind::IntegerTooLarge("9223372036854775808".to_string()));
        let tokens = tokenize("<test>", "+9223372036854775808").unwrap();
        assert!(parse_unary(&mut tokens.iter().peekable()).is_err());
    }
}
