use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{ElseCase, IfCase, Node},
    error::{ParseError, ParseErrorKind, SymplError},
    interpreter::{
        lexer::{Token, TokenKind, tokenize},
        parser::{
            binary::parse_logical,
            block::{parse_body, parse_statements},
            utils::{advance, eat, expect, parse_identifier, peek},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete token stream into the program's root node.
///
/// The root is a [`Node::List`] holding one node per top-level statement.
/// Every token up to [`TokenKind::Eof`] must be consumed; anything left over
/// is reported as `Expected operator or end of input`.
///
/// # Parameters
/// - `tokens`: Tokens as produced by the lexer, ending in `Eof`.
///
/// # Returns
/// The root node.
pub fn parse(tokens: &[Token]) -> ParseResult<Node> {
    let mut iter = tokens.iter().peekable();
    let root = parse_statements(&mut iter, &[])?;

    let token = peek(&mut iter)?;
    if token.kind != TokenKind::Eof {
        return Err(ParseError::new(ParseErrorKind::TrailingTokens, token.span.clone()));
    }

    debug!(statements = statement_count(&root), "parsed program");
    Ok(root)
}

/// Lexes and parses `text` in one step.
///
/// # Example
/// ```
/// use sympl::{ast::Node, interpreter::parser::parse_source};
///
/// let root = parse_source("<test>", "var x = 2 + 3 * 4").unwrap();
/// assert!(matches!(root, Node::List { elements, .. } if elements.len() == 1));
/// ```
pub fn parse_source(file_name: &str, text: &str) -> Result<Node, SymplError> {
    let tokens = tokenize(file_name, text)?;
    Ok(parse(&tokens)?)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Variable assignment has
/// the lowest precedence and is recognized with a two-token lookahead
/// (`name =`); otherwise parsing begins at the logical level and recursively
/// descends through the precedence hierarchy.
///
/// Grammar:
/// ```text
///     expression := "var" IDENT "=" expression
///                 | IDENT "=" expression
///                 | logical
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(var) = eat(tokens, &TokenKind::Var) {
        let (name, _) = parse_identifier(tokens)?;
        expect(tokens, &TokenKind::Equals, "'='")?;
        let value = parse_expression(tokens)?;
        let span = var.span.to(value.span());
        return Ok(Node::VarAssign { name,
                                    value: Box::new(value),
                                    span });
    }

    let mut lookahead = tokens.clone();
    if let Some(Token { kind: TokenKind::Identifier(name),
                        span: start, }) = lookahead.next()
       && let Some(Token { kind: TokenKind::Equals,
                           .. }) = lookahead.next()
    {
        tokens.next();
        tokens.next();
        let value = parse_expression(tokens)?;
        let span = start.to(value.span());
        return Ok(Node::VarAssign { name: name.clone(),
                                    value: Box::new(value),
                                    span });
    }

    parse_logical(tokens)
}

/// Parses an `if` expression with any number of `elif` branches and an
/// optional `else`.
///
/// Syntax:
/// ```text
///     if <condition> then <statement> [elif ...] [else <statement>]
///
///     if <condition> then
///         <statements>
///     elif <condition> then
///         <statements>
///     else
///         <statements>
///     end
/// ```
/// A branch whose body starts on a new line is a block: it runs until the
/// next `elif`, `else` or `end` and its value is discarded. A branch on the
/// same line holds a single statement whose value becomes the value of the
/// `if`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `if_token`: The `if` keyword, used for the node span.
///
/// # Errors
/// - `Expected 'then'` after a condition.
/// - `Expected 'end'` after a block branch.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, if_token: &Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut cases = Vec::new();
    let mut else_case = None;

    let end_span = loop {
        let condition = parse_expression(tokens)?;
        expect(tokens, &TokenKind::Then, "'then'")?;

        let (body, is_block) =
            parse_body(tokens, &[TokenKind::Elif, TokenKind::Else, TokenKind::End])?;
        let body_span = body.span().clone();
        cases.push(IfCase { condition,
                            body,
                            discard_value: is_block });

        let next = peek(tokens)?;
        match next.kind {
            TokenKind::Elif => {
                tokens.next();
            },
            TokenKind::Else => {
                tokens.next();
                let (body, is_block) = parse_body(tokens, &[TokenKind::End])?;
                let mut span = body.span().clone();
                if is_block {
                    span = expect(tokens, &TokenKind::End, "'end'")?.span.clone();
                }
                else_case = Some(Box::new(ElseCase { body,
                                                     discard_value: is_block }));
                break span;
            },
            TokenKind::End if is_block => {
                break advance(tokens)?.span.clone();
            },
            _ if is_block => return Err(ParseError::expected("'end'", next.span.clone())),
            _ => break body_span,
        }
    };

    Ok(Node::If { cases,
                  else_case,
                  span: if_token.span.to(&end_span) })
}

fn statement_count(root: &Node) -> usize {
    match root {
        Node::List { elements, .. } => elements.len(),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{BinaryOperator, LiteralValue, UnaryOperator};

    fn parse_text(text: &str) -> ParseResult<Node> {
        let tokens = tokenize("<test>", text).unwrap();
        parse(&tokens)
    }

    fn statements(text: &str) -> Vec<Node> {
        match parse_text(text).unwrap() {
            Node::List { elements, .. } => elements,
            other => panic!("expected a statement list, got {other:?}"),
        }
    }

    fn single(text: &str) -> Node {
        let mut elements = statements(text);
        assert_eq!(elements.len(), 1);
        elements.remove(0)
    }

    /// Renders a node as a compact s-expression, ignoring spans.
    fn shape(node: &Node) -> String {
        match node {
            Node::Literal { value: LiteralValue::Int(v), .. } => v.to_string(),
            Node::Literal { value: LiteralValue::Float(v), .. } => format!("{v:?}"),
            Node::Literal { value: LiteralValue::Str(v), .. } => format!("{v:?}"),
            Node::VarAccess { name, .. } => name.clone(),
            Node::UnaryOp { op, operand, .. } => format!("({op} {})", shape(operand)),
            Node::BinaryOp { left, op, right, .. } => {
                format!("({op} {} {})", shape(left), shape(right))
            },
            Node::VarAssign { name, value, .. } => format!("(= {name} {})", shape(value)),
            Node::Call { callee, arguments, .. } => {
                let args: Vec<_> = arguments.iter().map(shape).collect();
                format!("(call {} [{}])", shape(callee), args.join(" "))
            },
            Node::List { elements, .. } => {
                let items: Vec<_> = elements.iter().map(shape).collect();
                format!("[{}]", items.join(" "))
            },
            other => format!("{other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(shape(&single("2 + 3 * 4")), "(+ 2 (* 3 4))");
    }

    #[test]
    fn power_is_right_associative_over_unary_operands() {
        assert_eq!(shape(&single("2 ^ 3 ^ 2")), "(^ 2 (^ 3 2))");
        assert_eq!(shape(&single("-2 ^ 2")), "(^ (- 2) 2)");
    }

    #[test]
    fn logical_operators_bind_loosest() {
        assert_eq!(shape(&single("not a == 1 and b < 2 or c")),
                   "(or (and (not (== a 1)) (< b 2)) c)");
    }

    #[test]
    fn assignment_forms() {
        assert_eq!(shape(&single("var x = y = 1 + 2")), "(= x (= y (+ 1 2)))");
        assert_eq!(shape(&single("x == 1")), "(== x 1)");
    }

    #[test]
    fn calls_chain_and_take_arguments() {
        assert_eq!(shape(&single("f(1, g(2))(3)")), "(call (call f [1 (call g [2])]) [3])");
    }

    #[test]
    fn statements_are_separated_by_newlines_and_semicolons() {
        let parsed: Vec<_> = statements("\n1; 2\n\n3\n").iter().map(shape).collect();
        assert_eq!(parsed, vec!["1", "2", "3"]);
    }

    #[test]
    fn single_line_if_keeps_values() {
        let Node::If { cases, else_case, .. } = single("if x then 1 elif y then 2 else 3") else {
            panic!("expected an if node");
        };
        assert_eq!(cases.len(), 2);
        assert!(!cases[0].discard_value);
        assert_eq!(shape(&else_case.unwrap().body), "3");
    }

    #[test]
    fn block_if_discards_values() {
        let node = single("if x then\n  1\n  2\nelse\n  3\nend");
        let Node::If { cases, else_case, span } = node else {
            panic!("expected an if node");
        };
        assert!(cases[0].discard_value);
        assert_eq!(shape(&cases[0].body), "[1 2]");
        assert!(else_case.unwrap().discard_value);
        assert_eq!(span.end.line, 6);
    }

    #[test]
    fn unary_plus_and_not() {
        assert_eq!(shape(&single("+-x")), "(+ (- x))");
        assert_eq!(shape(&single("!x")), "(not x)");
        assert!(matches!(single("-1"),
                         Node::UnaryOp { op: UnaryOperator::Negate,
                                         .. }));
    }

    #[test]
    fn binary_spans_cover_both_operands() {
        let node = single("  12 + foo");
        assert!(matches!(node, Node::BinaryOp { op: BinaryOperator::Add, .. }));
        assert_eq!(node.span().text(), "12 + foo");
    }

    #[test]
    fn missing_close_paren() {
        let error = parse_text("(1 + 2").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::Expected("')'".into()));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let error = parse_text("1 2").unwrap_err();
        assert_eq!(error.to_string(),
                   "Invalid Syntax Error at Line 1 (3, 4): Expected operator or end of input");
    }

    #[test]
    fn second_dot_in_number_is_a_syntax_error() {
        assert!(parse_text("1.2.3").is_err());
    }

    #[test]
    fn if_requires_then_and_end() {
        assert_eq!(parse_text("if x 1").unwrap_err().kind,
                   ParseErrorKind::Expected("'then'".into()));
        assert_eq!(parse_text("if x then\n 1\n").unwrap_err().kind,
                   ParseErrorKind::Expected("'end'".into()));
    }
}
